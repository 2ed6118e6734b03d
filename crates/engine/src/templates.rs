//! Prompt templates for the generation collaborators.
//!
//! Vision templates share a common preamble that sets the audience (an older
//! adult living with memory loss) and the tone. Templates for documents that
//! can interact with medication also carry the user's current medication list.

use carecompanion_core::analysis::AnalysisType;
use carecompanion_core::signal::MedicationRef;

/// System instructions for every chat turn.
pub const CHAT_SYSTEM_PROMPT: &str = r#"You are a caring AI assistant for an elderly person with Alzheimer's disease and dementia.

CRITICAL GUIDELINES:
- Be patient, warm, and never condescending
- Use simple, clear language (5th grade reading level)
- Repeat information naturally if asked again - NEVER show frustration
- Speak in short, clear sentences
- Avoid complex concepts or jargon
- Always confirm understanding
- Offer reassurance and comfort
- Remember: dignity and respect are paramount

PERSONALITY:
- Warm and friendly, like a caring family member
- Patient and understanding
- Never frustrated by repetition
- Gentle with corrections
- Encouraging and positive

SAFETY RULES:
- Never agree to send money or make purchases without caregiver approval
- Always require confirmation for any action
- If user seems distressed, offer to contact caregiver
- Watch for emergency keywords: help, hurt, fell, lost, scared, confused
- Never provide medical advice (only reminders about medications)

RESPONSE STYLE:
- Start with acknowledgment ("I understand", "Let me help you")
- Keep sentences under 15 words
- Use the person's name occasionally
- Acknowledge feelings ("I can see that's concerning")
- Offer simple choices when appropriate
- End with an offer to help more

AVAILABLE CAPABILITIES:
- Check calendar and appointments
- Read messages and emails
- Check bank balance (read-only)
- Remind about medications
- Contact caregivers
- Set reminders
- Answer questions about daily schedule

IMPORTANT: If asked the same question multiple times, respond warmly each time.
Example: "As I mentioned earlier, your appointment is at 2pm. That's in about 3 hours. Would you like me to remind you again closer to the time?"

Remember: This person may be confused, scared, or forgetful. Your job is to provide comfort, clarity, and safety."#;

const PREAMBLE: &str = "You are helping an elderly person with Alzheimer's disease.
Your analysis should be:
- Clear and simple (5th grade reading level)
- Compassionate and patient
- Focused on safety
- Highlighting important information only";

const NO_MEDICATIONS: &str = "No current medications listed";

/// `"name dosage"` pairs joined by `", "`.
pub fn format_medications(medications: &[MedicationRef]) -> String {
    if medications.is_empty() {
        return NO_MEDICATIONS.into();
    }
    medications
        .iter()
        .map(|m| format!("{} {}", m.name, m.dosage).trim_end().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The vision prompt for one analysis type.
pub fn select_template(analysis_type: AnalysisType, medications: &[MedicationRef]) -> String {
    let meds = format_medications(medications);

    let body = match analysis_type {
        AnalysisType::Prescription => format!(
            "This is a prescription. Please extract and explain:

1. **Medication name** (generic and brand if shown)
2. **Dosage** (how much to take)
3. **Frequency** (how often to take it)
4. **Special instructions** (with food, at bedtime, etc.)
5. **Prescribing doctor**
6. **Refill information**

IMPORTANT: Check for interactions with current medications: {meds}

Format your response clearly with:
- WHAT IT IS: [medication name and purpose]
- HOW TO TAKE IT: [simple instructions]
- WARNINGS: [any important safety info or interactions]
- WHAT TO DO: [next steps]"
        ),
        AnalysisType::MedicationLabel => format!(
            "This is a medication label. Please extract:

1. **Drug name** (active ingredient)
2. **Dosage strength**
3. **How to take it** (instructions)
4. **Warnings** (side effects, precautions)
5. **Expiration date**
6. **Storage instructions**

Check for interactions with: {meds}

Explain in simple terms what this medication is for and how to use it safely."
        ),
        AnalysisType::DoctorNote => "This is a doctor's note. Please:

1. Summarize the main points in simple language
2. Extract any diagnoses mentioned
3. List any new medications or treatments
4. Note any follow-up appointments or tests needed
5. Highlight anything urgent or important

Present this information clearly so the patient and caregiver can understand next steps."
            .to_string(),
        AnalysisType::Recipe => format!(
            "This is a recipe. Please extract:

1. **Recipe name**
2. **Ingredients** (with amounts)
3. **Steps** (numbered, simplified)
4. **Cooking time**
5. **Servings**

IMPORTANT: Check ingredients against dietary restrictions or medication interactions: {meds}

Simplify the instructions and highlight any potential allergens or concerning ingredients."
        ),
        AnalysisType::FoodLabel => format!(
            "This is a food label. Please extract:

1. **Product name**
2. **Key ingredients** (first 5)
3. **Allergen warnings**
4. **Nutritional highlights** (calories, sodium, sugar)
5. **Serving size**

Check for:
- Allergens
- High sodium (concern for blood pressure)
- High sugar (concern for diabetes)
- Interactions with medications: {meds}

Explain if this food is safe to eat based on common elderly health concerns."
        ),
        AnalysisType::Nutrition => format!(
            "This is nutrition information. Please explain:

1. **Calories per serving**
2. **Sodium** (highlight if high - over 400mg)
3. **Sugar** (highlight if high - over 15g)
4. **Protein**
5. **Key vitamins/minerals**

Check against common dietary restrictions for elderly:
- Low sodium (heart health)
- Low sugar (diabetes)
- Adequate protein

Current medications: {meds}

Explain in simple terms if this is a healthy choice."
        ),
        AnalysisType::Sign => "Please read this sign or text and:

1. **Read the text exactly as written**
2. **Explain what it means** in simple language
3. **Highlight important information** (warnings, directions, instructions)
4. **Suggest what to do** if it's instructional

Make it very clear what this sign is telling the person to do."
            .to_string(),
        AnalysisType::Unknown => {
            "Please read and explain what you see in this image in simple, clear language."
                .to_string()
        }
    };

    format!("{PREAMBLE}\n\n{body}")
}

/// The medication-safety prompt for checking a new medication against the
/// current list.
pub fn interaction_prompt(new_medication: &str, current: &[MedicationRef]) -> String {
    format!(
        "You are a medication safety assistant.

NEW MEDICATION: {new_medication}

CURRENT MEDICATIONS: {current}

Please check for:
1. Drug-drug interactions
2. Duplicate medications (same class)
3. Concerning combinations

Provide:
- List of interactions (if any)
- Severity level (mild, moderate, severe)
- What could happen
- What to do (talk to doctor, etc.)

Be clear and specific. This is for an elderly person with Alzheimer's, so explain simply.",
        current = format_medications(current),
    )
}
