//! # Care Companion Core
//!
//! Domain types and collaborator traits for the Care Companion signal engine.
//! This crate has **no framework dependencies**: it defines the value objects
//! that flow between the engine and its collaborators, plus the two narrow
//! traits the engine consumes for text and vision generation.
//!
//! ## Design Philosophy
//!
//! Every external service is a trait here. Implementations live in the
//! providers crate. This enables:
//! - Swapping the generation backend via configuration
//! - Testing the engine with scripted collaborators
//! - A clean dependency graph (all crates depend inward on core)

pub mod account;
pub mod analysis;
pub mod error;
pub mod intent;
pub mod message;
pub mod provider;
pub mod signal;

// Re-export key types at crate root for ergonomics
pub use account::Account;
pub use analysis::{AnalysisResult, AnalysisType, SeverityTier};
pub use error::{Error, GenerationFailure, Result};
pub use intent::{ActionIntent, Approval};
pub use message::{Message, Role};
pub use provider::{
    Generation, GenerationRequest, TextGenerator, Usage, VisionGenerator, VisionReply,
    VisionRequest,
};
pub use signal::{CalendarEvent, MedicationRef, SignalBundle};
