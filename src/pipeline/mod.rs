//! Turn-processing pipeline: field extraction, intent classification, orchestration.

pub mod fields;
pub mod hours;
pub mod intent;
pub mod processor;
pub mod services;
pub mod types;

pub use processor::TurnProcessor;
pub use types::{ConversationTurn, Role, StructuredEvent};
