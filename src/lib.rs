//! Voice Assist — turns assistant speech transcripts into structured
//! onboarding events for the business-setup UI.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod publish;
pub mod session;
