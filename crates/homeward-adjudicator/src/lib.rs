//! Homeward adjudication.
//!
//! The adjudicator is the external service that reads a submitted
//! arrangement and decides what happens next. This crate defines the contract
//! the engine consumes ([`Adjudicator`], request and response types) and a
//! `generateContent` HTTP adapter for Gemini models.

pub mod contract;
pub mod gemini;

pub use contract::{
    AdjudicationError, AdjudicationRequest, AdjudicationResponse, Adjudicator, EndingType, Outcome,
};
pub use gemini::{GeminiAdjudicator, GeminiConfig};
