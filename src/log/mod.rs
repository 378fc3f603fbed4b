//! Logging and observability
//!
//! This module provides the JSONL history of closed editing sessions.

pub mod jsonl;

pub use jsonl::{SessionLogger, SessionOutcome, SessionRecord};
