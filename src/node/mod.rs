//! Node configuration
//!
//! The values a user enters for one auto-reply node, the rules that keep
//! them in shape with the selected template, and the editing session that
//! owns them.

pub mod config;
pub mod params;
pub mod profile;
pub mod session;
