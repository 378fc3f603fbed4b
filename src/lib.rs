//! tmplbind - Template-variable binding and preview engine
//!
//! Binds user-entered values to the placeholders of a WhatsApp message
//! template for an auto-reply flow node, reserves a slot for the contact's
//! name, tracks which URL buttons need a runtime parameter, and renders the
//! message exactly as a recipient would see it.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod log;
pub mod node;
pub mod template;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use catalog::TemplateCatalog;
pub use config::Settings;
pub use doctor::{diagnose, DiagnosticReport};
pub use log::{SessionLogger, SessionOutcome, SessionRecord};
pub use node::config::{reconcile, NodeConfig};
pub use node::params::{resize_params, resize_url_params};
pub use node::profile::{reconcile_profile, ProfileBinding};
pub use node::session::EditorSession;
pub use template::buttons::{button_readiness, is_dynamic, select_dynamic_buttons};
pub use template::header::is_valid_https_url;
pub use template::model::{Button, HeaderKind, Template};
pub use template::placeholder::{count_placeholders, tokenize, Token};
pub use template::render::{render_body, Preview, PreviewRenderer};
