//! CLI output formatting
//!
//! Provides human-readable terminal display for node previews and
//! diagnostic reports.

pub mod display;

pub use display::render_diagnostic_report;
pub use display::PreviewDisplay;
