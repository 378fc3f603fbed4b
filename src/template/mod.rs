//! Message templates
//!
//! Template model, placeholder analysis, dynamic buttons and preview
//! rendering.

pub mod buttons;
pub mod header;
pub mod model;
pub mod placeholder;
pub mod render;
