//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::template::model::{Button, Template};

/// Build a slot value vector from string slices.
#[must_use]
pub fn params(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// A URL button labelled "Track" at the given index.
#[must_use]
pub fn url_button(index: i64, parameter_value: &str) -> Button {
    Button {
        kind: "URL".to_string(),
        sub_type: String::new(),
        text: "Track".to_string(),
        index: Some(index),
        parameter_value: parameter_value.to_string(),
    }
}

/// A quick-reply button labelled "Reply" at the given index.
#[must_use]
pub fn quick_reply_button(index: i64) -> Button {
    Button {
        kind: "QUICK_REPLY".to_string(),
        sub_type: "quick_reply".to_string(),
        text: "Reply".to_string(),
        index: Some(index),
        parameter_value: String::new(),
    }
}

/// A text-header template named `test_template` with the given body.
#[must_use]
pub fn template_with(body: &str, buttons: Vec<Button>) -> Template {
    Template {
        name: "test_template".to_string(),
        language: "en_US".to_string(),
        body: body.to_string(),
        buttons,
        ..Template::default()
    }
}
