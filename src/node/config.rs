//! Node configuration value
//!
//! `NodeConfig` holds everything a user entered for one auto-reply node.
//! It is a plain value: [`reconcile`] maps a config and the selected template
//! to the next config, and the host stores the saved value verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::params::{resize_params, resize_url_params};
use crate::node::profile::reconcile_profile;
use crate::template::buttons::URL_BUTTON_SLOTS;
use crate::template::model::Template;
use crate::template::placeholder::count_placeholders;

/// User-entered values for one template node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeConfig {
    /// Body values, one per placeholder, slot order
    pub body_params: Vec<String>,
    /// URL parameters for dynamic buttons, addressed by button index
    pub url_button_params: [String; URL_BUTTON_SLOTS],
    /// Whether one slot is filled with the contact name
    pub use_profile_name: bool,
    /// 1-based slot filled with the contact name
    pub profile_name_slot: usize,
    /// Media URL for image/video/document headers
    pub header_media_url: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            body_params: Vec::new(),
            url_button_params: Default::default(),
            use_profile_name: false,
            profile_name_slot: 1,
            header_media_url: String::new(),
        }
    }
}

impl NodeConfig {
    /// Rebuild a config from previously saved node data.
    ///
    /// Reads leniently: fields of the wrong shape fall back to their
    /// defaults and array entries are stringified. The result is not yet
    /// reconciled against a template.
    #[must_use]
    pub fn hydrate(saved: Option<&Value>) -> Self {
        let Some(saved) = saved else {
            return Self::default();
        };

        let profile_name_slot = saved
            .get("profileNameSlot")
            .and_then(Value::as_u64)
            .and_then(|slot| usize::try_from(slot).ok())
            .unwrap_or(1);

        Self {
            body_params: string_array(saved.get("bodyParams")),
            url_button_params: resize_url_params(string_array(saved.get("urlButtonParams"))),
            use_profile_name: saved
                .get("useProfileName")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            profile_name_slot,
            header_media_url: saved
                .get("headerMediaUrl")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// The contact-name slot, if the binding is enabled
    #[must_use]
    pub const fn active_profile_slot(&self) -> Option<usize> {
        if self.use_profile_name {
            Some(self.profile_name_slot)
        } else {
            None
        }
    }
}

/// Read a JSON array of scalars as strings; anything else is empty.
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(stringify).collect())
        .unwrap_or_default()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Bring a config in line with the selected template.
///
/// Resizes the body values to the placeholder count (zero without a
/// template) and re-derives the contact-name binding. Applying it twice
/// gives the same result as applying it once.
#[must_use]
pub fn reconcile(config: NodeConfig, template: Option<&Template>) -> NodeConfig {
    let placeholder_count = template.map_or(0, |t| count_placeholders(&t.body));
    let binding = reconcile_profile(
        config.use_profile_name,
        config.profile_name_slot,
        placeholder_count,
    );

    NodeConfig {
        body_params: resize_params(config.body_params, placeholder_count),
        use_profile_name: binding.use_profile_name,
        profile_name_slot: binding.profile_name_slot,
        ..config
    }
}
