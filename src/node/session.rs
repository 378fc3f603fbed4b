//! Editing session for one template node
//!
//! An `EditorSession` exclusively owns the `NodeConfig` being edited. Every
//! mutation goes through a setter that re-runs [`reconcile`], so the config
//! always satisfies its invariants. Closing the session consumes it: `save`
//! hands the config back to the host, `cancel` throws it away.

use serde_json::Value;

use crate::node::config::{reconcile, NodeConfig};
use crate::template::buttons::{select_dynamic_buttons, URL_BUTTON_SLOTS};
use crate::template::header::is_valid_https_url;
use crate::template::model::{Button, Template};
use crate::template::placeholder::count_placeholders;
use crate::template::render::{Preview, PreviewRenderer};

/// Session-scoped editor state for one node
#[derive(Debug, Clone)]
pub struct EditorSession {
    node_id: String,
    template: Option<Template>,
    config: NodeConfig,
}

impl EditorSession {
    /// Open a session, hydrating from previously saved node data if any.
    #[must_use]
    pub fn open(node_id: &str, saved: Option<&Value>, template: Option<Template>) -> Self {
        let config = reconcile(NodeConfig::hydrate(saved), template.as_ref());
        Self {
            node_id: node_id.to_string(),
            template,
            config,
        }
    }

    /// Identifier of the node being edited
    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The selected template, if any
    #[must_use]
    pub const fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// The current, reconciled config
    #[must_use]
    pub const fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Number of placeholders in the selected template's body
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.template
            .as_ref()
            .map_or(0, |t| count_placeholders(&t.body))
    }

    /// Buttons that need a URL parameter, ordered by index
    #[must_use]
    pub fn dynamic_buttons(&self) -> Vec<&Button> {
        self.template
            .as_ref()
            .map_or_else(Vec::new, |t| select_dynamic_buttons(&t.buttons))
    }

    /// Header URL validity, or `None` when the header takes no media
    #[must_use]
    pub fn header_url_valid(&self) -> Option<bool> {
        self.template
            .as_ref()
            .filter(|t| t.header_kind.is_media())
            .map(|_| is_valid_https_url(&self.config.header_media_url))
    }

    /// Live preview of the node
    #[must_use]
    pub fn preview(&self, renderer: &PreviewRenderer) -> Preview {
        renderer.render_template(self.template.as_ref(), &self.config)
    }

    /// Switch templates (or clear the selection) and reproject values.
    pub fn select_template(&mut self, template: Option<Template>) {
        self.template = template;
        self.apply(|_| {});
    }

    /// Set the value of a 1-based body slot.
    ///
    /// Returns false (and changes nothing) when the slot does not exist.
    pub fn set_body_param(&mut self, slot: usize, value: &str) -> bool {
        let Some(index) = slot.checked_sub(1) else {
            return false;
        };
        if index >= self.config.body_params.len() {
            return false;
        }
        self.apply(|config| config.body_params[index] = value.to_string());
        true
    }

    /// Set the URL parameter for the button at `index`.
    ///
    /// Returns false when the index is outside the three-slot window.
    pub fn set_url_button_param(&mut self, index: usize, value: &str) -> bool {
        if index >= URL_BUTTON_SLOTS {
            return false;
        }
        self.apply(|config| config.url_button_params[index] = value.to_string());
        true
    }

    /// Toggle the contact-name binding.
    ///
    /// Enabling it on a template without placeholders has no effect.
    pub fn set_use_profile_name(&mut self, enabled: bool) {
        self.apply(|config| config.use_profile_name = enabled);
    }

    /// Choose the contact-name slot; out-of-range values are clamped.
    pub fn set_profile_name_slot(&mut self, slot: usize) {
        self.apply(|config| config.profile_name_slot = slot);
    }

    /// Set the header media URL. Validity is reported, not enforced.
    pub fn set_header_media_url(&mut self, url: &str) {
        self.apply(|config| config.header_media_url = url.to_string());
    }

    /// Close the session and hand the config back to the host.
    #[must_use]
    pub fn save(self) -> NodeConfig {
        self.config
    }

    /// Close the session and discard all edits.
    pub fn cancel(self) {}

    fn apply(&mut self, edit: impl FnOnce(&mut NodeConfig)) {
        let mut config = std::mem::take(&mut self.config);
        edit(&mut config);
        self.config = reconcile(config, self.template.as_ref());
    }
}
