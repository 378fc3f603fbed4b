//! Template preview rendering
//!
//! Produces the text a recipient would see from a template body and a node's
//! values. Unfilled tokens stay in the output verbatim so the preview shows
//! which slots are still required.

use std::collections::HashSet;

use serde::Serialize;

use crate::node::config::NodeConfig;
use crate::template::buttons::{button_readiness, is_dynamic};
use crate::template::header::is_valid_https_url;
use crate::template::model::{HeaderKind, Template};
use crate::template::placeholder::{tokenize, Token};

/// Text shown in place of the contact-name slot
pub const DEFAULT_CONTACT_NAME: &str = "Contact name";

/// Preview text used when there is nothing to render
pub const DEFAULT_EMPTY_TEXT: &str = "No content";

/// A rendered body plus the slots that could not be filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBody {
    /// Rendered text
    pub text: String,
    /// 1-based slots left as literal tokens, in first-seen order
    pub unresolved_slots: Vec<usize>,
}

/// Readiness of a single template button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonPreview {
    /// Button label
    pub text: String,
    /// Whether the button needs a URL parameter
    pub dynamic: bool,
    /// Whether the button has everything it needs
    pub ready: bool,
}

/// Header media status for media-header templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderPreview {
    /// Header media kind
    pub kind: HeaderKind,
    /// Whether the node's media URL is an absolute https URL
    pub url_valid: bool,
}

/// Full live preview of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Rendered body text (or the empty-preview text)
    pub text: String,
    /// Slots still showing a literal token
    pub unresolved_slots: Vec<usize>,
    /// One entry per template button, in template order
    pub buttons: Vec<ButtonPreview>,
    /// Present only when the template has a media header
    pub header: Option<HeaderPreview>,
}

impl Preview {
    /// Returns true when every slot, button and header URL is satisfied
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved_slots.is_empty()
            && self.buttons.iter().all(|b| b.ready)
            && self.header.is_none_or(|h| h.url_valid)
    }
}

/// Renders previews with configurable display texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRenderer {
    contact_name: String,
    empty_text: String,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_NAME, DEFAULT_EMPTY_TEXT)
    }
}

impl PreviewRenderer {
    /// Create a renderer with the given contact-name and empty-preview texts
    #[must_use]
    pub fn new(contact_name: &str, empty_text: &str) -> Self {
        Self {
            contact_name: contact_name.to_string(),
            empty_text: empty_text.to_string(),
        }
    }

    /// Text substituted into the contact-name slot
    #[must_use]
    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    /// Render a body against 0-indexed slot values.
    ///
    /// Positional tokens fill from their own slot. Every slot referenced by a
    /// positional token is claimed, and anonymous tokens then fill left to
    /// right from the lowest unclaimed slots. `profile_slot` (1-based) always
    /// renders as the contact name, whatever value the slot holds.
    #[must_use]
    pub fn render_body(
        &self,
        body: &str,
        params: &[String],
        profile_slot: Option<usize>,
    ) -> RenderedBody {
        let tokens = tokenize(body);
        let claimed: HashSet<usize> = tokens
            .iter()
            .filter_map(|token| match *token {
                Token::Positional { slot, .. } => slot.checked_sub(1),
                _ => None,
            })
            .collect();

        let mut out = RenderedBody {
            text: String::with_capacity(body.len()),
            unresolved_slots: Vec::new(),
        };
        let mut cursor = 0;

        for token in &tokens {
            match *token {
                Token::Literal(text) => out.text.push_str(text),
                Token::Positional { slot, raw } => {
                    self.fill(&mut out, slot, raw, params, profile_slot);
                }
                Token::Anonymous { raw } => {
                    while claimed.contains(&cursor) {
                        cursor += 1;
                    }
                    self.fill(&mut out, cursor + 1, raw, params, profile_slot);
                    cursor += 1;
                }
            }
        }

        out
    }

    fn fill(
        &self,
        out: &mut RenderedBody,
        slot: usize,
        raw: &str,
        params: &[String],
        profile_slot: Option<usize>,
    ) {
        if slot >= 1 && profile_slot == Some(slot) {
            out.text.push_str(&self.contact_name);
            return;
        }

        let value = slot
            .checked_sub(1)
            .and_then(|index| params.get(index))
            .filter(|value| !value.trim().is_empty());

        if let Some(value) = value {
            out.text.push_str(value);
        } else {
            out.text.push_str(raw);
            // {{0}} and overflowing numbers name no slot a value could fill
            if is_fillable_slot(slot) && !out.unresolved_slots.contains(&slot) {
                out.unresolved_slots.push(slot);
            }
        }
    }

    /// Build the full preview for a node.
    ///
    /// A missing template or a blank body collapses to the empty-preview text
    /// with no buttons and no header.
    #[must_use]
    pub fn render_template(&self, template: Option<&Template>, config: &NodeConfig) -> Preview {
        let Some(template) = template else {
            return self.empty_preview();
        };

        let (text, unresolved_slots) = if template.body.trim().is_empty() {
            (self.empty_text.clone(), Vec::new())
        } else {
            let rendered = self.render_body(
                &template.body,
                &config.body_params,
                config.active_profile_slot(),
            );
            (rendered.text, rendered.unresolved_slots)
        };

        let buttons = template
            .buttons
            .iter()
            .map(|button| ButtonPreview {
                text: button.text.clone(),
                dynamic: is_dynamic(button),
                ready: button_readiness(button, &config.url_button_params),
            })
            .collect();

        let header = template.header_kind.is_media().then(|| HeaderPreview {
            kind: template.header_kind,
            url_valid: is_valid_https_url(&config.header_media_url),
        });

        Preview {
            text,
            unresolved_slots,
            buttons,
            header,
        }
    }

    fn empty_preview(&self) -> Preview {
        Preview {
            text: self.empty_text.clone(),
            unresolved_slots: Vec::new(),
            buttons: Vec::new(),
            header: None,
        }
    }
}

/// Returns true when a positional slot number can ever hold a value
#[must_use]
pub const fn is_fillable_slot(slot: usize) -> bool {
    slot >= 1 && slot != usize::MAX
}

/// Render a body with the default contact-name text.
#[must_use]
pub fn render_body(body: &str, params: &[String], profile_slot: Option<usize>) -> String {
    PreviewRenderer::default()
        .render_body(body, params, profile_slot)
        .text
}
