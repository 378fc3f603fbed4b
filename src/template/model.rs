//! Message-template data model
//!
//! Templates are read-only snapshots fetched by the host. Every field is
//! optional on the wire so a partially populated template still loads, and a
//! field that is `null` or of the wrong type reads as its default instead of
//! failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of media (if any) shown in the template header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum HeaderKind {
    /// Text-only or no header
    #[default]
    None,
    /// Image header
    Image,
    /// Video header
    Video,
    /// Document header
    Document,
}

impl HeaderKind {
    /// Returns true when the header needs a media URL
    #[must_use]
    pub const fn is_media(self) -> bool {
        matches!(self, Self::Image | Self::Video | Self::Document)
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

impl From<String> for HeaderKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            "document" => Self::Document,
            _ => Self::None,
        }
    }
}

impl<'de> Deserialize<'de> for HeaderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self::from(s)),
            _ => Ok(Self::None),
        }
    }
}

impl From<HeaderKind> for String {
    fn from(kind: HeaderKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A template button
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    /// Button type as sent by the template system (e.g. "URL", "QUICK_REPLY")
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    /// Secondary type marker, `url` for URL buttons on some payloads
    #[serde(deserialize_with = "lenient_string")]
    pub sub_type: String,
    /// Label shown on the button
    #[serde(deserialize_with = "lenient_string")]
    pub text: String,
    /// Position among URL-capable buttons, expected in `0..=2`
    #[serde(deserialize_with = "lenient_index")]
    pub index: Option<i64>,
    /// Target URL or payload; may itself carry a `{{...}}` token
    #[serde(deserialize_with = "lenient_string")]
    pub parameter_value: String,
}

/// A WhatsApp message template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    /// Template name, unique per business and language
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Language code (e.g. "en_US")
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    /// Body text with placeholder tokens
    #[serde(deserialize_with = "lenient_string")]
    pub body: String,
    /// Header media kind
    pub header_kind: HeaderKind,
    /// Buttons in template order; entries that are not objects are dropped
    #[serde(deserialize_with = "lenient_vec")]
    pub buttons: Vec<Button>,
}

/// A string field; anything but a JSON string reads as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// An integer index; anything but a JSON integer reads as `None`.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64())
}

/// A list whose unreadable entries are skipped; a non-array reads as empty.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_template() {
        let json = r#"{
            "name": "order_update",
            "language": "en_US",
            "body": "Hi {{1}}",
            "headerKind": "IMAGE",
            "buttons": [
                {"type": "URL", "subType": "", "text": "Track", "index": 0, "parameterValue": "https://a.com/{{1}}"}
            ]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();

        assert_eq!(template.name, "order_update");
        assert_eq!(template.header_kind, HeaderKind::Image);
        assert_eq!(template.buttons.len(), 1);
        assert_eq!(template.buttons[0].kind, "URL");
        assert_eq!(template.buttons[0].index, Some(0));
    }

    #[test]
    fn test_missing_fields_default() {
        let template: Template = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(template.body, "");
        assert_eq!(template.header_kind, HeaderKind::None);
        assert!(template.buttons.is_empty());

        let button: Button = serde_json::from_str(r#"{"text": "Go"}"#).unwrap();
        assert_eq!(button.index, None);
        assert_eq!(button.kind, "");
    }

    #[test]
    fn test_unknown_header_kind_degrades_to_none() {
        let template: Template = serde_json::from_str(r#"{"headerKind": "location"}"#).unwrap();
        assert_eq!(template.header_kind, HeaderKind::None);
    }

    #[test]
    fn test_null_fields_degrade_to_defaults() {
        let json = r#"{
            "name": "order_update",
            "language": null,
            "body": "Hi {{1}}",
            "headerKind": null,
            "buttons": [
                {"type": "URL", "subType": null, "text": null, "index": null, "parameterValue": null}
            ]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();

        assert_eq!(template.language, "");
        assert_eq!(template.header_kind, HeaderKind::None);
        assert_eq!(
            template.buttons,
            vec![Button {
                kind: "URL".to_string(),
                ..Button::default()
            }]
        );
    }

    #[test]
    fn test_wrong_typed_fields_degrade_to_defaults() {
        let json = r#"{
            "name": 7,
            "body": ["not", "text"],
            "headerKind": 3,
            "buttons": [
                {"type": "URL", "subType": 1, "index": "1", "parameterValue": "https://a.com/{{1}}"},
                {"type": "URL", "index": 1.5},
                "QUICK_REPLY",
                null
            ]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();

        assert_eq!(template.name, "");
        assert_eq!(template.body, "");
        assert_eq!(template.header_kind, HeaderKind::None);
        assert_eq!(template.buttons.len(), 2);
        assert_eq!(template.buttons[0].sub_type, "");
        assert_eq!(template.buttons[0].index, None);
        assert_eq!(template.buttons[0].parameter_value, "https://a.com/{{1}}");
        assert_eq!(template.buttons[1].index, None);
    }

    #[test]
    fn test_buttons_not_an_array_reads_empty() {
        let template: Template =
            serde_json::from_str(r#"{"body": "Hi", "buttons": {"type": "URL"}}"#).unwrap();
        assert!(template.buttons.is_empty());

        let template: Template = serde_json::from_str(r#"{"buttons": null}"#).unwrap();
        assert!(template.buttons.is_empty());
    }

    #[test]
    fn test_header_kind_is_media() {
        assert!(!HeaderKind::None.is_media());
        assert!(HeaderKind::Image.is_media());
        assert!(HeaderKind::Video.is_media());
        assert!(HeaderKind::Document.is_media());
    }

    #[test]
    fn test_header_kind_serializes_lowercase() {
        let json = serde_json::to_string(&HeaderKind::Document).unwrap();
        assert_eq!(json, "\"document\"");
    }
}
