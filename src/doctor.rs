//! Node doctor — advisory checks for a node being edited
//!
//! Inspects a template and a node config and reports what would still show
//! up as unresolved or broken when the message is sent. Findings are split
//! into errors (must fix), warnings (should fix) and info (worth knowing).
//! Nothing here blocks saving.

use crate::node::config::NodeConfig;
use crate::template::buttons::{button_readiness, is_dynamic, is_url_capable};
use crate::template::header::is_valid_https_url;
use crate::template::model::Template;
use crate::template::placeholder::{tokenize, Token};
use crate::template::render::{is_fillable_slot, PreviewRenderer};

/// Severity level for a diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Must fix — the message cannot go out as configured
    Error,
    /// Should fix — the recipient would see a raw token or a dead button
    Warning,
    /// Informational
    Info,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Short code for the finding (e.g., "T001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

/// Diagnostic report for one node
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// All findings, in order of severity (errors first)
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Returns true if the report has no findings at all
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(&Severity::Error)
    }

    /// Returns the number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(&Severity::Warning)
    }

    /// Returns the number of info items
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(&Severity::Info)
    }

    fn count(&self, severity: &Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| &f.severity == severity)
            .count()
    }
}

/// Run all checks and return a report.
#[must_use]
pub fn diagnose(template: Option<&Template>, config: &NodeConfig) -> DiagnosticReport {
    let mut findings = Vec::new();

    match template {
        None => findings.push(Finding {
            severity: Severity::Error,
            code: "T001".to_string(),
            message: "No template selected".to_string(),
            suggestion: Some("Pick an approved template for this node".to_string()),
        }),
        Some(template) => {
            check_header_media(template, config, &mut findings);
            check_body_slots(template, config, &mut findings);
            check_unusable_tokens(template, &mut findings);
            check_dynamic_buttons(template, config, &mut findings);
            check_ignored_buttons(template, &mut findings);
            check_profile_binding(config, &mut findings);
        }
    }

    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

/// T002: Media headers need an https URL
fn check_header_media(template: &Template, config: &NodeConfig, findings: &mut Vec<Finding>) {
    if !template.header_kind.is_media() || is_valid_https_url(&config.header_media_url) {
        return;
    }

    let kind = template.header_kind.as_str();
    let message = if config.header_media_url.trim().is_empty() {
        format!("Template '{}' has a {kind} header but no media URL", template.name)
    } else {
        format!(
            "Header media URL '{}' is not a valid https URL",
            config.header_media_url.trim()
        )
    };

    findings.push(Finding {
        severity: Severity::Error,
        code: "T002".to_string(),
        message,
        suggestion: Some(format!("Provide an absolute https:// URL to the {kind}")),
    });
}

/// T003: Body slots that still render as raw tokens
fn check_body_slots(template: &Template, config: &NodeConfig, findings: &mut Vec<Finding>) {
    let rendered = PreviewRenderer::default().render_body(
        &template.body,
        &config.body_params,
        config.active_profile_slot(),
    );

    for slot in rendered.unresolved_slots {
        findings.push(Finding {
            severity: Severity::Warning,
            code: "T003".to_string(),
            message: format!("Body slot {slot} has no value"),
            suggestion: Some(format!(
                "Enter a value for slot {slot} or bind it to the contact name"
            )),
        });
    }
}

/// T007: Positional tokens no value can fill, such as `{{0}}`
fn check_unusable_tokens(template: &Template, findings: &mut Vec<Finding>) {
    let mut seen = Vec::new();
    for token in tokenize(&template.body) {
        if let Token::Positional { slot, raw } = token {
            if !is_fillable_slot(slot) && !seen.contains(&raw) {
                seen.push(raw);
                findings.push(Finding {
                    severity: Severity::Warning,
                    code: "T007".to_string(),
                    message: format!("Token '{raw}' does not name a usable slot"),
                    suggestion: Some("Slots are numbered from 1".to_string()),
                });
            }
        }
    }
}

/// T004: Dynamic buttons without a URL parameter
fn check_dynamic_buttons(template: &Template, config: &NodeConfig, findings: &mut Vec<Finding>) {
    for button in template.buttons.iter().filter(|b| is_dynamic(b)) {
        if !button_readiness(button, &config.url_button_params) {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "T004".to_string(),
                message: format!(
                    "Button '{}' links to '{}' but has no URL parameter",
                    button.text, button.parameter_value
                ),
                suggestion: Some(format!(
                    "Fill URL button parameter {}",
                    button.index.unwrap_or_default()
                )),
            });
        }
    }
}

/// T005: URL buttons with a token that fall outside the three-button window
fn check_ignored_buttons(template: &Template, findings: &mut Vec<Finding>) {
    for button in &template.buttons {
        if is_url_capable(button) && button.parameter_value.contains("{{") && !is_dynamic(button)
        {
            let index = button
                .index
                .map_or_else(|| "none".to_string(), |i| i.to_string());
            findings.push(Finding {
                severity: Severity::Info,
                code: "T005".to_string(),
                message: format!(
                    "Button '{}' has index {index}, outside 0..=2; its URL parameter is ignored",
                    button.text
                ),
                suggestion: None,
            });
        }
    }
}

/// T006: The contact-name slot has no fallback value
fn check_profile_binding(config: &NodeConfig, findings: &mut Vec<Finding>) {
    if let Some(slot) = config.active_profile_slot() {
        findings.push(Finding {
            severity: Severity::Info,
            code: "T006".to_string(),
            message: format!("Slot {slot} is filled with the contact's name"),
            suggestion: Some(
                "Contacts without a profile name get no fallback value".to_string(),
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::config::reconcile;
    use crate::template::model::HeaderKind;
    use crate::testutil::{params, quick_reply_button, template_with, url_button};

    fn codes(report: &DiagnosticReport) -> Vec<&str> {
        report.findings.iter().map(|f| f.code.as_str()).collect()
    }

    #[test]
    fn test_clean_report_when_everything_filled() {
        let template = template_with(
            "Hi {{1}}",
            vec![url_button(0, "https://a.com/{{1}}"), quick_reply_button(1)],
        );
        let config = NodeConfig {
            body_params: params(&["Sam"]),
            url_button_params: ["A-1", "", ""].map(String::from),
            ..NodeConfig::default()
        };
        let report = diagnose(Some(&template), &config);
        assert!(report.is_clean(), "Findings: {:?}", report.findings);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_missing_template_is_error() {
        let report = diagnose(None, &NodeConfig::default());
        assert_eq!(codes(&report), vec!["T001"]);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_unresolved_slots_reported() {
        let template = template_with("Hi {{1}}, order {{2}} ships {{3}}", vec![]);
        let config = reconcile(
            NodeConfig {
                body_params: params(&["Sam", "", ""]),
                ..NodeConfig::default()
            },
            Some(&template),
        );
        let report = diagnose(Some(&template), &config);
        assert_eq!(codes(&report), vec!["T003", "T003"]);
        assert!(report.findings[0].message.contains("slot 2"));
        assert!(report.findings[1].message.contains("slot 3"));
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_unusable_tokens_reported_once_each() {
        let template = template_with(
            "Hi {{1}} {{0}} {{0}} {{99999999999999999999999}}",
            vec![],
        );
        let config = NodeConfig {
            body_params: params(&["Sam"]),
            ..NodeConfig::default()
        };
        let report = diagnose(Some(&template), &config);
        assert_eq!(codes(&report), vec!["T007", "T007"]);
        assert!(report.findings[0].message.contains("'{{0}}'"));
        assert!(report.findings[1].message.contains("99999999999999999999999"));
        assert!(report
            .findings
            .iter()
            .all(|f| !f.message.contains("18446744073709551615")));
    }

    #[test]
    fn test_profile_slot_not_reported_as_unresolved() {
        let template = template_with("Hi {{1}}", vec![]);
        let config = NodeConfig {
            body_params: params(&[""]),
            use_profile_name: true,
            profile_name_slot: 1,
            ..NodeConfig::default()
        };
        let report = diagnose(Some(&template), &config);
        assert_eq!(codes(&report), vec!["T006"]);
        assert_eq!(report.info_count(), 1);
    }

    #[test]
    fn test_header_without_url() {
        let mut template = template_with("Hello", vec![]);
        template.header_kind = HeaderKind::Document;
        let report = diagnose(Some(&template), &NodeConfig::default());
        assert_eq!(codes(&report), vec!["T002"]);
        assert!(report.findings[0].message.contains("document header"));
    }

    #[test]
    fn test_header_with_http_url() {
        let mut template = template_with("Hello", vec![]);
        template.header_kind = HeaderKind::Image;
        let config = NodeConfig {
            header_media_url: "http://cdn.example.com/a.png".to_string(),
            ..NodeConfig::default()
        };
        let report = diagnose(Some(&template), &config);
        assert_eq!(codes(&report), vec!["T002"]);
        assert!(report.findings[0].message.contains("not a valid https URL"));
    }

    #[test]
    fn test_dynamic_button_without_param() {
        let template = template_with("Hello", vec![url_button(2, "https://a.com/{{1}}")]);
        let report = diagnose(Some(&template), &NodeConfig::default());
        assert_eq!(codes(&report), vec!["T004"]);
        assert_eq!(
            report.findings[0].suggestion.as_deref(),
            Some("Fill URL button parameter 2")
        );
    }

    #[test]
    fn test_out_of_window_button_is_info() {
        let template = template_with("Hello", vec![url_button(4, "https://a.com/{{1}}")]);
        let report = diagnose(Some(&template), &NodeConfig::default());
        assert_eq!(codes(&report), vec!["T005"]);
        assert!(report.findings[0].message.contains("index 4"));
    }

    #[test]
    fn test_findings_sorted_by_severity() {
        let mut template = template_with(
            "Hi {{1}} {{2}}",
            vec![url_button(0, "https://a.com/{{1}}")],
        );
        template.header_kind = HeaderKind::Video;
        let config = NodeConfig {
            body_params: params(&["", ""]),
            use_profile_name: true,
            profile_name_slot: 1,
            ..NodeConfig::default()
        };
        let report = diagnose(Some(&template), &config);
        assert_eq!(codes(&report), vec!["T002", "T003", "T004", "T006"]);
    }
}
