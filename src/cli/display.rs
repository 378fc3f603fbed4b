//! Terminal display for previews and diagnostic reports
//!
//! The rendered body goes to stdout so it can be piped; everything else
//! goes to stderr.

use colored::Colorize;

use crate::doctor::{DiagnosticReport, Severity};
use crate::template::render::{ButtonPreview, HeaderPreview, Preview};

/// Display handler for one node's preview
pub struct PreviewDisplay {
    template_name: String,
}

impl PreviewDisplay {
    /// Create a display handler for the given template (None when unselected)
    #[must_use]
    pub fn new(template_name: Option<&str>) -> Self {
        Self {
            template_name: template_name.unwrap_or("(none)").to_string(),
        }
    }

    /// Print the preview header
    pub fn print_header(&self) {
        eprintln!(
            "\n{} {}",
            "===".bold().cyan(),
            format!("Template: {}", self.template_name).bold().cyan()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Print a full preview: body on stdout, status lines on stderr
    pub fn print_preview(&self, preview: &Preview) {
        self.print_header();
        println!("{}", preview.text);

        if let Some(header) = &preview.header {
            eprintln!("  {}", render_header_line(header));
        }
        for button in &preview.buttons {
            eprintln!("  {}", render_button_line(button));
        }
        if !preview.unresolved_slots.is_empty() {
            let slots: Vec<String> = preview
                .unresolved_slots
                .iter()
                .map(ToString::to_string)
                .collect();
            eprintln!(
                "  {} unresolved slot(s): {}",
                "⚠".yellow().bold(),
                slots.join(", ")
            );
        }

        eprintln!("{}", "─".repeat(50).dimmed());
        let status = if preview.is_complete() {
            "READY".green().bold().to_string()
        } else {
            "INCOMPLETE".yellow().bold().to_string()
        };
        eprintln!("  {status} {}", self.template_name.bold());
        eprintln!();
    }
}

/// One status line for a template button
#[must_use]
pub fn render_button_line(button: &ButtonPreview) -> String {
    let marker = if button.ready {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    let kind = if button.dynamic { "dynamic" } else { "static" };
    format!("{marker} [{}] {}", button.text, kind.dimmed())
}

/// One status line for the media header
#[must_use]
pub fn render_header_line(header: &HeaderPreview) -> String {
    let marker = if header.url_valid {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    let detail = if header.url_valid {
        "media URL ok"
    } else {
        "media URL must be an https URL"
    };
    format!("{marker} {} header: {detail}", header.kind.as_str())
}

/// Render a diagnostic report as multi-line text
#[must_use]
pub fn render_diagnostic_report(report: &DiagnosticReport) -> String {
    if report.is_clean() {
        return format!("{} No issues found", "✓".green().bold());
    }

    let mut lines = Vec::with_capacity(report.findings.len() * 2 + 1);
    for finding in &report.findings {
        let label = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        lines.push(format!("{label} {}: {}", finding.code.bold(), finding.message));
        if let Some(suggestion) = &finding.suggestion {
            lines.push(format!("  {} {suggestion}", "→".dimmed()));
        }
    }
    lines.push(format!(
        "{} error(s), {} warning(s), {} info",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    ));

    lines.join("\n")
}
