//! tmplbind - Template-variable binding and preview engine
//!
//! CLI entry point: preview, check and save auto-reply template nodes.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use tmplbind::catalog::TemplateCatalog;
use tmplbind::cli::{render_diagnostic_report, PreviewDisplay};
use tmplbind::config::Settings;
use tmplbind::doctor::diagnose;
use tmplbind::log::{SessionLogger, SessionOutcome, SessionRecord};
use tmplbind::node::session::EditorSession;
use tmplbind::template::model::Template;

/// Template-variable binding and preview engine
///
/// Binds values to a WhatsApp template's placeholders for one auto-reply
/// node and shows exactly what the recipient would see.
#[derive(Parser, Debug)]
#[command(name = "tmplbind", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the live preview of a node
    Preview(NodeArgs),
    /// Report unresolved slots, unready buttons and bad header URLs
    Check(NodeArgs),
    /// Apply edits to a node and write the resulting config
    Save(SaveArgs),
}

/// Inputs shared by every subcommand
#[derive(Args, Debug)]
struct NodeArgs {
    /// Template catalog: a JSON file or a directory of JSON files
    #[arg(long)]
    catalog: PathBuf,

    /// Business whose templates are looked up
    #[arg(long)]
    business: String,

    /// Template name; omit for a node with no template selected
    #[arg(long)]
    template: Option<String>,

    /// Previously saved node config (JSON)
    #[arg(long)]
    node: Option<PathBuf>,

    /// Path to tmplbind.toml (defaults apply when ./tmplbind.toml is absent)
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SaveArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Identifier of the node being edited
    #[arg(long, default_value = "node")]
    node_id: String,

    /// Set a body slot, e.g. `--set 2=#42` (repeatable)
    #[arg(long = "set", value_parser = parse_assignment)]
    set: Vec<(usize, String)>,

    /// Set a URL button parameter by button index, e.g. `--button 0=A-1`
    #[arg(long = "button", value_parser = parse_assignment)]
    button: Vec<(usize, String)>,

    /// Fill this 1-based slot with the contact's name
    #[arg(long, conflicts_with = "no_profile")]
    profile_slot: Option<usize>,

    /// Turn off the contact-name binding
    #[arg(long)]
    no_profile: bool,

    /// Header media URL
    #[arg(long)]
    header_url: Option<String>,

    /// Write the saved config here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Show the result but discard the edits
    #[arg(long)]
    dry_run: bool,
}

/// Everything needed to open an editing session
struct LoadedNode {
    settings: Settings,
    template: Option<Template>,
    saved: Option<Value>,
}

/// Parse `N=value` into a number and a value. The value may be empty.
fn parse_assignment(raw: &str) -> Result<(usize, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected N=value, got '{raw}'"))?;
    let key = key
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a non-negative number", key.trim()))?;
    Ok((key, value.to_string()))
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("Failed to load settings from '{}'", path.display())),
        None => Settings::from_path_or_default("tmplbind.toml"),
    }
}

fn read_saved_node(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read node config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse node config: {}", path.display()))
}

async fn load_node(args: &NodeArgs) -> Result<LoadedNode> {
    let settings = load_settings(args.settings.as_deref())?;
    let catalog = TemplateCatalog::load(&args.catalog)
        .await
        .with_context(|| format!("Failed to load catalog from '{}'", args.catalog.display()))?;

    let template = args.template.as_deref().and_then(|name| {
        let found = catalog.lookup(&args.business, name).cloned();
        if found.is_none() {
            eprintln!(
                "Template '{name}' not found for business '{}'; treating the node as having no template. Available: {}",
                args.business,
                available_template_names(&catalog, &args.business)
            );
        }
        found
    });

    let saved = args.node.as_deref().map(read_saved_node).transpose()?;

    Ok(LoadedNode {
        settings,
        template,
        saved,
    })
}

/// Format available template names for messages.
fn available_template_names(catalog: &TemplateCatalog, business_id: &str) -> String {
    let names = catalog.template_names(business_id);
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Apply command-line edits to a session, warning about ignored ones.
fn apply_edits(session: &mut EditorSession, args: &SaveArgs) {
    for (slot, value) in &args.set {
        if !session.set_body_param(*slot, value) {
            eprintln!(
                "Ignoring --set {slot}: template has {} slot(s)",
                session.placeholder_count()
            );
        }
    }

    for (index, value) in &args.button {
        if !session.set_url_button_param(*index, value) {
            eprintln!("Ignoring --button {index}: button index must be 0, 1 or 2");
        }
    }

    if args.no_profile {
        session.set_use_profile_name(false);
    } else if let Some(slot) = args.profile_slot {
        session.set_use_profile_name(true);
        session.set_profile_name_slot(slot);
        if !session.config().use_profile_name {
            eprintln!("Ignoring --profile-slot: template has no placeholders");
        }
    }

    if let Some(url) = &args.header_url {
        session.set_header_media_url(url);
    }
}

/// Build the log record for a closed session.
fn build_record(
    session: &EditorSession,
    business_id: &str,
    outcome: SessionOutcome,
    unresolved_slots: Vec<usize>,
) -> SessionRecord {
    SessionRecord {
        node_id: session.node_id().to_string(),
        business_id: business_id.to_string(),
        template: session.template().map(|t| t.name.clone()),
        timestamp: chrono::Utc::now(),
        outcome,
        placeholder_count: session.placeholder_count(),
        unresolved_slots,
        config: (outcome == SessionOutcome::Saved).then(|| session.config().clone()),
    }
}

fn run_preview(loaded: LoadedNode) {
    let renderer = loaded.settings.renderer();
    let session = EditorSession::open("preview", loaded.saved.as_ref(), loaded.template);
    let display = PreviewDisplay::new(session.template().map(|t| t.name.as_str()));
    display.print_preview(&session.preview(&renderer));
}

fn run_check(loaded: LoadedNode) -> bool {
    let session = EditorSession::open("check", loaded.saved.as_ref(), loaded.template);
    let report = diagnose(session.template(), session.config());
    eprintln!("{}", render_diagnostic_report(&report));
    report.error_count() == 0
}

fn run_save(loaded: LoadedNode, args: &SaveArgs) -> Result<()> {
    let renderer = loaded.settings.renderer();
    let logger =
        SessionLogger::new(&loaded.settings.log.dir).context("Failed to initialize session log")?;

    let mut session = EditorSession::open(&args.node_id, loaded.saved.as_ref(), loaded.template);
    apply_edits(&mut session, args);

    let preview = session.preview(&renderer);
    PreviewDisplay::new(session.template().map(|t| t.name.as_str())).print_preview(&preview);

    if args.dry_run {
        let record = build_record(
            &session,
            &args.node.business,
            SessionOutcome::Cancelled,
            preview.unresolved_slots,
        );
        logger
            .append(&record)
            .context("Failed to write to session log")?;
        session.cancel();
        eprintln!("Dry run: edits discarded.");
        return Ok(());
    }

    let record = build_record(
        &session,
        &args.node.business,
        SessionOutcome::Saved,
        preview.unresolved_slots,
    );
    let config = session.save();
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize node config")?;
    match &args.out {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write node config: {}", path.display()))?,
        None => println!("{json}"),
    }

    // Only record a save once the config has actually been written
    logger
        .append(&record)
        .context("Failed to write to session log")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Preview(args) => run_preview(load_node(&args).await?),
        Command::Check(args) => {
            if !run_check(load_node(&args).await?) {
                std::process::exit(1);
            }
        }
        Command::Save(args) => run_save(load_node(&args.node).await?, &args)?,
    }

    Ok(())
}
