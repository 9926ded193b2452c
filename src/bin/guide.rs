//! Destination guide CLI
//!
//! # Usage
//!
//! ```bash
//! # List destinations reachable with one stop
//! guide list --filter 1-stop
//!
//! # Detail pane for one destination
//! guide show lisbon --format html
//!
//! # What the map would draw for a destination
//! guide map lisbon
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use destination_guide::{Catalog, ConnectionFilter, GuideConfig, GuideController, MapStatus};
use guide_composer::{popup_html, render_html};
use guide_geo::{PlacedLayer, RecordingSurface};

#[derive(Parser)]
#[command(name = "guide")]
#[command(version = "0.1.0")]
#[command(about = "Browse the destination catalog from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file
    #[arg(long, global = true, env = "DESTINATION_GUIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog JSON, overrides the config
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

/// The detail pane has no plain-text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List destinations
    List {
        /// all, direct or one-stop (defaults to the configured filter)
        #[arg(short, long)]
        filter: Option<ConnectionFilter>,

        #[arg(long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Show the detail document for a destination
    Show {
        id: String,

        #[arg(long, default_value = "html", value_enum)]
        format: ShowFormat,
    },

    /// Print the map calls made when selecting a destination
    Map { id: String },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "destination_guide=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = GuideConfig::load(cli.config.as_deref()).context("loading config")?;
    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());
    let catalog = Catalog::from_file(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    for rejected in catalog.rejected() {
        eprintln!("skipped record #{}: {}", rejected.index, rejected.error);
    }

    let mut controller = GuideController::new(catalog, RecordingSurface::new(config.map.clone()));

    match cli.command {
        Commands::List { filter, format } => {
            cmd_list(&mut controller, filter.unwrap_or(config.default_filter), format)
        }
        Commands::Show { id, format } => cmd_show(&mut controller, &id, format),
        Commands::Map { id } => cmd_map(&mut controller, &id),
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_list(
    controller: &mut GuideController<RecordingSurface>,
    filter: ConnectionFilter,
    format: OutputFormat,
) -> Result<()> {
    controller.apply_filter(filter);
    let entries = controller.list_entries();

    match format {
        OutputFormat::Html => print!("{}", controller.list_html()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            let visible = controller.catalog().filter(filter);
            if visible.is_empty() {
                println!("{}", guide_composer::EMPTY_LIST_MESSAGE);
            }
            for destination in visible {
                let marker = if controller.selected() == Some(destination.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {:<12} {:<16} {:<12} {:<8} {}",
                    destination.id,
                    destination.name,
                    destination.country,
                    destination.connection_type.as_str(),
                    destination.flight_time
                );
            }
        }
    }
    Ok(())
}

fn cmd_show(
    controller: &mut GuideController<RecordingSurface>,
    id: &str,
    format: ShowFormat,
) -> Result<()> {
    let selection = controller.select(id)?;
    match format {
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&selection.document)?),
        ShowFormat::Html => print!("{}", render_html(&selection.document)),
    }
    Ok(())
}

fn cmd_map(controller: &mut GuideController<RecordingSurface>, id: &str) -> Result<()> {
    let selection = controller.select(id)?;

    for command in controller.surface_mut().take_commands() {
        println!("{}", serde_json::to_string(&command)?);
    }

    for (handle, layer) in controller.surface().layers() {
        if let PlacedLayer::Marker { label, .. } = layer {
            println!("{handle} popup {}", popup_html(label));
        }
    }

    match selection.map {
        MapStatus::Updated {
            markers,
            connectors,
        } => eprintln!("{markers} marker(s), {connectors} connector(s)"),
        MapStatus::Failed { error, layers } => {
            eprintln!("map update failed ({}): {error}; {layers} layer(s) kept", error.code())
        }
    }
    Ok(())
}
