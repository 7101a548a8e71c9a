mod commands;
mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdmatrix::report::default_export_dir;
use cmdmatrix::{
    BuiltinCatalogue, Catalogue, CatalogueSource, FileCatalogue, HostProvider, Osc52Clipboard,
    PlainTextExporter,
};
use cmdmatrix_tui::Services;
use cmdmatrix_tui::app::App;
use cmdmatrix_tui::config::EngineConfig;
use cmdmatrix_tui::theme::Theme;

use crate::config::{AppConfig, Loaded};
use crate::logging::Sink;

#[derive(Parser)]
#[command(name = "cmdmatrix")]
#[command(about = "Browse a command catalogue or watch system metrics in the terminal")]
struct Cli {
    /// Theme preset (neon, matrix, mono)
    #[arg(long, global = true)]
    theme: Option<String>,
    /// TOML catalogue to use instead of the built-in one
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,
    /// Directory reports are exported to
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the command catalogue (default)
    Catalogue,
    /// Live system metrics dashboard
    Metrics,
    /// Print the catalogue
    List {
        /// Only this group
        #[arg(long)]
        group: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search the catalogue by id, description or tag
    Search {
        /// Search query
        query: String,
        /// Only this group
        #[arg(long)]
        group: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Collect one snapshot and write a plain-text report
    Report {
        /// Report file (defaults to a timestamped file in the export dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    fn is_interactive(&self) -> bool {
        matches!(self, Self::Catalogue | Self::Metrics)
    }
}

/// Effective settings after CLI flags override the config file.
struct Settings {
    config: AppConfig,
    theme: Theme,
    catalogue: Option<PathBuf>,
    export_dir: PathBuf,
}

fn settings(cli: &Cli, config: AppConfig) -> Settings {
    let theme_name = cli.theme.as_deref().or(config.theme.as_deref());
    let theme = match theme_name {
        Some(name) => Theme::by_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using default");
            Theme::default()
        }),
        None => Theme::default(),
    };
    let catalogue = cli.catalogue.clone().or_else(|| config.catalogue.clone());
    let export_dir = cli
        .export_dir
        .clone()
        .or_else(|| config.export_dir.clone())
        .unwrap_or_else(default_export_dir);

    Settings {
        config,
        theme,
        catalogue,
        export_dir,
    }
}

async fn load_catalogue(path: Option<&Path>) -> Result<Catalogue> {
    let source: Box<dyn CatalogueSource> = match path {
        Some(path) => Box::new(FileCatalogue::new(path)),
        None => Box::new(BuiltinCatalogue),
    };
    let catalogue = source
        .load()
        .await
        .with_context(|| format!("failed to load catalogue from {}", source.label()))?;
    tracing::info!(
        source = source.label(),
        groups = catalogue.groups.len(),
        records = catalogue.total_records(),
        "catalogue loaded"
    );
    Ok(catalogue)
}

fn services(export_dir: PathBuf) -> Services {
    Services {
        provider: Arc::new(HostProvider::new()),
        clipboard: Arc::new(Osc52Clipboard),
        exporter: Arc::new(PlainTextExporter),
        export_dir,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Catalogue);

    let loaded = config::load_config();
    let level = match &loaded {
        Loaded::Found(config) => config.log_level().to_owned(),
        Loaded::Missing | Loaded::Invalid { .. } => "info".to_owned(),
    };
    let sink = if command.is_interactive() {
        Sink::File
    } else {
        Sink::Stderr
    };
    logging::init(&level, sink);

    if let Loaded::Invalid { path, reason } = &loaded {
        tracing::warn!(path = %path.display(), %reason, "failed to read config, using defaults");
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }
    let settings = settings(&cli, loaded.into_config());

    match command {
        Command::Catalogue => {
            let catalogue = load_catalogue(settings.catalogue.as_deref()).await?;
            let engine = settings.config.catalogue_view.apply(EngineConfig::catalogue());
            let app = App::new(catalogue, engine).with_theme(settings.theme);
            cmdmatrix_tui::run(app, services(settings.export_dir)).await
        }
        Command::Metrics => {
            let engine = settings.config.metrics_view.apply(EngineConfig::metrics());
            let app = App::metrics(engine).with_theme(settings.theme);
            cmdmatrix_tui::run(app, services(settings.export_dir)).await
        }
        Command::List { group, json } => {
            let catalogue = load_catalogue(settings.catalogue.as_deref()).await?;
            commands::list::run(&catalogue, group.as_deref(), json)
        }
        Command::Search { query, group, json } => {
            let catalogue = load_catalogue(settings.catalogue.as_deref()).await?;
            commands::search::run(&catalogue, &query, group.as_deref(), json)
        }
        Command::Report { output } => {
            let destination = commands::report::destination(output, &settings.export_dir);
            let provider = HostProvider::new();
            tokio::task::spawn_blocking(move || {
                commands::report::run(&provider, &PlainTextExporter, &destination)
            })
            .await
            .context("report task failed")?
        }
    }
}
