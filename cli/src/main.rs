//! CLI entrypoint for raincloud
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use raincloud_application::BoardOrchestrator;
use raincloud_domain::OutputFormat;
use raincloud_infrastructure::{BoardConfig, ConfigLoader, build_registry};
use raincloud_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the console subscriber, plus a file writer when `log_file` is set.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<BoardConfig> {
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    file_config
        .into_board_config()
        .context("Invalid configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting raincloud");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.color {
        colored::control::set_override(false);
    }
    let format = cli.output.map(OutputFormat::from).unwrap_or(config.output_format);

    // === Dependency Injection ===
    let providers = build_registry(&config.providers);
    if providers.is_empty() {
        warn!("No provider has credentials; set ANTHROPIC_API_KEY, OPENAI_API_KEY, HUGGINGFACE_API_KEY or GOOGLE_API_KEY");
    }

    let cancellation = CancellationToken::new();
    let board = BoardOrchestrator::new(config.members, providers, config.settings)
        .with_cancellation(cancellation.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling discussion");
            cancellation.cancel();
        }
    });

    if cli.list_members {
        print!("{}", ConsoleFormatter::format_members(board.members()));
        return Ok(());
    }

    if cli.check_providers {
        let report = board.check_providers().await;
        print!("{}", ConsoleFormatter::format_provider_health(&report));
        return Ok(());
    }

    let query = match cli.query {
        Some(q) => q,
        None => bail!("Query is required. Run with --help for usage."),
    };

    if cli.direct {
        let response = board
            .get_direct_response(&query, cli.provider.as_deref())
            .await?;
        let output = match format {
            OutputFormat::Json => ConsoleFormatter::format_direct_json(&response),
            OutputFormat::Full | OutputFormat::Brief => ConsoleFormatter::format_direct(&response),
        };
        println!("{}", output);
        return Ok(());
    }

    // Progress bars would interleave with machine-readable output
    let discussion = if cli.quiet || format == OutputFormat::Json {
        board.discuss_query(&query, cli.mode).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        board
            .discuss_query_with_progress(&query, cli.mode, &progress)
            .await?
    } else {
        board
            .discuss_query_with_progress(&query, cli.mode, &SimpleProgress)
            .await?
    };

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&discussion),
        OutputFormat::Brief => ConsoleFormatter::format_brief(&discussion),
        OutputFormat::Json => ConsoleFormatter::format_json(&discussion),
    };

    println!("{}", output);

    Ok(())
}
