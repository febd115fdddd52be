//! # Ambari Check CLI
//!
//! Runs one Ambari check cycle, or validates the check configuration.

use ambari_check::config::ConfigManager;
use ambari_check::logging::init_structured_logging;
use ambari_check::{
    AmbariConfig, AmbariPoller, HttpAmbariClient, JsonLinesSink, LogSink, MetricSink,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ambari-check")]
#[command(about = "Poll an Ambari server and report host, component and service metrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration directory containing ambari-config.yaml (default: ./config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Environment section to apply (default: AMBARI_ENV, APP_ENV or development)
    #[arg(short, long)]
    environment: Option<String>,

    /// Override the Ambari base URL from the configuration
    #[arg(long)]
    url: Option<String>,

    /// Output for collected metrics
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one check cycle
    Run,

    /// Load and validate the configuration, then print it with credentials masked
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per metric on stdout
    Json,
    /// Structured log events on stderr
    Log,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let environment = cli
        .environment
        .clone()
        .unwrap_or_else(ConfigManager::detect_environment);
    let manager = ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &environment)
        .context("Failed to load Ambari check configuration")?;

    let mut config = manager.config().clone();
    apply_url_override(&mut config, cli.url.as_deref())?;
    if let Some(level) = verbosity_level(cli.verbose) {
        config.logging.level = Some(level.to_string());
    }

    init_structured_logging(&config.logging);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Validate => {
            println!("✅ Configuration valid: {}", manager.config_file().display());
            println!("Environment: {}", manager.environment());
            println!("{}", serde_json::to_string_pretty(&effective_config_view(&config))?);
            Ok(())
        }
        Commands::Run => match cli.format {
            OutputFormat::Json => run(config, JsonLinesSink::new(std::io::stdout())).await,
            OutputFormat::Log => run(config, LogSink).await,
        },
    }
}

async fn run<S: MetricSink>(config: AmbariConfig, sink: S) -> anyhow::Result<()> {
    let client = HttpAmbariClient::new(config.timeout_ms)?;
    let poller = AmbariPoller::new(client, sink, config);

    let summary = poller.check().await.context("Ambari check failed")?;

    info!(
        clusters = %summary.clusters.join(","),
        hosts_seen = summary.hosts.hosts_seen,
        hosts_without_metrics = summary.hosts.hosts_without_metrics,
        gauges = summary.gauges_submitted(),
        service_checks = summary.services.service_checks_submitted,
        "✅ Check run finished"
    );
    Ok(())
}

fn apply_url_override(config: &mut AmbariConfig, url: Option<&str>) -> anyhow::Result<()> {
    if let Some(url) = url {
        config.url = url.to_string();
        config.validate().context("Invalid --url override")?;
    }
    Ok(())
}

/// The configuration the command will actually run with, credentials masked
fn effective_config_view(config: &AmbariConfig) -> serde_json::Value {
    ConfigManager::sanitize_config_for_logging(config)
}

fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
