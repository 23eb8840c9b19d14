use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use weathereyes::config_path;
use weathereyes::input::{load_batch, resolve_batch};
use weathereyes_adapter_classifier::KeywordClassifier;
use weathereyes_adapter_notification::{AlertDispatcher, NotificationService};
use weathereyes_application::{ContextRegistry, EngineSettings};
use weathereyes_domain::{WeatherEyesConfig, now_millis};

/// Aggregate a batch of weather classifications and dispatch alerts.
#[derive(Parser)]
#[command(name = "weathereyes")]
#[command(version)]
#[command(about = "Aggregate weather classifications and decide when to alert")]
struct Cli {
    /// Config file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of classified or unclassified items
    #[arg(long)]
    input: PathBuf,

    /// Monitored context the batch belongs to
    #[arg(long, default_value = "default")]
    context: String,

    /// Overrides the configured location name
    #[arg(long)]
    location: Option<String>,

    /// Also record a summary alert for this batch
    #[arg(long)]
    summary: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = WeatherEyesConfig::load_from_path(&config_path(cli.config))?;
    let location = cli.location.unwrap_or(config.location);
    let settings = EngineSettings::from_config(&config.alerts)?;
    let registry = ContextRegistry::new(settings);
    let engine = registry.engine(&cli.context);

    let items = load_batch(&cli.input)?;
    let raws = resolve_batch(items, &KeywordClassifier::new()).await;

    let now = now_millis();
    let report = {
        let mut engine = engine.lock().expect("weather engine lock poisoned");
        let report = engine.ingest(&raws, now);
        if cli.summary {
            if let Some(result) = report.aggregate.result() {
                engine.record_summary(result.clone(), now);
            }
        }
        report
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to encode report")?
    );

    let service = NotificationService::new(
        config.notifications.channels,
        Duration::from_secs(config.notifications.timeout_secs),
    )?;
    let dispatcher = AlertDispatcher::new(Arc::new(service), location);
    let flush = dispatcher.flush(&engine).await;
    tracing::info!(?flush, "dispatch complete");

    let stats = engine.lock().expect("weather engine lock poisoned").stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("failed to encode stats")?
    );
    Ok(())
}
