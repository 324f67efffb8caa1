//! Wiring & DI. Entry point: parse arguments, bootstrap adapters, inject into the service.
//! No business logic here; the batch is run by FileProcessorService.

use anyhow::Context;
use chat_moderator::adapters::enrichment::{
    EnrichmentCache, HashScorer, LatencyProfile, ReverseTranslator,
};
use chat_moderator::adapters::persistence::{CsvRecordSource, CsvReportSink, PathSandbox};
use chat_moderator::domain::DomainError;
use chat_moderator::ports::{RecordSourcePort, ReportSinkPort, ScorerPort, TranslatorPort};
use chat_moderator::shared::{AppConfig, RunExit};
use chat_moderator::usecases::FileProcessorService;
use clap::Parser;
use clap::error::ErrorKind;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: chat-moderator <input-csv-path> <output-csv-path>";

/// Translate and score every message of a CSV batch, then write per-user averages.
#[derive(Parser, Debug)]
#[command(name = "chat-moderator", version, about)]
struct Cli {
    /// Input CSV (`user_id,message`), inside the configured base directory
    input: String,
    /// Output CSV (`user_id,total_messages,avg_score`), inside the configured base directory
    output: String,
}

#[tokio::main]
async fn main() -> RunExit {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return RunExit::Success;
        }
        Err(e) => {
            let err = DomainError::Usage(e.to_string().trim_end().to_string());
            error!(error = %err, "{}", USAGE);
            eprintln!("{}", USAGE);
            return RunExit::from(&err);
        }
    };

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, falling back to defaults");
        AppConfig::default()
    });

    let service = match build_service(&cfg) {
        Ok(service) => service,
        Err(e) => {
            error!(error = %format!("{:#}", e), "startup failed");
            return RunExit::Failure;
        }
    };

    info!(input = %cli.input, output = %cli.output, "starting moderation batch");

    let started = std::time::Instant::now();
    match service.process_file(&cli.input, &cli.output).await {
        Ok(summary) => {
            info!(
                elapsed_ms = summary.elapsed.as_millis(),
                records = summary.records,
                users = summary.users,
                failures = summary.failures,
                output = %summary.output.display(),
                "batch finished in {} ms",
                summary.elapsed.as_millis()
            );
            RunExit::Success
        }
        Err(e) => {
            let exit = RunExit::from(&e);
            error!(
                stage = e.stage(),
                error = %e,
                input = %cli.input,
                output = %cli.output,
                elapsed_ms = started.elapsed().as_millis(),
                exit_code = exit.code(),
                "{} failed",
                e.stage()
            );
            eprintln!("{} failed: {}", e.stage(), e);
            exit
        }
    }
}

/// One service per run: the enrichment cache is created here and dropped with it.
fn build_service(cfg: &AppConfig) -> anyhow::Result<FileProcessorService> {
    let base_dir = cfg.base_dir_or_default();
    let sandbox = PathSandbox::new(&base_dir)
        .with_context(|| format!("resolve sandbox base directory {}", base_dir))?;
    info!(path = %sandbox.base().display(), "sandbox base directory");

    let (min_ms, max_ms) = cfg.latency_bounds_ms();
    let latency = LatencyProfile::new(min_ms, max_ms);
    let deadline = cfg.timeout_or_default();
    info!(
        latency_min_ms = min_ms,
        latency_max_ms = max_ms,
        deadline_secs = deadline.as_secs(),
        "enrichment settings"
    );

    let cache = Arc::new(EnrichmentCache::new());
    let translator: Arc<dyn TranslatorPort> =
        Arc::new(ReverseTranslator::new(Arc::clone(&cache), latency));
    let scorer: Arc<dyn ScorerPort> = Arc::new(HashScorer::new(cache, latency));
    let source: Arc<dyn RecordSourcePort> = Arc::new(CsvRecordSource::new());
    let sink: Arc<dyn ReportSinkPort> = Arc::new(CsvReportSink::new());

    Ok(FileProcessorService::new(
        source, sink, translator, scorer, sandbox, deadline,
    ))
}
