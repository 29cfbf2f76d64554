//! Agentwatch - fun.virtuals.io agent token monitor
//!
//! Polls the listing page, rates agent tokens, and reports changes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use agentwatch::adapters::cli::{CliApp, Command, RateCmd, RunCmd, ScanCmd};
use agentwatch::adapters::update_log::UpdateLog;
use agentwatch::adapters::virtuals::{FetchConfig, VirtualsClient, VirtualsParser};
use agentwatch::adapters::OpenAiClient;
use agentwatch::application::{MonitorOrchestrator, TokenAnalyst};
use agentwatch::config::{load_config, Config};
use agentwatch::domain::{classify, display_glyph, parse_age_minutes, parse_market_cap, summarize};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Scan(cmd) => scan_command(cmd).await,
        Command::Rate(cmd) => rate_command(cmd),
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).init();
}

fn fetch_config(config: &Config) -> FetchConfig {
    FetchConfig {
        url: config.source.url.clone(),
        timeout: Duration::from_secs(config.source.timeout_secs),
        settle_attempts: config.source.settle_attempts,
        settle_delay: Duration::from_secs(config.source.settle_delay_secs),
    }
}

fn build_analyst(config: &Config) -> Result<Option<TokenAnalyst>> {
    if !config.narrative.enabled {
        return Ok(None);
    }

    let api_key = config.narrative.get_api_key().context(
        "Narrative generation is enabled but no API key was found. \
         Set OPENAI_API_KEY or narrative.api_key in config.toml",
    )?;

    let client = OpenAiClient::new(api_key)
        .context("Failed to create OpenAI client")?
        .with_model(config.narrative.model.clone())
        .with_max_tokens(config.narrative.max_tokens)
        .with_temperature(config.narrative.temperature);

    Ok(Some(
        TokenAnalyst::new(Arc::new(client)).with_max_attempts(config.narrative.max_attempts),
    ))
}

async fn run_command(cmd: RunCmd) -> Result<()> {
    tracing::info!("Starting agentwatch monitor...");

    let config = load_config(&cmd.config).context("Failed to load configuration")?;

    let client =
        VirtualsClient::new(fetch_config(&config)).context("Failed to create page client")?;
    let update_log = UpdateLog::new(config.logging.update_log_path());

    let mut orchestrator = MonitorOrchestrator::new(
        Arc::new(client),
        Arc::new(VirtualsParser::new()),
        update_log,
    )
    .with_poll_interval(Duration::from_secs(config.monitor.poll_interval_secs))
    .with_retry_delay(Duration::from_secs(config.monitor.retry_delay_secs))
    .with_recent_limit(config.monitor.recent_limit);

    if let Some(analyst) = build_analyst(&config)? {
        orchestrator = orchestrator.with_analyst(analyst);
    } else {
        tracing::info!("AI narratives disabled, new tokens are logged without analysis");
    }

    // Setup Ctrl+C handler
    let orch = orchestrator.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        orch.stop().await;
    });

    orchestrator.run().await?;
    tracing::info!("Agentwatch stopped");
    Ok(())
}

async fn scan_command(cmd: ScanCmd) -> Result<()> {
    use agentwatch::ports::extractor::SnapshotExtractor;
    use agentwatch::ports::page_source::PageSource;

    let config = load_config(&cmd.config).context("Failed to load configuration")?;

    let client =
        VirtualsClient::new(fetch_config(&config)).context("Failed to create page client")?;

    let html = client
        .fetch_settled()
        .await
        .context("Failed to fetch listing page")?;

    let snapshot = VirtualsParser::new().extract(&html);
    anyhow::ensure!(!snapshot.is_empty(), "No agent cards found on the page");

    println!("{}", summarize(&snapshot, config.monitor.recent_limit).render());
    Ok(())
}

fn rate_command(cmd: RateCmd) -> Result<()> {
    let cap = parse_market_cap(&cmd.market_cap);
    let age = parse_age_minutes(&cmd.age);
    let rating = classify(cap, age);

    println!("Market cap: {} (${:.0})", cmd.market_cap, cap);
    println!("Age: {} ({} minutes)", cmd.age, age);
    println!("Rating: {} {:?}", display_glyph(cap, age), rating);
    Ok(())
}
