use anyhow::{Context, Result};
use casescraper::{cli::Args, pipeline};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Args::parse().into_config();
    info!(
        output = %cfg.output.display(),
        mode = ?cfg.mode,
        regions = ?cfg.regions,
        authenticated = cfg.github_token.is_some(),
        "startup"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = pipeline::run(&cfg)
        .await
        .with_context(|| format!("scraping into {}", cfg.output.display()))?;

    info!(
        files = summary.files,
        rows = summary.rows,
        warnings = summary.warnings,
        "completed"
    );
    Ok(())
}
