use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use finlearn_models::content_request::Query;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "finlearn", about = "Generate trading education content from a query")]
struct Cli {
    /// Path to a TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target audience hint passed to the content strategist
    #[arg(short, long)]
    audience: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// The learning query; read from stdin when omitted
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Pick up GEMINI_API_KEY and RUST_LOG from a local .env, if any
    dotenvy::dotenv().ok();

    // Initialize tracing (respects RUST_LOG env var)
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = finlearn::load_config(cli.config.as_deref())?;
    let text = finlearn::read_query(cli.query, std::io::stdin())?;

    let mut query = Query::new(text);
    if let Some(audience) = cli.audience {
        query = query.with_audience(audience);
    }

    let orchestrator =
        finlearn::build_orchestrator(&config).context("Failed to build orchestrator")?;

    let output = finlearn::generate(&orchestrator, &query)
        .await
        .map_err(|e| anyhow::anyhow!("Content generation failed: {e}"))?;
    info!(slug = %output.main_content.slug, "Content generated");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}
