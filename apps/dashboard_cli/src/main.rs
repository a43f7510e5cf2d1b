use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    load_settings, run_query, HttpScoringClient, QueryController, QueryPhase, ScoringService,
};
use shared::protocol::SearchResponse;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Run one fraud search against the scoring service")]
struct Args {
    /// Free-text query sent to the scoring service.
    #[arg(long, required_unless_present = "check")]
    text: Option<String>,
    #[arg(long)]
    service_url: Option<String>,
    /// Settings file; defaults to ./dashboard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the raw results as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Only probe the service root endpoint.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(service_url) = &args.service_url {
        settings = settings.with_service_url(service_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = HttpScoringClient::from_settings(&settings)?;

    if args.check {
        let banner = client.health().await?;
        println!("{}: {}", client.service_url(), banner.message);
        return Ok(());
    }

    let mut controller = QueryController::new();
    let Some(pending) = controller.submit_query(args.text.as_deref().unwrap_or_default()) else {
        bail!("a search is already in flight");
    };
    controller.apply(run_query(&client, pending).await);

    if controller.phase() == QueryPhase::Error {
        if let Some(notice) = controller.last_failure() {
            bail!("{}: {}", notice.message, notice.detail);
        }
        bail!("search failed");
    }

    if args.json {
        let response = SearchResponse {
            results: controller.results().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Transaction Results");
    println!("{}", render::render_table(controller.view()));
    println!();
    println!("Fraud Severity Summary");
    println!("{}", render::render_chart(&controller.aggregate()));

    Ok(())
}
