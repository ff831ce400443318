use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::time::Duration;

use ignite_node::api::ApiClient;
use ignite_node::cli::{Cli, Commands};
use ignite_node::collectors::bandwidth::{DeltaEngine, format_bytes};
use ignite_node::collectors::platform::{RawSampler, create_platform_sampler, detected_platform};
use ignite_node::config::NodeConfig;
use ignite_node::scheduler::ReportScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = NodeConfig::load(&cli.overrides())?;

    match cli.selected_command() {
        Commands::Run => run_node(config).await,
        Commands::Sample { interval } => sample_once(&config, interval).await,
    }
}

fn print_banner() {
    println!();
    println!("  IGNITE NETWORK NODE v{}", env!("CARGO_PKG_VERSION"));
    println!("  Contribute bandwidth. Earn rewards.\n");
}

async fn run_node(config: NodeConfig) -> Result<()> {
    print_banner();

    let (email, password) = config.credentials()?;
    let mut client = ApiClient::new(&config.api_url, config.request_timeout())?;

    println!("Logging in to Ignite Network...");
    let session = client
        .login(email, password)
        .await
        .context("Failed to authenticate. Please check your credentials.")?;
    println!("Logged in as: {}", session.account.email);
    if let Some(id) = &session.account.id {
        info!("Account id: {}", id);
    }

    println!("\nNode started! Monitoring real network bandwidth...");
    println!("Press Ctrl+C to stop.\n");
    println!("Platform detected: {}", detected_platform());

    let engine = DeltaEngine::new(create_platform_sampler(config.helper_timeout()));
    info!("Sampling interface counters via {}", engine.mechanism());

    let mut scheduler = ReportScheduler::new(engine, client, config.scheduler_config());
    scheduler.run(shutdown_signal()).await;

    println!("Thank you for contributing to the Ignite Network!");
    Ok(())
}

/// Prints the local throughput over one interval without contacting the collector
async fn sample_once(config: &NodeConfig, interval: u64) -> Result<()> {
    let sampler = create_platform_sampler(config.helper_timeout());
    println!("Platform detected: {} ({})", detected_platform(), sampler.mechanism());

    let first = sampler.sample().await.context("Network stats unavailable")?;
    tokio::time::sleep(Duration::from_secs(interval)).await;
    let second = sampler.sample().await.context("Network stats unavailable")?;

    let mut engine = DeltaEngine::new(sampler);
    engine.observe(Ok(first));
    let delta = engine.observe(Ok(second));

    println!("Sampled over {}s:", interval);
    println!("  Download: {}", format_bytes(delta.bytes_in));
    println!("  Upload:   {}", format_bytes(delta.bytes_out));
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => println!("\n\nShutting down Ignite Node..."),
        Err(e) => {
            error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
