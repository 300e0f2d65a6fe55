//! Vizier console binary.
//!
//! `start` runs the status watch loop until interrupted; `check` fetches the
//! cluster status once, prints the selected view, and exits non-zero when
//! the cluster is not healthy.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use vizier_console::config::ConsoleConfig;
use vizier_console::query::graphql::GraphqlSource;
use vizier_console::query::{ClusterSource, QueryState};
use vizier_console::router::{ClusterHealthRouter, ViewVariant};
use vizier_console::{logging, watch as status_watch};

#[derive(Parser)]
#[command(name = "vizier-console", version, about = "Health console for Vizier clusters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the status watch loop until interrupted.
    Start,
    /// Fetch the cluster status once and print the selected view.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::load().context("failed to load configuration")?;

    match cli.command {
        Command::Start => start(config).await,
        Command::Check => check(config).await,
    }
}

/// Run the watch loop until ctrl-c.
async fn start(config: ConsoleConfig) -> Result<()> {
    let _guard = logging::init_production(&config.console.logs_dir, &config.console.log_level)
        .context("failed to initialise logging")?;
    info!("vizier-console starting");

    let source = build_source(&config)?;
    let deps = status_watch::WatchDeps {
        source,
        interval_secs: config.watch.interval_secs,
    };

    // Keep the receiver alive: the loop stops once every consumer is gone.
    let (state_tx, state_rx) = status_watch::state_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let watch_task = tokio::spawn(status_watch::run_watch(deps, state_tx, shutdown_rx));

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    info!("shutdown signal received");

    let _ = shutdown_tx.send(true);
    watch_task.await.context("watch task panicked")?;
    drop(state_rx);

    info!("vizier-console stopped");
    Ok(())
}

/// Fetch once, print the selected view, and set the exit code.
async fn check(config: ConsoleConfig) -> Result<()> {
    logging::init_cli(&config.console.log_level);

    let source = build_source(&config)?;
    let state = match source.fetch_cluster().await {
        Ok(cluster) => QueryState::Resolved(cluster),
        Err(e) => QueryState::Failed(e),
    };

    let view = ClusterHealthRouter::new().select(&state)?;
    match view {
        ViewVariant::NavigationShell => {
            println!("navigation-shell");
            Ok(())
        }
        ViewVariant::DeploymentInstructions { cluster_id } => {
            println!("deploy-instructions cluster={cluster_id}");
            std::process::exit(1);
        }
        ViewVariant::Placeholder => {
            // A one-shot fetch is never pending; treat it as not serving.
            println!("pending");
            std::process::exit(1);
        }
    }
}

/// Build the GraphQL status source from configuration.
fn build_source(config: &ConsoleConfig) -> Result<Arc<dyn ClusterSource>> {
    let endpoint = config.endpoint_url()?;
    let source = GraphqlSource::new(endpoint, config.request_timeout())
        .context("failed to build status client")?;
    Ok(Arc::new(source))
}
