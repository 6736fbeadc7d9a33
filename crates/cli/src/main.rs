//! `planetsync`: run a planet sync or print the sync status.

use anyhow::Context;
use clap::Parser;
use planetsync_core::sync::{PlanetSource, PlanetStore, SyncStatistics, SyncStatus};
use planetsync_db::store::PgPlanetStore;
use planetsync_graphql::{GraphqlConfig, StarWarsPlanets};
use planetsync_sync::PlanetSyncEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Synchronize planets from the GraphQL API into the local database.
#[derive(Debug, Parser)]
#[command(name = "planetsync", version)]
struct Cli {
    /// Show sync status without performing a sync.
    #[arg(long)]
    status: bool,

    /// Log sync progress at info level.
    #[arg(long)]
    verbose: bool,

    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Apply pending migrations before running.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let pool = planetsync_db::create_pool(&cli.database_url)
        .await
        .context("Failed to connect to database")?;
    if cli.migrate {
        planetsync_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let source = StarWarsPlanets::from_config(&GraphqlConfig::from_env())?;
    let engine = PlanetSyncEngine::new(source, PgPlanetStore::new(pool));

    if cli.status {
        print!("{}", show_status(&engine).await?);
        return Ok(());
    }

    println!("Starting planet synchronization...");
    print!("{}", run_sync(&engine).await?);
    Ok(())
}

async fn show_status<S: PlanetSource, P: PlanetStore>(
    engine: &PlanetSyncEngine<S, P>,
) -> anyhow::Result<String> {
    let status = engine
        .status()
        .await
        .context("Failed to get sync status")?;
    Ok(render_status(&status))
}

async fn run_sync<S: PlanetSource, P: PlanetStore>(
    engine: &PlanetSyncEngine<S, P>,
) -> anyhow::Result<String> {
    let stats = engine.sync().await.context("Sync failed")?;
    Ok(render_summary(&stats))
}

fn render_summary(stats: &SyncStatistics) -> String {
    let mut out = String::from("=== Sync Completed ===\n");
    out.push_str(&format!("Created: {}\n", stats.created));
    out.push_str(&format!("Updated: {}\n", stats.updated));
    out.push_str(&format!("Errors: {}\n", stats.errors));
    out.push_str(&format!("Total processed: {}\n", stats.total_processed));
    if stats.errors > 0 {
        out.push_str(&format!("Sync completed with {} errors\n", stats.errors));
    } else {
        out.push_str("Sync completed successfully!\n");
    }
    out
}

fn render_status(status: &SyncStatus) -> String {
    let stats = &status.last_sync_stats;
    let last_sync_time = status
        .last_sync_time
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "Never".to_string());

    let mut out = String::from("=== Planet Sync Status ===\n");
    out.push_str(&format!(
        "Total planets in database: {}\n",
        status.total_planets_in_db
    ));
    out.push_str(&format!(
        "Last updated planet: {}\n",
        status.last_updated_planet.as_deref().unwrap_or("None")
    ));
    out.push_str(&format!("Last sync time: {last_sync_time}\n"));
    out.push_str("Last sync statistics:\n");
    out.push_str(&format!("  Created: {}\n", stats.created));
    out.push_str(&format!("  Updated: {}\n", stats.updated));
    out.push_str(&format!("  Errors: {}\n", stats.errors));
    out.push_str(&format!("  Total processed: {}\n", stats.total_processed));
    out
}
