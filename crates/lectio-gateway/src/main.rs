use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lectio_catechism::{CatechismStore, SqliteCatechismStore, WeeklyRotation};
use lectio_core::{LectioConfig, SystemClock};
use lectio_plan::{PlanBuilder, PlanStore, SqlitePlanStore};
use lectio_progress::{ProgressTracker, SqliteProgressStore};
use rusqlite::Connection;
use tracing::{info, warn};

mod app;
mod auth;
mod http;
mod service;

#[derive(Parser)]
#[command(name = "lectio-gateway", version)]
#[command(about = "Daily Bible reading plan and weekly catechism service")]
struct Cli {
    /// Config file (default: $LECTIO_CONFIG, then ~/.lectio/lectio.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Compute the reading plan and write it to the database.
    SeedPlan {
        /// Delete the existing plan first.
        #[arg(long)]
        clear: bool,
        /// Number of day slots (default: schedule.plan_days).
        #[arg(long)]
        days: Option<u32>,
    },
    /// Import catechism questions from a JSON feed file.
    SeedCatechism {
        /// `[{"number": 1, "q": "...", "a": "..."}, ...]`
        #[arg(long)]
        file: PathBuf,
        /// Delete the existing questions first.
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectio_gateway=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > LECTIO_CONFIG env > ~/.lectio/lectio.toml
    let config_path = cli.config.or_else(|| std::env::var("LECTIO_CONFIG").ok());
    let config = LectioConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        LectioConfig::default()
    });

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::SeedPlan { clear, days } => seed_plan(&config, clear, days),
        Command::SeedCatechism { file, clear } => seed_catechism(&config, &file, clear),
    }
}

async fn serve(config: LectioConfig) -> anyhow::Result<()> {
    let db_path = config.database.path.clone();
    info!(path = %db_path, "opening SQLite database");

    // each subsystem gets its own connection to the same file
    let plan = Arc::new(SqlitePlanStore::new(open_db(&db_path)?)?);
    let catechism = Arc::new(SqliteCatechismStore::new(open_db(&db_path)?)?);
    let progress = ProgressTracker::new(Arc::new(SqliteProgressStore::new(open_db(&db_path)?)?));
    info!("database migrations complete");

    if plan.count()? == 0 {
        warn!("reading plan is empty; run `lectio-gateway seed-plan`");
    }
    if catechism.count()? == 0 {
        warn!("catechism is empty; run `lectio-gateway seed-catechism`");
    }

    let plan_days = NonZeroU32::new(config.schedule.plan_days)
        .context("schedule.plan_days must be at least 1")?;
    let scheduler = service::Scheduler::new(
        plan,
        catechism,
        progress,
        WeeklyRotation::new(config.schedule.reference_sunday),
        plan_days,
    );

    let clock = SystemClock::from_offset_minutes(config.schedule.utc_offset_minutes)?;
    let identity = auth::StaticTokens::new(&config.gateway.auth.tokens);
    if identity.token_count() == 0 {
        warn!("no tokens in [gateway.auth.tokens]; every /api request will be rejected");
    }

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;
    let state = Arc::new(app::AppState::new(
        config,
        Arc::new(clock),
        Arc::new(identity),
        scheduler,
    ));
    let router = app::build_router(state);

    info!("Lectio gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

fn seed_plan(config: &LectioConfig, clear: bool, days: Option<u32>) -> anyhow::Result<()> {
    let days = days.unwrap_or(config.schedule.plan_days);
    anyhow::ensure!(days > 0, "--days must be at least 1");

    let store = SqlitePlanStore::new(open_db(&config.database.path)?)?;
    if clear {
        info!("clearing existing reading plan");
        store.clear()?;
    }

    let report = PlanBuilder::canonical()?.seed(&store, days);
    if report.failed > 0 {
        warn!(failed = report.failed, "some plan days were not stored");
    }
    info!(total = store.count()?, "reading plan ready");
    Ok(())
}

fn seed_catechism(config: &LectioConfig, file: &std::path::Path, clear: bool) -> anyhow::Result<()> {
    let store = SqliteCatechismStore::new(open_db(&config.database.path)?)?;
    if clear {
        info!("clearing existing catechism questions");
        store.clear()?;
    }

    info!(file = %file.display(), "reading catechism feed");
    let report = lectio_catechism::import_file(&store, file, config.catechism.max_items)
        .with_context(|| format!("importing {}", file.display()))?;
    if report.valid == config.catechism.max_items as usize {
        info!("all {} questions have been populated", report.valid);
    }
    Ok(())
}

/// Open the shared database file with WAL and foreign keys on.
fn open_db(path: &str) -> anyhow::Result<Connection> {
    ensure_parent_dir(path);
    let conn = Connection::open(path).with_context(|| format!("opening database {path}"))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    Ok(conn)
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
