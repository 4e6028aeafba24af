use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use api_ingress::{openapi::build_openapi, ApiIngress, ApiIngressConfig};
use blackholes::{BlackholesConfig, BlackholesModule};
use catalog_db::{require_database_url, resolve, LazyDb, ResolvedDatabase, UrlPolicy};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const CATALOG_MODULE: &str = "blackholes";

/// Black hole catalog server
#[derive(Parser)]
#[command(name = "blackhole-server")]
#[command(about = "Black hole catalog server: REST API over SQLite or PostgreSQL")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and show the resolved database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // `.env` goes in before figment reads the environment.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    let base_dir = std::env::current_dir().context("cannot determine working directory")?;
    runtime::logging::init_logging_from_config(&logging_config, &base_dir);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let policy = UrlPolicy::from_required(config.database.require_url);
    require_database_url(config.database.url.as_deref(), policy)
        .context("database.url / DATABASE_URL is required by configuration")?;
    let resolved = resolve(config.database.url.as_deref());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, resolved).await,
        Commands::Check => check_config(&config, &resolved),
    }
}

async fn run_server(config: AppConfig, resolved: ResolvedDatabase) -> Result<()> {
    tracing::info!(
        env = %config.server.env,
        database = %resolved.descriptor.redacted(),
        "Blackhole server starting"
    );
    if config.server.secret_key.is_none() && config.server.env != "dev" {
        tracing::warn!(env = %config.server.env, "SECRET_KEY is not set");
    }

    let catalog_cfg: BlackholesConfig = config.module_config(CATALOG_MODULE)?;
    let db = Arc::new(LazyDb::new(resolved));

    let catalog = BlackholesModule::new(db.clone(), catalog_cfg);
    let outcome = catalog.start().await;
    tracing::debug!(?outcome, "catalog startup finished");

    let ingress = ApiIngress::new(ApiIngressConfig::from_server(&config.server), db.clone());
    let router = ingress.build_router(catalog.router(), build_openapi([BlackholesModule::openapi()]))?;
    let listener = ingress.bind().await?;

    ApiIngress::serve(listener, router, async {
        if let Err(e) = apikit::wait_for_shutdown().await {
            tracing::error!(error = %e, "cannot listen for shutdown signals");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    if let Some(handle) = db.get_if_ready() {
        handle.close().await;
    }
    tracing::info!("Blackhole server stopped");
    Ok(())
}

/// Validates configuration and prints the resolved connection without connecting.
fn check_config(config: &AppConfig, resolved: &ResolvedDatabase) -> Result<()> {
    tracing::info!("Checking configuration...");
    let catalog: BlackholesConfig = config.module_config(CATALOG_MODULE)?;
    let ingress = ApiIngressConfig::from_server(&config.server);

    let report = serde_json::json!({
        "database": {
            "url": resolved.descriptor.redacted(),
            "backend": resolved.descriptor.backend().as_str(),
            "local_file_store": resolved.descriptor.is_local_file_store(),
            "engine": resolved.engine,
        },
        "server": {
            "bind_addr": ingress.bind_addr,
            "allowed_origins": ingress.allowed_origins,
            "timeout_sec": ingress.request_timeout.as_secs(),
        },
        "modules": { CATALOG_MODULE: catalog },
    });

    println!("Configuration check passed");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
