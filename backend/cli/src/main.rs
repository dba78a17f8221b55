mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use roaster_analysis::{Analyzer, AnalyzerConfig};
use roaster_commentary::CommentaryGenerator;
use roaster_core::{AnalysisRequest, AnalysisStore, AnalysisView, DocumentUpload};
use roaster_extract::HttpLinkFetcher;
use roaster_gateway::{shutdown_signal, start_server, GatewayState};
use roaster_logging::{init_logger, LogSettings};
use roaster_store::{MemoryStore, SqliteStore};

use config::Config;

#[derive(Parser)]
#[command(name = "roaster")]
#[command(about = "Resume Roaster: upload a resume, get roasted")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Check whether a local server is up
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze one resume without starting the server
    Analyze {
        /// PDF or DOCX file to analyze
        path: Option<PathBuf>,
        /// Shared-drive link to analyze when no file is given
        #[arg(long)]
        link: Option<String>,
        /// Keep the result in memory instead of the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {e}");
        }
    }
    let config = Config::from_env();

    init_logger(&LogSettings {
        level: &config.log_level,
        json: config.log_json,
        log_dir: config.log_dir.as_deref(),
    });

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, db } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                db_path: db.unwrap_or(config.db_path),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status { port } => {
            let port = port.unwrap_or(config.port);
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{port}/api/health"))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("Resume Roaster is not running on port {port}");
                }
            }
        }
        Commands::Analyze {
            path,
            link,
            dry_run,
        } => {
            let store: Arc<dyn AnalysisStore> = if dry_run {
                Arc::new(MemoryStore::new())
            } else {
                Arc::new(SqliteStore::open(&config.db_path)?)
            };
            let analyzer = build_analyzer(&config, store)?;
            let result = analyze_once(&analyzer, path, link).await;
            analyzer.shutdown().await?;
            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
    }

    Ok(())
}

fn build_analyzer(config: &Config, store: Arc<dyn AnalysisStore>) -> Result<Analyzer> {
    let fetcher = HttpLinkFetcher::new(config.fetch_timeout)
        .context("Failed to build HTTP client for shared links")?
        .with_max_bytes(config.max_download_bytes);
    let generator = match config.sampler_seed {
        Some(seed) => {
            info!(seed, "Using seeded commentary sampler");
            CommentaryGenerator::seeded(seed)
        }
        None => CommentaryGenerator::default(),
    };

    Ok(Analyzer::new(
        store,
        Arc::new(fetcher),
        generator,
        AnalyzerConfig {
            store_timeout: config.store_timeout,
            fetch_timeout: config.fetch_timeout,
        },
    ))
}

async fn analyze_once(
    analyzer: &Analyzer,
    path: Option<PathBuf>,
    link: Option<String>,
) -> Result<AnalysisView> {
    let request = match (path, link) {
        (Some(path), _) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            AnalysisRequest::from_file(DocumentUpload::new(filename, bytes))
        }
        (None, Some(link)) => AnalysisRequest::from_link(link),
        (None, None) => bail!("Pass a file path or --link"),
    };

    Ok(analyzer.analyze(request).await?)
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        db = %config.db_path.display(),
        "Starting Resume Roaster"
    );

    let store = Arc::new(SqliteStore::open(&config.db_path)?);
    let analyzer = build_analyzer(&config, store)?;
    let state = GatewayState::new(analyzer.clone()).with_max_upload_bytes(config.max_upload_bytes);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("Invalid bind address")?;

    let served = start_server(addr, state, shutdown_signal()).await;
    if let Err(e) = &served {
        error!(error = %e, "HTTP server failed");
    }

    analyzer.shutdown().await?;
    served
}
