use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brawl_insights::api::state::AppState;
use brawl_insights::calculate::{
    compare_players, compute_stats, filter_by_player_and_brawler, recent_window,
};
use brawl_insights::config::AppConfig;
use brawl_insights::fetch::{fetch_comparison, BrawlClient};
use brawl_insights::models::{BattleLog, BattleRecord, PlayerTag};

#[derive(Parser)]
#[command(name = "brawl-insights")]
#[command(about = "Brawl Stars player statistics and comparisons")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); defaults to config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute statistics from a saved battle-log JSON file
    Stats {
        /// Battle log file (`{"items": [...]}`)
        #[arg(long)]
        file: PathBuf,

        /// Restrict to battles played by this tag...
        #[arg(long, requires = "brawler")]
        player: Option<String>,

        /// ...on this brawler ID
        #[arg(long, requires = "player")]
        brawler: Option<i64>,

        /// Recent window size for the per-brawler view (defaults to config)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Compare two players head to head
    Compare {
        /// First player tag
        a: String,

        /// Second player tag
        b: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&PathBuf::from(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config))?;

    // Initialize tracing
    let level = config.log_level_or(cli.log_level.as_deref()).to_string();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting brawl-insights v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Using config {} at log level {}", cli.config, level);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let client = BrawlClient::new(&config.api)?;
            let state = AppState {
                api: Arc::new(client),
                config: Arc::new(config),
            };
            let app = brawl_insights::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Stats {
            file,
            player,
            brawler,
            window,
        } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let log: BattleLog = serde_json::from_str(&contents)
                .with_context(|| format!("parsing battle log {}", file.display()))?;

            let records: Vec<&BattleRecord> = match (player, brawler) {
                (Some(player), Some(brawler)) => {
                    let tag = PlayerTag::new(&player);
                    let matched = filter_by_player_and_brawler(&log.items, &tag, brawler);
                    let limit = window.unwrap_or(config.stats.recent_window);
                    tracing::info!(
                        "{} of {} battles on brawler {} for {}, keeping {}",
                        matched.len(),
                        log.items.len(),
                        brawler,
                        tag,
                        limit
                    );
                    recent_window(&matched, limit)
                }
                _ => log.items.iter().collect(),
            };

            let stats = compute_stats(records);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Compare { a, b } => {
            let a_tag = PlayerTag::new(&a);
            let b_tag = PlayerTag::new(&b);
            let client = BrawlClient::new(&config.api)?;

            let (a_player, b_player, catalog) = fetch_comparison(&client, &a_tag, &b_tag).await;

            let outcome = compare_players(
                &a_tag,
                a_player.as_ref(),
                &b_tag,
                b_player.as_ref(),
                &catalog,
            );
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
