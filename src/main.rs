//! apt-tracker - Apartment floorplan price tracker CLI
//!
//! Fetches each tracked property's listing page and prints floorplan
//! prices or a min/max summary per site.

use anyhow::Result;
use apt_tracker::commands::{PricesCommand, ReportCommand};
use apt_tracker::config::{Config, OutputFormat};
use apt_tracker::sites::registry::{FetchStrategy, Site};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "apt-tracker",
    version,
    about = "Apartment floorplan price tracker",
    long_about = "Tracks floorplan pricing across a fixed set of apartment listing sites \
                  and reports the going rates."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "APT_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, default_value = "1000", global = true, env = "APT_DELAY")]
    delay: u64,

    /// Seconds to wait for script-rendered pricing to appear
    #[arg(long, default_value = "10", global = true)]
    render_timeout: u64,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Exclude units with unparseable prices from min/max aggregation
    #[arg(long, global = true)]
    exclude_unlisted: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every extracted floorplan price
    #[command(alias = "p")]
    Prices {
        /// Site to track (default: all tracked sites)
        site: Option<String>,
    },

    /// Show min/max prices and the price range
    #[command(alias = "r")]
    Report {
        /// Site to track (default: all tracked sites)
        site: Option<String>,
    },

    /// List tracked sites
    Sites,
}

fn parse_site(arg: Option<String>) -> Result<Option<Site>> {
    match arg {
        Some(name) => {
            let site = name.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            Ok(Some(site))
        }
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    config.delay_ms = cli.delay;
    config.render_timeout_secs = cli.render_timeout;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if cli.exclude_unlisted {
        config.exclude_unlisted = true;
    }

    // No subcommand behaves like the original tracker: min prices across
    // the whole registry.
    let command = cli.command.unwrap_or(Commands::Report { site: None });

    match command {
        Commands::Prices { site } => {
            let site = parse_site(site)?;
            let cmd = PricesCommand::new(config);
            let output = cmd.execute(site).await?;
            println!("{}", output);
        }

        Commands::Report { site } => {
            let site = parse_site(site)?;
            let cmd = ReportCommand::new(config);
            let output = cmd.execute(site).await?;
            println!("{}", output);
        }

        Commands::Sites => {
            println!("Tracked sites:\n");
            println!("{:<18} {:<10} {}", "Name", "Fetch", "URL");
            println!("{:-<18} {:-<10} {:-<45}", "", "", "");

            for site in Site::all() {
                let fetch = match site.fetch_strategy() {
                    FetchStrategy::Static => "static",
                    FetchStrategy::Scripted { .. } => "scripted",
                };
                println!("{:<18} {:<10} {}", site.name(), fetch, site.url());
            }
        }
    }

    Ok(())
}
