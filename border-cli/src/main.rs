//! Border Exchange CLI
//!
//! Command-line interface for the border exchange API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use border_client::BorderClient;
use border_types::DateRange;

#[derive(Parser)]
#[command(name = "borderx")]
#[command(author, version, about = "Border exchange API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the border exchange API
    #[arg(long, env = "BORDERX_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rates of every border country's currency
    Border {
        /// Country name, e.g. France
        country: String,
    },
    /// Latest rate or rate history of a country's currency
    History {
        /// Country name, e.g. Norway
        country: String,
        /// First day of the history (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last day of the history (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Version, uptime and upstream status
    Diag,
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BorderClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Border { country } => {
            let rates = client.exchange_border(&country).await?;
            println!("{}", serde_json::to_string_pretty(&rates.entries)?);
            if rates.is_partial() {
                eprintln!("⚠ Missing borders: {}", rates.failed_borders.join(", "));
            }
        }

        Commands::History { country, from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
                _ => None,
            };
            let history = client.exchange_history(&country, range.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }

        Commands::Diag => {
            let diag = client.diag().await?;
            println!("{}", serde_json::to_string_pretty(&diag)?);
        }
    }

    Ok(())
}
