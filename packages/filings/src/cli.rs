//! Command-line interface for searching and extracting N-PORT filings.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::filing::FilingRequest;
use crate::holdings::{extract_holdings, Holding};
use crate::http::{EdgarClient, EdgarConfig};
use crate::search::{relay_search, SearchRequest};
use crate::xml::parse_document;

/// Environment variable holding the EDGAR `User-Agent` identification.
pub const USER_AGENT_ENV: &str = "SEC_USER_AGENT";

/// N-PORT Filings - Search EDGAR and extract fund holdings.
#[derive(Parser)]
#[command(name = "nport-filings")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract matching holdings from a local primary_doc.xml file.
    Extract {
        /// Path to the filing document
        file: PathBuf,

        /// Name, issuer or ticker to match (case-insensitive)
        #[arg(short, long)]
        security: String,

        /// Print holdings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a filing from EDGAR and extract matching holdings.
    Fetch {
        /// Central Index Key of the filer
        #[arg(long)]
        cik: String,

        /// Accession number (dashes optional)
        #[arg(long)]
        accession: String,

        /// Name, issuer or ticker to match (case-insensitive)
        #[arg(short, long)]
        security: String,

        /// Print holdings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search EDGAR full-text index for N-PORT filings.
    Search {
        /// Security name or ticker
        security: String,
    },
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            security,
            json,
        } => {
            let holdings = extract_file(&file, &security)?;
            print_holdings(&holdings, json)
        }
        Commands::Fetch {
            cik,
            accession,
            security,
            json,
        } => fetch_command(&cik, &accession, &security, json).await,
        Commands::Search { security } => search_command(&security).await,
    }
}

/// Parse a filing document on disk and extract matching holdings.
pub fn extract_file(path: &Path, security: &str) -> Result<Vec<Holding>> {
    let xml = std::fs::read_to_string(path)?;
    let tree = parse_document(&xml)?;
    Ok(extract_holdings(&tree, security))
}

fn client_from_env() -> Result<EdgarClient> {
    let config = match std::env::var(USER_AGENT_ENV) {
        Ok(user_agent) if !user_agent.trim().is_empty() => {
            EdgarConfig::default().with_user_agent(user_agent.trim())
        }
        _ => {
            tracing::warn!("{USER_AGENT_ENV} not set; EDGAR requires a name and email");
            EdgarConfig::default()
        }
    };
    EdgarClient::new(config)
}

async fn fetch_command(cik: &str, accession: &str, security: &str, json: bool) -> Result<()> {
    let request = FilingRequest::new(Some(cik), Some(accession), Some(security))?;
    let client = client_from_env()?;

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Fetching filing {accession}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let xml = client
        .fetch_filing(&request.cik, &request.accession)
        .await
        .inspect_err(|_| pb.finish_and_clear())?;
    pb.finish_and_clear();

    let tree = parse_document(&xml)?;
    let holdings = extract_holdings(&tree, &request.security);
    print_holdings(&holdings, json)
}

async fn search_command(security: &str) -> Result<()> {
    let request = SearchRequest::new(Some(security))?;
    let client = client_from_env()?;
    let body = relay_search(&client, &request).await?;

    let value: serde_json::Value = serde_json::from_slice(&body)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_holdings(holdings: &[Holding], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(holdings)?);
        return Ok(());
    }

    if holdings.is_empty() {
        println!("{}", style("No matching holdings").yellow());
        return Ok(());
    }

    println!(
        "{} {}",
        style("Found").bold(),
        style(format!("{} holding(s)", holdings.len())).green()
    );
    for holding in holdings {
        println!();
        println!("  {}", style(&holding.name).cyan().bold());
        if !holding.title.is_empty() {
            println!("  Title: {}", holding.title);
        }
        if !holding.ticker.is_empty() || !holding.cusip.is_empty() {
            println!("  Ticker: {}  CUSIP: {}", holding.ticker, holding.cusip);
        }
        println!(
            "  Shares: {}  Value (USD): {:.2}",
            holding.shares, holding.market_value
        );
        println!(
            "  Price: {:.4} {}  ({:.4} USD, rate {})",
            holding.price_per_share, holding.currency, holding.price_in_usd, holding.exchange_rate
        );
        if !holding.report_date.is_empty() {
            println!("  Report date: {}", holding.report_date);
        }
    }
    Ok(())
}
