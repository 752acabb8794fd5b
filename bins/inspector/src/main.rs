//! Tally Inspector
//!
//! Fetches one report or ledger and prints it as JSON.
//!
//! Usage:
//! ```bash
//! tally --entity E1 --global-unit 5 tree --at 2019-06-30T00:00:00Z --depth 2
//! tally --entity E1 --global-unit 5 position --at 2019-06-30T00:00:00Z
//! tally --entity E1 --custom-unit 8 performance \
//!     --from 2019-01-01T00:00:00Z --to 2019-12-31T00:00:00Z
//! tally --entity E1 --global-unit 5 ledger 1001 \
//!     --from 2019-01-01T00:00:00Z --to 2019-12-31T00:00:00Z --all
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_client::{
    HttpTransport, LedgerRequest, PagedLedger, PerformanceRequest, PositionRequest, TallyClient,
    TreeRequest,
};
use tally_core::ledger::{LedgerOrder, LedgerRow, LedgerWindow};
use tally_shared::ClientConfig;
use tally_shared::types::time::parse_wire_time;
use tally_shared::types::{AccountId, CustomUnitId, Denomination, EntityId, GlobalUnitId};

/// Tally - inspect accounting reports and ledgers
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("unit").required(true).args(["global_unit", "custom_unit"])))]
struct Cli {
    /// Entity to read from
    #[arg(long)]
    entity: String,

    /// Express amounts in this global unit (currency)
    #[arg(long)]
    global_unit: Option<i64>,

    /// Express amounts in this custom unit
    #[arg(long)]
    custom_unit: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Account hierarchy with balances
    Tree {
        /// Balance instant (RFC 3339 or wire format)
        #[arg(long, value_parser = parse_time)]
        at: DateTime<Utc>,
        /// Depth beyond which accounts are placeholders
        #[arg(long)]
        depth: Option<u32>,
    },

    /// Balance sheet
    Position {
        /// Balance instant
        #[arg(long, value_parser = parse_time)]
        at: DateTime<Utc>,
        /// Depth beyond which accounts are placeholders
        #[arg(long)]
        depth: Option<u32>,
    },

    /// Income statement
    Performance {
        /// Period start
        #[arg(long, value_parser = parse_time)]
        from: DateTime<Utc>,
        /// Period end
        #[arg(long, value_parser = parse_time)]
        to: DateTime<Utc>,
        /// Depth beyond which accounts are placeholders
        #[arg(long)]
        depth: Option<u32>,
    },

    /// Account ledger
    Ledger {
        /// Account to list
        account_id: i64,
        /// Window start
        #[arg(long, value_parser = parse_time)]
        from: DateTime<Utc>,
        /// Window end
        #[arg(long, value_parser = parse_time)]
        to: DateTime<Utc>,
        /// Row order; defaults to the configured order
        #[arg(long)]
        order: Option<OrderArg>,
        /// Include postings to descendant accounts
        #[arg(long)]
        recursive: bool,
        /// Load every page instead of only the first
        #[arg(long)]
        all: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Oldest,
    Youngest,
}

impl From<OrderArg> for LedgerOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Oldest => Self::OldestFirst,
            OrderArg::Youngest => Self::YoungestFirst,
        }
    }
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_wire_time(raw).map_err(|e| e.to_string())
}

impl Cli {
    fn denomination(&self) -> Result<Denomination> {
        match (self.global_unit, self.custom_unit) {
            (Some(id), None) => Ok(Denomination::global(GlobalUnitId(id))),
            (None, Some(id)) => Ok(Denomination::custom(CustomUnitId(id))),
            _ => anyhow::bail!("exactly one of --global-unit and --custom-unit is required"),
        }
    }
}

/// Printed form of a ledger sequence.
#[derive(Debug, Serialize)]
struct LedgerOutput {
    account_id: AccountId,
    window: LedgerWindow,
    recursive: bool,
    order: LedgerOrder,
    loaded_pages: u32,
    total_pages: u32,
    earliest: Option<LedgerRow>,
    latest: Option<LedgerRow>,
    rows: Vec<LedgerRow>,
}

impl<T, S> From<&PagedLedger<T, S>> for LedgerOutput {
    fn from(sequence: &PagedLedger<T, S>) -> Self {
        Self {
            account_id: sequence.account_id(),
            window: sequence.window(),
            recursive: sequence.is_recursive(),
            order: sequence.order(),
            loaded_pages: sequence.highest_loaded_page(),
            total_pages: sequence.total_pages(),
            earliest: sequence.earliest(),
            latest: sequence.latest(),
            rows: sequence.rows(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(client: &TallyClient<HttpTransport>, cli: Cli) -> Result<()> {
    let entity = EntityId::new(cli.entity.clone());
    let denomination = cli.denomination()?;

    match cli.command {
        Commands::Tree { at, depth } => {
            let mut request = TreeRequest::new(entity, at, denomination);
            request.depth = depth;
            print_json(&client.tree(&request).await?)
        }
        Commands::Position { at, depth } => {
            let mut request = PositionRequest::new(entity, at, denomination);
            request.depth = depth;
            print_json(&client.position(&request).await?)
        }
        Commands::Performance { from, to, depth } => {
            let mut request = PerformanceRequest::new(entity, from, to, denomination);
            request.depth = depth;
            print_json(&client.performance(&request).await?)
        }
        Commands::Ledger {
            account_id,
            from,
            to,
            order,
            recursive,
            all,
        } => {
            let mut request =
                LedgerRequest::new(entity, AccountId::new(account_id), from, to, denomination);
            request.order = order.map(LedgerOrder::from);

            if recursive {
                let sequence = client.recursive_ledger(request).await?;
                if all {
                    sequence.load_all().await?;
                }
                print_json(&LedgerOutput::from(&sequence))
            } else {
                let sequence = client.ledger(request).await?;
                if all {
                    sequence.load_all().await?;
                }
                print_json(&LedgerOutput::from(&sequence))
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tally_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::load().context("Failed to load configuration")?;
    let client = TallyClient::from_config(&config)?;
    info!(base_url = %config.api.base_url, entity = %cli.entity, "Client configured");

    run(&client, cli).await
}
