mod display;
mod session;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fleetwatch_core::FleetProfile;
use fleetwatch_core::alerts::alerts_to_batch;
use fleetwatch_core::dates::today_utc;
use fleetwatch_engine::DashboardSummary;
use fleetwatch_store::ProfileStore;
use fleetwatch_sync::FeedClient;

use session::{Session, profile_store, records_path};

/// Fleetwatch: regulatory alerts for fishing fleets.
#[derive(Parser, Debug)]
#[command(name = "fleetwatch", version, about)]
struct Cli {
    /// Directory holding the stored fleet profile and record snapshot.
    #[arg(long, env = "FLEETWATCH_DATA_DIR", default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// JSON array of raw regulatory records [default: <data-dir>/records.json].
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// Processing date (YYYY-MM-DD) used for records without a published date.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Ignore the stored fleet profile.
    #[arg(long, global = true)]
    no_profile: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List alerts applicable to the fleet.
    Alerts {
        /// Print an Arrow table instead of cards.
        #[arg(long)]
        table: bool,
    },
    /// Ask a question about the alerts.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Headline counts for the fleet.
    Dashboard,
    /// Regulatory sources and their document counts.
    Sources,
    /// Show, set or clear the stored fleet profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Fetch the record feed into a snapshot file.
    Pull {
        #[arg(long, env = "FLEETWATCH_FEED_URL")]
        feed_url: String,
        /// Only records scraped after this RFC 3339 timestamp.
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        /// Output file [default: <data-dir>/records.json].
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show,
    /// Store the profile read from a JSON file.
    Set { file: PathBuf },
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("fleetwatch v{}", env!("CARGO_PKG_VERSION"));

    let store = profile_store(&cli.data_dir);
    let today = cli.today.unwrap_or_else(today_utc);
    let records = records_path(&cli.data_dir, cli.records.as_deref());
    let open_session = || Session::open(&records, &store, today, !cli.no_profile);

    match cli.command {
        Command::Alerts { table } => {
            let session = open_session()?;
            let batch = alerts_to_batch(&session.universe().alerts)?;
            if table {
                display::print_alert_table(&batch)?;
            } else {
                display::print_alert_cards(&batch);
            }
        }
        Command::Ask { question } => {
            let session = open_session()?;
            let answer = session
                .engine()
                .answer(&question.join(" "), session.profile.as_ref());
            display::print_answer(&answer);
        }
        Command::Dashboard => {
            let session = open_session()?;
            let summary = DashboardSummary::from_universe(&session.universe(), session.today);
            display::print_dashboard(&summary);
        }
        Command::Sources => {
            let session = open_session()?;
            display::print_sources(&session.universe().sources);
        }
        Command::Profile { action } => match action {
            ProfileAction::Show => match store.load() {
                Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
                None => println!("No fleet profile stored in {}.", cli.data_dir.display()),
            },
            ProfileAction::Set { file } => {
                let json = fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let profile: FleetProfile = serde_json::from_str(&json)
                    .with_context(|| format!("parsing fleet profile {}", file.display()))?;
                if !profile.is_valid() {
                    anyhow::bail!("fleet profile in {} has no organization", file.display());
                }
                store.save(&profile)?;
                println!(
                    "Saved profile for {} ({} vessels).",
                    profile.organization,
                    profile.vessels.len()
                );
            }
            ProfileAction::Clear => {
                store.clear()?;
                println!("Fleet profile cleared.");
            }
        },
        Command::Pull {
            feed_url,
            since,
            out,
        } => {
            let out = out.unwrap_or(records);
            let records = FeedClient::new(feed_url).pull_records(since).await?;
            if let Some(dir) = out.parent()
                && !dir.as_os_str().is_empty()
            {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
            fs::write(&out, serde_json::to_string_pretty(&records)?)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} records to {}.", records.len(), out.display());
        }
    }

    Ok(())
}
