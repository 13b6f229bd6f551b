//! CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{error, warn};
use tokio_util::sync::CancellationToken;

use flexcount::config::{load_hosts, Credentials, RunLimits};
use flexcount::dispatch::{dispatch, DEFAULT_CEILING};
use flexcount::platform::aireos;
use flexcount::report::{RecordSink, ReportBatch, SpreadsheetReport, SqliteReport, TextReport};
use flexcount::worker::{collect_host, RunContext};

/// Collect FlexConnect AP group inventories from Cisco wireless controllers.
///
/// Credentials are read from the WLC_USERNAME and WLC_PASSWORD environment
/// variables.
#[derive(Parser, Debug)]
#[command(name = "flexcount", version, about)]
struct Cli {
    /// Host list file, one controller address per line.
    #[arg(long, default_value = "wlc_servers.txt")]
    hosts: PathBuf,

    /// Text report output path.
    #[arg(long, default_value = "results.txt")]
    report: PathBuf,

    /// Also write an XLSX spreadsheet to this path.
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Also write a SQLite database to this path.
    #[arg(long)]
    sqlite: Option<PathBuf>,

    /// Maximum number of concurrent controller sessions.
    #[arg(long, default_value_t = DEFAULT_CEILING)]
    max_sessions: usize,

    /// Connection timeout in seconds.
    #[arg(long, default_value_t = 10)]
    connect_timeout: u64,

    /// Login negotiation timeout in seconds.
    #[arg(long, default_value_t = 45)]
    login_timeout: u64,

    /// Per-command output timeout in seconds.
    #[arg(long, default_value_t = 30)]
    command_timeout: u64,
}

impl Cli {
    fn limits(&self) -> RunLimits {
        RunLimits {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            login_timeout: Duration::from_secs(self.login_timeout),
            command_timeout: Duration::from_secs(self.command_timeout),
            ..RunLimits::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let credentials = Credentials::from_env()?;
    let hosts = load_hosts(&cli.hosts)?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling in-flight sessions");
                cancel.cancel();
            }
        }
    });

    let ctx = Arc::new(RunContext {
        credentials,
        grammar: aireos(),
        limits: cli.limits(),
        cancel,
    });

    let outcomes = dispatch(hosts, cli.max_sessions, |host| {
        collect_host(host, Arc::clone(&ctx))
    })
    .await;

    // Final summary: every host, then totals
    for outcome in &outcomes {
        println!("{outcome}");
    }
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let batch = ReportBatch::from_outcomes(&outcomes);
    println!(
        "{} host(s): {} ok, {} failed, {} group(s) collected",
        outcomes.len(),
        succeeded,
        outcomes.len() - succeeded,
        batch.len()
    );

    // Each sink is written independently so one failing sink does not
    // consume the results of the others.
    let mut sink_failed = false;
    sink_failed |= write_sink(&batch, TextReport::create(&cli.report), "text report");
    if let Some(path) = &cli.xlsx {
        sink_failed |= write_sink(&batch, SpreadsheetReport::create(path), "spreadsheet");
    }
    if let Some(path) = &cli.sqlite {
        sink_failed |= write_sink(&batch, SqliteReport::open(path), "database");
    }
    if sink_failed {
        anyhow::bail!("one or more report sinks failed");
    }

    Ok(())
}

/// Write the batch through one sink; returns true on failure.
fn write_sink<S: RecordSink>(
    batch: &ReportBatch,
    sink: flexcount::error::Result<S>,
    label: &str,
) -> bool {
    let result = sink
        .map(|mut sink| batch.write_to(&mut sink))
        .and_then(|r| r)
        .with_context(|| format!("writing {label}"));

    if let Err(err) = result {
        error!("{err:#}");
        return true;
    }
    false
}
