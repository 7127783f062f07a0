//! rdshell CLI Entry Point
//!
//! Parses the invocation flags into an immutable [`AppOptions`], then runs
//! the pipeline: fetch → reconcile → select → build → execute.
//!
//! Logs go to stderr; stdout carries only the dry-run command and the
//! interactive prompt.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rdshell::command::{build, ClientBinaries, ConnectionProfile};
use rdshell::config::{resolve_client_binaries, AppOptions};
use rdshell::error::RdshellError;
use rdshell::exec::execute;
use rdshell::fetch::{fetch_endpoints, rds_client};
use rdshell::reconcile::reconcile;
use rdshell::select::select;

/// rdshell - pick an RDS endpoint and launch its native client
#[derive(Parser)]
#[command(name = "rdshell")]
#[command(about = "Interactive CLI for connecting to Amazon RDS DB instances")]
#[command(version)]
struct Cli {
    /// AWS shared-credentials profile (region is not loaded from the
    /// profile; use --region)
    #[arg(short, long, default_value = "default")]
    profile: String,

    /// AWS region to list endpoints in
    #[arg(short, long, default_value = "ap-northeast-1")]
    region: String,

    /// Override the user name used to connect to the DB instance
    #[arg(short, long, default_value = "")]
    user: String,

    /// Print the client command instead of executing it
    #[arg(short = 'c', long)]
    dry_run: bool,
}

impl Cli {
    fn into_options(self) -> AppOptions {
        AppOptions { profile: self.profile, region: self.region, user: self.user, dry_run: self.dry_run }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Cli::parse().into_options();

    // An unreadable override file falls back to the stock clients; the
    // operator is told but can still connect.
    let binaries = match resolve_client_binaries() {
        Ok(binaries) => binaries,
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            ClientBinaries::default()
        }
    };

    let client = rds_client(&opts).await;
    let (instances, memberships) = fetch_endpoints(&client).await;
    let endpoints = reconcile(&instances, &memberships);

    let chosen = match select(&endpoints) {
        Ok(index) => &endpoints[index],
        Err(RdshellError::SelectionCancelled) => {
            info!("selection cancelled, no command built");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let profile = ConnectionProfile::from_endpoint(chosen, &opts.user, binaries);
    let command = match build(&profile) {
        Ok(command) => command,
        Err(err) => {
            error!(code = err.error_code(), engine = %chosen.engine, "{err}");
            return Err(err.into());
        }
    };

    execute(&command, opts.dry_run)?;
    Ok(())
}
