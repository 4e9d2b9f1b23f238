//! Code Relay Pipe - MTA pipe transport for the verification code relay.
//!
//! Reads one raw RFC 5322 message from stdin (or `--input`) and relays it.
//! Exit codes follow sysexits so the MTA can act on them:
//! - 0: handled (relayed, ignored, or webhook failure already logged)
//! - 65 (`EX_DATAERR`): message could not be parsed
//! - 67 (`EX_NOUSER`): recipient unknown, reason printed on stderr
//! - 75 (`EX_TEMPFAIL`): configuration or I/O failure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coderelay::{parse_raw_email, Config, Disposition, Relay};

const EX_DATAERR: u8 = 65;
const EX_NOUSER: u8 = 67;
const EX_TEMPFAIL: u8 = 75;

#[derive(Parser, Debug)]
#[command(name = "coderelay-pipe")]
#[command(about = "Relay a Slack confirmation code from one raw email", long_about = None)]
struct Args {
    /// Envelope recipient of the message
    #[arg(short, long)]
    recipient: String,

    /// Read the message from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; the MTA may capture stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "pipe_failed");
            ExitCode::from(EX_TEMPFAIL)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = Config::from_env();
    let relay = Relay::from_config(&config).context("Invalid relay configuration")?;

    let raw = match &args.input {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read message from stdin")?;
            buf
        }
    };

    info!(
        recipient = %args.recipient,
        message_length = raw.len(),
        "pipe_message_read"
    );

    let email = match parse_raw_email(&raw, &args.recipient) {
        Ok(email) => email,
        Err(e) => {
            error!(error = %format!("{e:#}"), "pipe_message_parse_failed");
            return Ok(ExitCode::from(EX_DATAERR));
        }
    };

    match relay.handle(&email).await {
        Disposition::Rejected { reason } => {
            eprintln!("{reason}");
            Ok(ExitCode::from(EX_NOUSER))
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
