//! Experience Smoke probe binary
//!
//! Runs the service-request flow once and exits 0 on pass, 1 on failure.

use clap::Parser;
use experience_smoke::{flow, Error, ProbeConfig, Session};
use std::path::PathBuf;
use std::process::ExitCode;

/// Experience Cloud service-request smoke probe
#[derive(Parser, Debug)]
#[command(name = "exp-smoke")]
#[command(version)]
#[command(about = "End-to-end smoke check for a service-request portal")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run in headless mode
    #[arg(long)]
    headless: Option<bool>,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(summary) => {
            println!("PASS: {}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Expected UI failures become one descriptive line; anything
            // else (environment, harness) is reported as an error.
            if err.is_flow_failure() {
                eprintln!("FAIL: {}", err);
            } else {
                eprintln!("ERROR: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, Error> {
    let mut config = ProbeConfig::load(args.config.as_deref())?;

    if let Some(headless) = args.headless {
        config.session.headless = headless;
    }
    if let Some(path) = args.chrome_path {
        config.session.chrome_path = Some(path);
    }

    let session_config = config.session.clone();
    let report = Session::scoped(session_config, |page| async move {
        flow::run(&page, &config).await
    })
    .await?;

    Ok(report.summary())
}
