//! deepresearch - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use deepresearch::{
    cli::{Args, Config},
    logging, Query, QueryClient,
};
use std::io;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Checked before anything else so a bare invocation never touches the network
    let query = match Query::from_args(&args.query) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &query).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, query: &Query) -> Result<()> {
    let config = Config::load(args.config.clone())?;
    logging::init(args.log_level(&config));

    let client = QueryClient::with_endpoint(&args.endpoint(&config), args.mode())?;

    let report = client
        .run(query, &mut io::stdout(), &mut io::stderr())
        .await?;

    tracing::debug!(
        fragments = report.fragments,
        server_errors = report.server_errors,
        elapsed_ms = report.duration.as_millis() as u64,
        "query finished"
    );

    if report.had_server_errors() {
        tracing::info!("server reported errors; exiting with success status");
    }

    Ok(())
}
