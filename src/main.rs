mod args;
mod error;
mod logger;
mod report;
mod requester;
mod runner;
mod summary;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use args::{Args, RunConfig};
use error::{AppError, AppResult, HttpError};
use report::Report;
use requester::HttpRequester;
use runner::Runner;
use summary::Totals;

// ./stress -u https://example.com -n 1000 -c 30

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_logging(args.verbose);
    match run(&args).await {
        Ok(totals) => {
            print!("{}", Report::new(&totals).render());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&err);
            ExitCode::from(err.exit_status())
        }
    }
}

async fn run(args: &Args) -> AppResult<Totals> {
    let config = RunConfig::from_args(args)?;
    let requester = HttpRequester::new(config.request_timeout)?;
    Runner::new(config, Arc::new(requester)).run().await
}

fn report_failure(err: &AppError) {
    match err {
        AppError::Http(HttpError::InvalidUrl { .. }) => {
            error!("unable to make HTTP request: {}", err);
            println!("Unable to build HTTP request");
        }
        _ => println!("ERROR: {}", err),
    }
}
