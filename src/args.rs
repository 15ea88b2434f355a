use clap::Parser;
use std::num::{NonZeroU64, NonZeroUsize};
use std::time::Duration;
use url::Url;

use crate::error::{AppResult, ArgumentError};
use crate::requester::parse_target;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Target url
    #[arg(short, long)]
    pub url: String,
    /// Total number of requests
    #[arg(short = 'n', long = "requests", allow_hyphen_values = true)]
    pub requests: String,
    /// Max concurrent requests
    #[arg(short, long, allow_hyphen_values = true)]
    pub concurrency: String,
    /// Timeout for each request (seconds)
    #[arg(short, long)]
    pub timeout: Option<NonZeroU64>,
    /// Log every completed request
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated run parameters, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: Url,
    pub total_requests: NonZeroU64,
    pub concurrency_limit: NonZeroUsize,
    pub request_timeout: Option<Duration>,
}

impl RunConfig {
    /// Counts are checked before the url, so a bad `-n` wins over a bad url.
    pub fn from_args(args: &Args) -> AppResult<Self> {
        let total_requests = args
            .requests
            .parse::<NonZeroU64>()
            .map_err(|_| ArgumentError::InvalidRequests)?;
        let concurrency_limit = args
            .concurrency
            .parse::<NonZeroUsize>()
            .map_err(|_| ArgumentError::InvalidConcurrency)?;
        let url = parse_target(&args.url)?;
        Ok(RunConfig {
            url,
            total_requests,
            concurrency_limit,
            request_timeout: args.timeout.map(|secs| Duration::from_secs(secs.get())),
        })
    }
}
