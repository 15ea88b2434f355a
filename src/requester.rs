use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::trace;
use url::Url;

use crate::error::HttpError;

/// Whether the server answered, and with what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    Status(StatusCode),
    /// Connection refused, DNS failure, TLS failure, timeout.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failed,
    Unreachable,
}

#[derive(Debug, Clone, Copy)]
pub struct RequestOutcome {
    pub elapsed: Duration,
    pub reach: Reach,
}

impl RequestOutcome {
    pub fn reached(status: StatusCode, elapsed: Duration) -> Self {
        RequestOutcome {
            elapsed,
            reach: Reach::Status(status),
        }
    }

    pub fn unreachable(elapsed: Duration) -> Self {
        RequestOutcome {
            elapsed,
            reach: Reach::Unreachable,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self.reach {
            Reach::Status(status) => Some(status),
            Reach::Unreachable => None,
        }
    }

    /// Only `200 OK` is a success; every other status is a failure.
    pub fn verdict(&self) -> Verdict {
        match self.reach {
            Reach::Status(status) if status == StatusCode::OK => Verdict::Success,
            Reach::Status(_) => Verdict::Failed,
            Reach::Unreachable => Verdict::Unreachable,
        }
    }
}

/// Issues one request against the target and classifies how it went.
pub trait Requester: Send + Sync + 'static {
    fn issue(&self, target: &Url) -> BoxFuture<'static, RequestOutcome>;
}

/// The request-build step: the target must be an absolute URL.
pub fn parse_target(raw: &str) -> Result<Url, HttpError> {
    Url::parse(raw).map_err(|source| HttpError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct HttpRequester {
    client: Client,
}

impl HttpRequester {
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| HttpError::BuildClient { source })?;
        Ok(HttpRequester { client })
    }
}

impl Requester for HttpRequester {
    fn issue(&self, target: &Url) -> BoxFuture<'static, RequestOutcome> {
        let request = self.client.get(target.clone());
        async move {
            let start = Instant::now();
            let result = request.send().await;
            let elapsed = start.elapsed();
            // the body is never read; dropping the response discards it
            match result {
                Ok(response) => RequestOutcome::reached(response.status(), elapsed),
                Err(err) => {
                    trace!(error = %err, "target unreachable");
                    RequestOutcome::unreachable(elapsed)
                }
            }
        }
        .boxed()
    }
}
