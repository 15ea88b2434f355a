use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use crate::args::RunConfig;
use crate::error::AppResult;
use crate::requester::Requester;
use crate::summary::{Summary, Totals};

pub struct Runner<R> {
    config: RunConfig,
    requester: Arc<R>,
    semaphore: Arc<Semaphore>,
    summary: Arc<Summary>,
}

impl<R: Requester> Runner<R> {
    pub fn new(config: RunConfig, requester: Arc<R>) -> Self {
        let permits = config
            .concurrency_limit
            .get()
            .min(Semaphore::MAX_PERMITS);
        Runner {
            config,
            requester,
            semaphore: Arc::new(Semaphore::new(permits)),
            summary: Arc::new(Summary::new()),
        }
    }

    /// Issues every request, at most `concurrency_limit` at a time, and returns
    /// once all of them have finished. There is no global deadline: one hung
    /// request holds the run open unless a per-request timeout is set.
    pub async fn run(self) -> AppResult<Totals> {
        let now = Instant::now();
        let total = self.config.total_requests.get();
        info!(
            url = %self.config.url,
            total,
            concurrency = self.config.concurrency_limit.get(),
            "starting run"
        );

        let tracker = TaskTracker::new();
        for seq in 0..total {
            // 限制并发数
            let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
            let requester = Arc::clone(&self.requester);
            let summary = Arc::clone(&self.summary);
            let target = self.config.url.clone();
            tracker.spawn(async move {
                let outcome = requester.issue(&target).await;
                drop(permit);
                let verdict = summary.record(&outcome);
                debug!(
                    seq,
                    ?verdict,
                    status = outcome.status().map(|status| status.as_u16()),
                    elapsed_ms = u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
                    "request completed"
                );
            });
        }
        tracker.close();
        tracker.wait().await;

        let totals = self.summary.totals();
        info!(
            elapsed = ?now.elapsed(),
            attempted = totals.attempted(),
            total_hits = totals.total_hits,
            unreachable = totals.unreachable,
            "run finished"
        );
        Ok(totals)
    }
}
