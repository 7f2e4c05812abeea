//! The poll loop.
//!
//! Each cycle fetches the newest item, compares it with the last one seen
//! and notifies on change. Failed fetches are retried on a short delay
//! until the retry budget runs out, after which the loop falls back to the
//! normal polling interval.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::app::{AppContext, Result};
use crate::config::{Config, RetrySettings};
use crate::domain::{Observation, PollState};

/// Desktop message sent on the first successful fetch.
pub const STARTED_MESSAGE: &str = "Started watching for fixture news";

/// Short-delay retry budget for consecutive fetch failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: Duration,
    reset_on_success: bool,
    failures: u32,
}

impl RetryPolicy {
    pub fn new(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            retry_delay: Duration::from_secs(settings.retry_delay_secs),
            reset_on_success: settings.reset_on_success,
            failures: 0,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Record a failed fetch. Returns the short retry delay while the
    /// budget lasts, `None` once it is spent.
    pub fn on_failure(&mut self) -> Option<Duration> {
        if self.failures < self.max_retries {
            self.failures += 1;
            Some(self.retry_delay)
        } else {
            None
        }
    }

    pub fn on_success(&mut self) {
        if self.reset_on_success {
            self.failures = 0;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&RetrySettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    FirstRun,
    Changed,
    Unchanged,
    /// Fetch failed; `exhausted` is set once the retry budget is spent
    Failed { exhausted: bool },
}

/// Result of one poll cycle and how long to wait before the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub outcome: CycleOutcome,
    pub delay: Duration,
}

pub struct Poller {
    ctx: AppContext,
    config: Config,
    state: PollState,
    retry: RetryPolicy,
}

impl Poller {
    pub fn new(ctx: AppContext, config: Config, retry: RetryPolicy) -> Self {
        Self {
            ctx,
            config,
            state: PollState::new(),
            retry,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run cycles until the process is interrupted.
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Watching for fixture news (interval: {}, email: {}, PID: {})",
            Config::format_interval(self.config.poll_interval_secs),
            if self.config.email_enabled { "on" } else { "off" },
            std::process::id()
        );

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let cycle = tokio::select! {
                cycle = self.run_cycle() => cycle,
                res = &mut shutdown => {
                    res?;
                    break;
                }
            };

            debug!(outcome = ?cycle.outcome, "Next check in {}s", cycle.delay.as_secs());

            tokio::select! {
                _ = sleep(cycle.delay) => {}
                res = &mut shutdown => {
                    res?;
                    break;
                }
            }
        }

        info!("Shutting down...");
        Ok(())
    }

    /// Fetch once, notify if needed, and report the delay before the next
    /// cycle. Never fails: fetch and notification errors are logged here.
    pub async fn run_cycle(&mut self) -> Cycle {
        info!("Checking for new fixture news...");

        let item = match self.ctx.fetcher.fetch_latest().await {
            Ok(item) => item,
            Err(e) => {
                warn!("Error fetching data: {}", e);
                return self.failed_cycle();
            }
        };

        self.retry.on_success();
        let notifier = &self.ctx.notifier;

        let outcome = match self.state.observe(&item) {
            Observation::FirstRun => {
                info!("{}", STARTED_MESSAGE);
                notifier.notify_desktop(STARTED_MESSAGE).await;
                CycleOutcome::FirstRun
            }
            Observation::Changed => {
                let title = item.title.as_str();
                info!("New fixture news found: {}", title);
                notifier.notify_desktop(title).await;
                if self.config.email_enabled {
                    notifier.notify_email(title).await;
                }
                CycleOutcome::Changed
            }
            Observation::Unchanged => {
                info!("No new fixture news found");
                CycleOutcome::Unchanged
            }
        };

        Cycle {
            outcome,
            delay: self.config.poll_interval(),
        }
    }

    fn failed_cycle(&mut self) -> Cycle {
        match self.retry.on_failure() {
            Some(delay) => {
                info!("Failed to fetch data. Retrying...");
                Cycle {
                    outcome: CycleOutcome::Failed { exhausted: false },
                    delay,
                }
            }
            None => {
                warn!(
                    "Failed to fetch data after {} attempts",
                    self.retry.max_retries()
                );
                Cycle {
                    outcome: CycleOutcome::Failed { exhausted: true },
                    delay: self.config.poll_interval(),
                }
            }
        }
    }
}
