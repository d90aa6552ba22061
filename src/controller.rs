//! Update controller
//!
//! Drives the fetch-parse-render cycle for one panel:
//!
//! ```text
//! start() ──► Fetching ──ok──► Idle ◄──────────────┐
//!                │                                  │
//!               err                           tick / refresh
//!                │                                  │
//!                ├─ retry_count <= max ─► RetryPending ─(5s)─► Fetching
//!                └─ retry_count >  max ─► Failed ───────────────┘
//!
//! shutdown() ──► Stopped (from any state, terminal)
//! ```
//!
//! All timers and the in-flight fetch live inside a single spawned task, so
//! two cycles never overlap. A periodic tick (or a manual refresh) that fires
//! while a retry is pending supersedes that retry and starts a fresh attempt
//! budget.

use crate::{
    constants::{MAX_RETRIES, REFRESH_INTERVAL_SECS, RETRY_DELAY_SECS},
    display::DisplaySurface,
    provider::PriceFetcher,
    types::{ControllerState, ControllerStatus, DisplayText},
};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};

/// Timing and retry policy for an update controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Period of the repeating tick
    pub refresh_interval: Duration,
    /// Wait before a retry after a failed fetch
    pub retry_delay: Duration,
    /// Retries allowed per tick interval
    pub max_retries: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            max_retries: MAX_RETRIES,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps a display surface up to date with the latest quote
///
/// Created by the host's start hook and shut down by its stop hook. Must be
/// started from within a tokio runtime.
///
/// # Example
/// ```no_run
/// use crypto_price_panel::{CoinGeckoFetcher, TerminalDisplay, UpdateController};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let controller = UpdateController::start(
///     Arc::new(CoinGeckoFetcher::new()?),
///     Arc::new(TerminalDisplay::new()),
/// );
/// // ...
/// controller.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct UpdateController {
    status: Arc<Mutex<ControllerStatus>>,
    /// Held while rendering; true once shut down
    stopped: Arc<Mutex<bool>>,
    refresh: Arc<Notify>,
    stop: Arc<Notify>,
    task: JoinHandle<()>,
}

impl UpdateController {
    /// Starts a controller with the default timing
    pub fn start(fetcher: Arc<dyn PriceFetcher>, display: Arc<dyn DisplaySurface>) -> Self {
        Self::start_with_config(fetcher, display, ControllerConfig::default())
    }

    /// Starts a controller with custom timing
    ///
    /// Shows the loading text right away and returns in the `Fetching`
    /// state; the first fetch is triggered immediately rather than after the
    /// first interval.
    pub fn start_with_config(
        fetcher: Arc<dyn PriceFetcher>,
        display: Arc<dyn DisplaySurface>,
        config: ControllerConfig,
    ) -> Self {
        let mut initial = ControllerStatus::new();
        initial.state = ControllerState::Fetching;

        let status = Arc::new(Mutex::new(initial));
        let stopped = Arc::new(Mutex::new(false));
        let refresh = Arc::new(Notify::new());
        let stop = Arc::new(Notify::new());

        display.set_error_style(false);
        display.set_text(&DisplayText::Loading.to_string());

        tracing::info!(
            provider = fetcher.provider_name(),
            refresh_interval_secs = config.refresh_interval.as_secs(),
            retry_delay_secs = config.retry_delay.as_secs(),
            max_retries = config.max_retries,
            "Starting price update controller"
        );

        let driver = Driver {
            fetcher,
            display,
            status: status.clone(),
            stopped: stopped.clone(),
            refresh: refresh.clone(),
            stop: stop.clone(),
            config,
        };
        let task = tokio::spawn(driver.run());

        Self {
            status,
            stopped,
            refresh,
            stop,
            task,
        }
    }

    /// Requests an immediate cycle
    ///
    /// Behaves like a periodic tick: any pending retry is dropped and the
    /// attempt budget starts over. Requests made while a fetch is in flight
    /// collapse into one follow-up cycle, or into the tick if one comes due
    /// in the meantime. Ignored after shutdown.
    pub fn refresh_now(&self) {
        if self.state() == ControllerState::Stopped {
            return;
        }
        self.refresh.notify_one();
    }

    /// Stops the controller
    ///
    /// Cancels the periodic tick, any pending retry and any in-flight fetch.
    /// Once this returns no new request is sent and the display is never
    /// touched again. Safe to call repeatedly.
    pub fn shutdown(&self) {
        {
            let mut stopped = lock(&self.stopped);
            if *stopped {
                return;
            }
            *stopped = true;
        }
        lock(&self.status).state = ControllerState::Stopped;
        self.stop.notify_one();
        self.task.abort();
        tracing::info!("Price update controller stopped");
    }

    /// Snapshot of the controller's bookkeeping
    pub fn status(&self) -> ControllerStatus {
        lock(&self.status).clone()
    }

    pub fn state(&self) -> ControllerState {
        lock(&self.status).state
    }

    pub fn retry_count(&self) -> u32 {
        lock(&self.status).retry_count
    }

    /// True until the driver task has fully wound down after shutdown
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for UpdateController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// What woke the driver up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Tick,
    Refresh,
    Retry,
}

/// State owned by the spawned driver task
struct Driver {
    fetcher: Arc<dyn PriceFetcher>,
    display: Arc<dyn DisplaySurface>,
    status: Arc<Mutex<ControllerStatus>>,
    stopped: Arc<Mutex<bool>>,
    refresh: Arc<Notify>,
    stop: Arc<Notify>,
    config: ControllerConfig,
}

impl Driver {
    async fn run(self) {
        // The first tick completes immediately, which gives the startup fetch
        let mut ticker = interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let retry = sleep(self.config.retry_delay);
        tokio::pin!(retry);
        let mut retry_armed = false;

        loop {
            let trigger = tokio::select! {
                biased;
                _ = ticker.tick() => Trigger::Tick,
                _ = self.refresh.notified() => Trigger::Refresh,
                _ = &mut retry, if retry_armed => Trigger::Retry,
            };

            if trigger != Trigger::Retry {
                // A refresh requested alongside this tick is served by it
                tokio::select! {
                    biased;
                    _ = self.refresh.notified() => {
                        tracing::debug!(?trigger, "Pending refresh merged into cycle");
                    }
                    _ = std::future::ready(()) => {}
                }
                if retry_armed {
                    tracing::debug!(?trigger, "Pending retry superseded");
                }
            }
            retry_armed = false;

            if let Some(delay) = self.run_cycle(trigger).await {
                retry.as_mut().reset(Instant::now() + delay);
                retry_armed = true;
            }
        }
    }

    /// Runs one fetch and renders the outcome
    ///
    /// Returns the delay before the next retry when one should be scheduled.
    async fn run_cycle(&self, trigger: Trigger) -> Option<Duration> {
        {
            let mut status = lock(&self.status);
            if status.state == ControllerState::Stopped {
                return None;
            }
            if trigger != Trigger::Retry {
                status.retry_count = 0;
            }
            status.state = ControllerState::Fetching;
        }

        // A shutdown that lands before the request is polled must not send it
        let result = tokio::select! {
            biased;
            _ = self.stop.notified() => return None,
            result = self.fetcher.fetch() => result,
        };

        let (texts, retry) = {
            let mut status = lock(&self.status);
            if status.state == ControllerState::Stopped {
                return None;
            }

            match result {
                Ok(quote) => {
                    tracing::debug!(
                        bitcoin_usd = quote.bitcoin_usd(),
                        ethereum_usd = quote.ethereum_usd(),
                        "Successfully updated prices"
                    );
                    status.state = ControllerState::Idle;
                    status.retry_count = 0;
                    status.last_quote = Some(quote);
                    status.last_error = None;
                    status.last_updated = Some(Utc::now());
                    (vec![DisplayText::Quote(quote)], None)
                }
                Err(e) => {
                    status.retry_count += 1;
                    status.last_error = Some(e.to_string());

                    let message = if e.is_malformed() {
                        DisplayText::InvalidResponse
                    } else {
                        DisplayText::FetchFailed
                    };

                    if status.retry_count <= self.config.max_retries {
                        tracing::warn!(
                            provider = self.fetcher.provider_name(),
                            attempt = status.retry_count,
                            max_retries = self.config.max_retries,
                            error = %e,
                            "Failed to fetch prices, retrying"
                        );
                        status.state = ControllerState::RetryPending;
                        (
                            vec![message, DisplayText::Retrying],
                            Some(self.config.retry_delay),
                        )
                    } else {
                        tracing::error!(
                            provider = self.fetcher.provider_name(),
                            retry_count = status.retry_count,
                            error = %e,
                            "Failed to fetch prices, retries exhausted until next tick"
                        );
                        status.state = ControllerState::Failed;
                        (vec![message, DisplayText::FetchFailed], None)
                    }
                }
            }
        };

        self.render(&texts);
        retry
    }

    /// Pushes texts to the display unless shutdown has already happened
    ///
    /// The status lock is released by now, so a display that reads the
    /// controller's status while rendering does not block.
    fn render(&self, texts: &[DisplayText]) {
        let stopped = lock(&self.stopped);
        if *stopped {
            return;
        }
        for text in texts {
            self.display.set_error_style(text.is_error());
            self.display.set_text(&text.to_string());
        }
    }
}
