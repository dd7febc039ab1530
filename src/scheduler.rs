//! Periodic refreshes of a [`Provider`]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::cache::Cache;
use crate::error::Error;
use crate::provider::refresh_progress::FeedbackSender;
use crate::provider::Provider;
use crate::traits::{CalendarParser, OriginFetcher};

/// The background task of a started [`Scheduler`]
struct RefreshTask {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Runs [`Provider::refresh`] at a fixed interval, in a background task.
///
/// At most one such task exists per scheduler. Dropping the scheduler stops it as well.
pub struct Scheduler<F, P>
where
    F: OriginFetcher + 'static,
    P: CalendarParser + 'static,
{
    provider: Arc<Provider<F, P>>,
    cache: Arc<Cache>,
    feedback_channel: Option<FeedbackSender>,
    running: Option<RefreshTask>,
}

impl<F, P> Scheduler<F, P>
where
    F: OriginFetcher + 'static,
    P: CalendarParser + 'static,
{
    pub fn new(provider: Arc<Provider<F, P>>, cache: Arc<Cache>) -> Self {
        Self {
            provider, cache,
            feedback_channel: None,
            running: None,
        }
    }

    /// Report the state of every refresh to this channel (see [`feedback_channel`](crate::provider::refresh_progress::feedback_channel))
    pub fn with_feedback_channel(mut self, channel: FeedbackSender) -> Self {
        self.feedback_channel = Some(channel);
        self
    }

    /// Whether a refresh task is currently running
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start refreshing every `every`. The first refresh happens after `every` has elapsed.
    ///
    /// In case the scheduler was already started, the previous task is stopped first.
    pub async fn start(&mut self, every: Duration) -> Result<(), Error> {
        if every.is_zero() {
            return Err(Error::Configuration("the refresh interval must not be zero".into()));
        }

        if self.running.is_some() {
            log::debug!("Stopping the previous refresh task");
            self.stop().await;
        }

        let (stop, mut stopped) = oneshot::channel::<()>();
        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let feedback_channel = self.feedback_channel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // Either `stop()` has been called, or the scheduler has been dropped
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        match &feedback_channel {
                            Some(sender) => provider.refresh_with_feedback(&cache, sender).await,
                            None => provider.refresh(&cache).await,
                        };
                    },
                }
            }
            log::debug!("Refresh task has stopped");
        });

        log::info!("Will update from origin every {} seconds", every.as_secs());
        self.running = Some(RefreshTask { stop, handle });
        Ok(())
    }

    /// Stop the refresh task, and wait until it has actually stopped.
    ///
    /// A refresh that is in progress is not interrupted, this waits for it to complete.
    pub async fn stop(&mut self) {
        if let Some(task) = self.running.take() {
            // The task may already be gone, in which case there is nobody to notify
            let _ = task.stop.send(());
            if let Err(err) = task.handle.await {
                log::warn!("Refresh task did not end gracefully: {}", err);
            }
        }
    }
}
