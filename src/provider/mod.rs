//! This module ties an origin, a fetcher and a parser together
//!
//! It is responsible for turning the current content of the origin into a [`Snapshot`], and for publishing it.

use chrono::Utc;

use crate::cache::{Cache, Snapshot};
use crate::censor;
use crate::error::Error;
use crate::origin::Origin;
use crate::traits::{CalendarParser, OriginFetcher};

pub mod refresh_progress;
use refresh_progress::{FeedbackSender, RefreshEvent, RefreshProgress};

/// Refreshes the snapshots of an [`Origin`]
///
/// Usually, `F` is a [`Client`](crate::client::Client) and `P` is an [`IcalParser`](crate::ical::IcalParser). Tests
/// use a [`MockOrigin`](crate::mock_behaviour::MockOrigin) instead of a real client.
#[derive(Debug)]
pub struct Provider<F, P>
where
    F: OriginFetcher,
    P: CalendarParser,
{
    origin: Origin,
    fetcher: F,
    parser: P,
    /// The title every event gets in the free/busy calendar
    free_busy_title: String,
}

impl<F, P> Provider<F, P>
where
    F: OriginFetcher,
    P: CalendarParser,
{
    pub fn new<S: ToString>(origin: Origin, fetcher: F, parser: P, free_busy_title: S) -> Self {
        Self {
            origin, fetcher, parser,
            free_busy_title: free_busy_title.to_string(),
        }
    }

    pub fn origin(&self) -> &Origin { &self.origin }
    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// Fetch the origin and censor it, without publishing anything.
    ///
    /// This is what happens at startup: there is no previous snapshot to fall back on, so that the caller is expected
    /// to give up in case of error.
    pub async fn build_snapshot(&self) -> Result<Snapshot, Error> {
        self.build_snapshot_with_progress(&RefreshProgress::new()).await
    }

    async fn build_snapshot_with_progress(&self, progress: &RefreshProgress<'_>) -> Result<Snapshot, Error> {
        progress.feedback(RefreshEvent::Fetching);
        let raw = self.fetcher.fetch(self.origin.url(), self.origin.credentials()).await?;
        let fetched_at = Utc::now();

        progress.feedback(RefreshEvent::Transforming);
        progress.debug("Computing free/busy");
        let text = std::str::from_utf8(&raw)
            .map_err(|err| Error::Parse(format!("calendar is not valid UTF-8: {}", err)))?;
        let free_busy = censor::transform(&self.parser, text, self.origin.id(), &self.free_busy_title)?;

        Ok(Snapshot::new(raw, free_busy, fetched_at))
    }

    /// Performs a periodic refresh: fetch the origin, censor it, and publish the result to `cache`.
    ///
    /// Errors are not fatal: they are logged, and `cache` keeps serving its previous snapshot.
    /// Returns whether a new snapshot has been published
    pub async fn refresh(&self, cache: &Cache) -> bool {
        self.run_refresh(cache, RefreshProgress::new()).await
    }

    /// Just like [`Self::refresh`], but reports its progression to a feedback channel
    pub async fn refresh_with_feedback(&self, cache: &Cache, feedback_sender: &FeedbackSender) -> bool {
        self.run_refresh(cache, RefreshProgress::new_with_feedback_channel(feedback_sender)).await
    }

    async fn run_refresh(&self, cache: &Cache, progress: RefreshProgress<'_>) -> bool {
        progress.info("Updating from origin");

        match self.build_snapshot_with_progress(&progress).await {
            Err(err) => {
                progress.warn(&format!("Unable to update from origin: {}. Keeping the previous calendar.", err));
                progress.feedback(RefreshEvent::Failed{ reason: err.to_string() });
                false
            },
            Ok(snapshot) => {
                let fetched_at = snapshot.fetched_at();
                cache.publish(snapshot);
                progress.info("Updated successfully");
                progress.feedback(RefreshEvent::Published{ fetched_at });
                true
            },
        }
    }
}
