//! Utilities to track the progression of a refresh

use std::fmt::{Display, Error, Formatter};

use chrono::{DateTime, Utc};

/// The state of the refresh cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshEvent {
    /// No refresh has happened yet
    Idle,
    /// The origin is being fetched
    Fetching,
    /// The fetched calendar is being censored
    Transforming,
    /// A new snapshot has just been published. Nothing happens until the next refresh.
    Published{ fetched_at: DateTime<Utc> },
    /// The refresh failed and the previous snapshot is kept. Nothing happens until the next refresh.
    Failed{ reason: String },
}

impl Display for RefreshEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            RefreshEvent::Idle => write!(f, "Idle"),
            RefreshEvent::Fetching => write!(f, "Fetching from origin..."),
            RefreshEvent::Transforming => write!(f, "Computing free/busy..."),
            RefreshEvent::Published{fetched_at} => write!(f, "Published the calendar fetched at {}", fetched_at),
            RefreshEvent::Failed{reason} => write!(f, "Refresh failed: {}", reason),
        }
    }
}

impl Default for RefreshEvent {
    fn default() -> Self {
        Self::Idle
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<RefreshEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<RefreshEvent>;

/// Create a feeback channel, that can be used to retrieve the current state of the refresh cycle
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(RefreshEvent::default())
}



/// Reports the progression of a refresh to the logs, and to a feedback channel (if any)
pub struct RefreshProgress<'a> {
    feedback_channel: Option<&'a FeedbackSender>,
}

impl<'a> RefreshProgress<'a> {
    pub fn new() -> Self {
        Self { feedback_channel: None }
    }
    pub fn new_with_feedback_channel(channel: &'a FeedbackSender) -> Self {
        Self { feedback_channel: Some(channel) }
    }

    /// Log a warning
    pub fn warn(&self, text: &str) {
        log::warn!("{}", text);
    }
    /// Log an info
    pub fn info(&self, text: &str) {
        log::info!("{}", text);
    }
    /// Log a debug message
    pub fn debug(&self, text: &str) {
        log::debug!("{}", text);
    }
    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&self, event: RefreshEvent) {
        if let Some(sender) = self.feedback_channel {
            // `send_replace` does not care whether someone is still listening
            sender.send_replace(event);
        }
    }
}

impl Default for RefreshProgress<'_> {
    fn default() -> Self {
        Self::new()
    }
}
