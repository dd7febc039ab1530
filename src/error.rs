//! Errors that can happen while proxying a calendar

/// The error type of this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The origin could not be reached, or did not answer with a success status
    #[error("unable to fetch origin: {0}")]
    Fetch(String),

    /// The origin answered with something that is not a well-formed calendar
    #[error("unable to parse calendar: {0}")]
    Parse(String),

    /// A required setting is missing or invalid
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Private feed URLs are secrets of their own, keep them out of the logs
        Error::Fetch(with_causes(&err.without_url()))
    }
}

/// `err`, followed by every error in its `source()` chain (e.g. "error sending request: ...: Connection refused")
fn with_causes(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
