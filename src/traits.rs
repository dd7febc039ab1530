//! The seams between the proxy and its collaborators

use async_trait::async_trait;
use url::Url;

use crate::error::Error;
use crate::origin::Credentials;
use crate::Calendar;

/// Something that is able to turn the text of a `VCALENDAR` into a [`Calendar`]
pub trait CalendarParser: Send + Sync {
    /// Parse a whole calendar.
    /// Returns an [`Error::Parse`] in case `text` is not a well-formed calendar
    fn parse(&self, text: &str) -> Result<Calendar, Error>;
}

/// Something that is able to retrieve the content of an origin feed
#[async_trait]
pub trait OriginFetcher: Send + Sync {
    /// Performs a single retrieval, and returns the body exactly as it was received.
    /// Any failure (connection, timeout, non-success status...) is an [`Error::Fetch`]
    async fn fetch(&self, url: &Url, credentials: Option<&Credentials>) -> Result<Vec<u8>, Error>;
}
