//! This module provides a client to fetch an origin feed over HTTP

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use url::Url;

use crate::error::Error;
use crate::origin::Credentials;
use crate::traits::OriginFetcher;

/// Timeout of a whole origin request, when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An [`OriginFetcher`] that GETs the origin feed
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Configuration(format!("unable to build an HTTP client: {}", err)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl OriginFetcher for Client {
    async fn fetch(&self, url: &Url, credentials: Option<&Credentials>) -> Result<Vec<u8>, Error> {
        let mut request = self.http
            .get(url.clone())
            .header(ACCEPT, "text/calendar");
        if let Some(credentials) = credentials {
            request = request.basic_auth(credentials.username(), credentials.password());
        }

        let response = request.send().await?;
        if response.status().is_success() == false {
            return Err(Error::Fetch(format!("Unexpected HTTP status code {:?}", response.status())));
        }

        // No decoding here, the full calendar is served with the very bytes of the origin
        let body = response.bytes().await?;
        log::debug!("Fetched {} bytes from origin", body.len());
        Ok(body.to_vec())
    }
}
