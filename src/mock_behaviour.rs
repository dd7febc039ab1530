//! This module provides a mocked origin, that can be told to return errors on some fetches

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use url::Url;

use crate::error::Error;
use crate::origin::Credentials;
use crate::traits::OriginFetcher;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    pub fetch_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            fetch_behaviour: (0, n_fails),
        }
    }

    pub fn can_fetch(&mut self) -> Result<(), Error> {
        decrement(&mut self.fetch_behaviour, "fetch")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), Error> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(Error::Fetch(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value)))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}


/// An [`OriginFetcher`] that serves a content set by the test, and fails according to its [`MockBehaviour`]
#[derive(Debug, Default)]
pub struct MockOrigin {
    content: Mutex<Vec<u8>>,
    behaviour: Mutex<MockBehaviour>,
    n_fetches: AtomicU32,
}

impl MockOrigin {
    pub fn new<C: Into<Vec<u8>>>(content: C) -> Self {
        Self {
            content: Mutex::new(content.into()),
            ..Self::default()
        }
    }

    /// Change what the next fetches will return
    pub fn set_content<C: Into<Vec<u8>>>(&self, content: C) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = content.into();
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *self.behaviour.lock().unwrap_or_else(PoisonError::into_inner) = behaviour;
    }

    /// How many fetches have been attempted so far, successful or not
    pub fn fetch_count(&self) -> u32 {
        self.n_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OriginFetcher for MockOrigin {
    async fn fetch(&self, _url: &Url, _credentials: Option<&Credentials>) -> Result<Vec<u8>, Error> {
        self.n_fetches.fetch_add(1, Ordering::SeqCst);
        self.behaviour.lock().unwrap_or_else(PoisonError::into_inner).can_fetch()?;
        Ok(self.content.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_fetch().is_ok());
        assert!(ok.can_fetch().is_ok());
        assert!(ok.can_fetch().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch().is_err());
        assert!(now.can_fetch().is_err());
        assert!(now.can_fetch().is_ok());
        assert!(now.can_fetch().is_ok());

        let mut custom = MockBehaviour{
            fetch_behaviour: (1,2),
        };
        assert!(custom.can_fetch().is_ok());
        assert!(custom.can_fetch().is_err());
        assert!(custom.can_fetch().is_err());
        assert!(custom.can_fetch().is_ok());
    }

    #[tokio::test]
    async fn test_mock_origin() {
        let url: Url = "https://calendar.example.com/feed.ics".parse().unwrap();
        let origin = MockOrigin::new("first");
        assert_eq!(origin.fetch(&url, None).await.unwrap(), b"first");

        origin.set_content("second");
        origin.set_behaviour(MockBehaviour::fail_now(1));
        assert!(matches!(origin.fetch(&url, None).await, Err(Error::Fetch(_))));
        assert_eq!(origin.fetch(&url, None).await.unwrap(), b"second");
        assert_eq!(origin.fetch_count(), 3);
    }
}
