//! The HTTP side of the proxy
//!
//! Two calendars are served, each one at a path that acts as a capability token:
//! * the full calendar, at `/<sha512(secret + origin id)>.ics`,
//! * the free/busy calendar, at `/<origin id>.ics`.
//!
//! Anyone who knows the origin URL can compute the free/busy path, but the full calendar also requires the secret.
//! There is no expiry nor revocation: changing the secret (or the origin URL) is the only way to invalidate a path.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::cache::Cache;
use crate::origin::Origin;
use crate::utils::sha512_hex;

/// Media type of both served calendars
pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

/// The token that gives access to the full calendar
pub fn full_token(secret: &str, origin_id: &str) -> String {
    sha512_hex(format!("{}{}", secret, origin_id).as_bytes())
}

/// The token that gives access to the free/busy calendar
pub fn free_token(origin_id: &str) -> String {
    origin_id.to_string()
}

/// Serves the published snapshots of a [`Cache`]
#[derive(Clone)]
pub struct Gateway {
    full_token: String,
    free_token: String,
    cache: Arc<Cache>,
}

impl Gateway {
    pub fn new(secret: &str, origin: &Origin, cache: Arc<Cache>) -> Self {
        Self {
            full_token: full_token(secret, origin.id()),
            free_token: free_token(origin.id()),
            cache,
        }
    }

    /// Path of the full calendar
    pub fn full_path(&self) -> String {
        format!("/{}.ics", self.full_token)
    }

    /// Path of the free/busy calendar
    pub fn free_busy_path(&self) -> String {
        format!("/{}.ics", self.free_token)
    }

    /// Any other path is a 404
    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.full_path(), get(serve_calendar))
            .route(&self.free_busy_path(), get(serve_free_busy))
            .with_state(Arc::clone(&self.cache))
    }

    /// Serve until the listener fails
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        let app = self.router().into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app).await
    }
}

async fn serve_calendar(
    State(cache): State<Arc<Cache>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    log::info!("valid calendar request from {}", peer);
    let snapshot = cache.current();
    ([(CONTENT_TYPE, CALENDAR_CONTENT_TYPE)], snapshot.raw().to_vec())
}

async fn serve_free_busy(
    State(cache): State<Arc<Cache>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    log::info!("valid free/busy request from {}", peer);
    let snapshot = cache.current();
    ([(CONTENT_TYPE, CALENDAR_CONTENT_TYPE)], snapshot.free_busy().to_string())
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tokens_are_deterministic() {
        assert_eq!(full_token("secret", "abc"), full_token("secret", "abc"));
        assert_eq!(free_token("abc"), "abc");
    }

    #[test]
    fn test_full_token_depends_on_secret_and_origin() {
        let reference = full_token("secret", "abc");
        assert_ne!(reference, full_token("other secret", "abc"));
        assert_ne!(reference, full_token("secret", "abd"));
        assert_eq!(reference, sha512_hex(b"secretabc"));
    }

    #[test]
    fn test_full_token_depends_on_origin_address() {
        let first = Origin::parse("https://calendar.example.com/a.ics").unwrap();
        let second = Origin::parse("https://calendar.example.com/b.ics").unwrap();
        assert_ne!(full_token("secret", first.id()), full_token("secret", second.id()));
        assert_ne!(free_token(first.id()), free_token(second.id()));
    }
}
