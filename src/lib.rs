//! This crate republishes a private iCal feed.
//!
//! The calendar of an origin (see [`origin`]) is fetched periodically by a [`client`], and served again at an
//! unguessable address by the [`gateway`]. \
//! A censored "free/busy" version of it is served as well, at a second address. It only tells when events happen,
//! never what they are about (see [`censor`]).
//!
//! Both versions are published together as a [`Snapshot`](cache::Snapshot) in a [`cache`], that a
//! [`Provider`] refreshes on behalf of a [`scheduler`]. In case a refresh fails, the previous snapshot keeps being
//! served.

pub mod traits;

pub mod error;
pub use error::Error;
pub mod ical;
mod calendar;
pub use calendar::Calendar;
mod event;
pub use event::Event;
pub mod origin;
pub use origin::Origin;
pub mod censor;

pub mod client;
pub mod cache;
pub mod provider;
pub use provider::Provider;
pub mod scheduler;
pub mod gateway;

pub mod config;
pub mod mock_behaviour;
pub mod utils;
