//! Resource fetcher for the Quran Majeed services
//!
//! This crate wraps the third-party REST providers the application reads
//! from and guarantees that every call produces a renderable record:
//!
//! - **Geolocation**: approximate city and coordinates (ipinfo.io)
//! - **Quran text and audio metadata**: editions, surah index, juz, surah
//!   and single verses (alquran.cloud)
//! - **Prayer times**: daily timings for a city (aladhan.com)
//! - **Names of God**: the 99 names list (aladhan CDN)
//!
//! A failed call (connection error, timeout, non-success status, or a body
//! that does not decode or validate) is replaced by a static record of the
//! same shape. The result is tagged [`Source::Live`] or [`Source::Fallback`]
//! so the caller can tell them apart if it cares to.
//!
//! # Example
//!
//! ```no_run
//! use qmfetch::{ResourceClient, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ResourceClient::new().await?;
//!
//!     let juz = client.juz(30, "quran-uthmani").await;
//!     if juz.source == Source::Fallback {
//!         println!("Offline, showing the opening verses");
//!     }
//!     for ayah in &juz.payload.ayahs {
//!         println!("{}", ayah.text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration Extension
//!
//! With the `qmconfig` feature (enabled by default), endpoints and timeouts
//! come from the shared configuration through [`FetcherConfigExt`].
//!
//! # Server Extension
//!
//! The `server` feature mounts the `/api/quran/*` routes on a
//! `qmserver::Server` through `QuranApiExt`.

pub mod client;
pub mod error;
pub mod fallback;
pub mod models;
pub mod result;
pub mod validate;

#[cfg(feature = "qmconfig")]
pub mod config_ext;

#[cfg(feature = "server")]
mod api_rest;
#[cfg(feature = "server")]
pub mod qmserver_ext;
#[cfg(feature = "server")]
mod qmserver_impl;

pub use client::{
    ClientBuilder, Endpoints, ResourceClient, VerseSet, AYAH_COUNT, DEFAULT_CALCULATION_METHOD,
    DEFAULT_JUZ_EDITION, DEFAULT_TEXT_EDITION, URDU_EDITION,
};
pub use error::{Error, FailureKind, Result};
pub use models::*;
pub use result::{FetchResult, OrFallback, Source};
pub use validate::Validate;

#[cfg(feature = "qmconfig")]
pub use config_ext::FetcherConfigExt;

#[cfg(feature = "server")]
pub use qmserver_ext::{QuranApiExt, QuranState};
