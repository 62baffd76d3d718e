//! Static devotional content for the Quran Majeed services
//!
//! Paras with their recitation streams, duas, durood, naats, the names of
//! the Prophet, reciter editions and prayer calculation methods, plus the
//! random daily picks and keyword search built on top of them.
//!
//! With the `server` feature, [`ContentApiExt`] mounts the tables under
//! `/api/content` on a `qmserver::Server`.

pub mod audio;
pub mod models;
pub mod random;
pub mod search;
pub mod tables;

#[cfg(feature = "server")]
mod api_rest;
#[cfg(feature = "server")]
pub mod qmserver_ext;

pub use audio::{ayah_audio_url, surah_audio_url};
pub use models::*;
pub use random::{daily, DailyContent};
pub use search::{search, search_duas, search_names_of_muhammad, Searchable};
pub use tables::*;

#[cfg(feature = "server")]
pub use qmserver_ext::ContentApiExt;
