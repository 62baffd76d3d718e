//! Para playback and per-listener state
//!
//! - [`session`]: the single-slot state machine (`Idle`, `Playing`,
//!   `Blocked`) as a pure transition function
//! - [`controller`]: a logged, stateful wrapper and the render view
//! - [`counter`]: the daily durood tally
//! - [`registry`]: UUID-keyed sessions shared by the HTTP handlers, dropped
//!   after an idle timeout
//!
//! The `qmconfig` feature reads that timeout from `player.session_ttl_secs`.
//! The `server` feature adds `PlayerApiExt`, which mounts the player and
//! durood routes with their OpenAPI documentation on a `qmserver::Server`.
//!
//! ```
//! use qmplayback::{PlaybackController, Catalog, ResourceId};
//!
//! let mut player = PlaybackController::new(Catalog::paras());
//! player.select(ResourceId(5));
//! let view = player.select(ResourceId(12));
//! assert_eq!(
//!     view.notification.as_deref(),
//!     Some("Please stop the current Para 5 before playing Para 12.")
//! );
//! ```

pub mod controller;
pub mod counter;
pub mod error;
pub mod registry;
pub mod session;

#[cfg(feature = "qmconfig")]
pub mod config_ext;

#[cfg(feature = "server")]
pub mod api_rest;
#[cfg(feature = "server")]
pub mod qmserver_ext;

pub use controller::{PlaybackController, PlaybackView};
pub use counter::{DuroodCounter, DuroodView, DEFAULT_DAILY_GOAL};
pub use error::{Result, SessionError};
pub use registry::{
    SessionId, SessionInfo, SessionRegistry, UserSession, DEFAULT_SESSION_TTL_SECS,
};
pub use session::{
    transition, Catalog, PlaybackEvent, PlaybackSession, PlaybackState, ResourceId, PARA_COUNT,
};

#[cfg(feature = "qmconfig")]
pub use config_ext::PlayerConfigExt;
#[cfg(feature = "server")]
pub use qmserver_ext::{PlayerApiExt, PlayerState};
