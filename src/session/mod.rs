//! Sessions and flash messages.
//!
//! A session is nothing more than an opaque id carried in the `sid` cookie.
//! The only per-session state is a single flash slot held server-side in
//! [`FlashStore`].

pub mod flash;
pub mod layer;

pub use flash::FlashStore;
pub use layer::{SessionId, SessionLayer, SessionService, SESSION_COOKIE};
