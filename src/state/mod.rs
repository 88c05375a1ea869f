//! Client-side session and page state.
//!
//! DESIGN
//! ======
//! `credentials` persists the token and user, `auth` is the snapshot the UI
//! reads, `session` is the controller that moves between them, `notice` holds
//! transient messages, and `remote` tracks per-page fetches.

pub mod auth;
pub mod credentials;
pub mod notice;
pub mod remote;
pub mod session;
