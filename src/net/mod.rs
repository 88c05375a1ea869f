//! Networking modules for the license backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the interceptor pipeline, `api` is the typed endpoint
//! facade pages call, `transport` abstracts the browser `fetch`, `signal`
//! carries 401s to the session context, and `types` defines the wire schema.

pub mod api;
pub mod client;
pub mod error;
pub mod signal;
pub mod transport;
pub mod types;
