//! Utility helpers shared across console UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure guard decisions, display formatting, and the seams to the browser
//! (navigation, task spawning) that pages and components share.

pub mod auth;
pub mod format;
pub mod navigate;
pub mod task;
