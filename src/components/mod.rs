//! Shared UI components.
//!
//! ARCHITECTURE
//! ============
//! Components read session state from context and never call the backend
//! themselves; pages own fetching.

pub mod form_dialog;
pub mod layout;
pub mod loading;
pub mod notice_bar;
pub mod route_guard;
pub mod session_provider;
