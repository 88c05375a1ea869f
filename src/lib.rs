//! # license-console
//!
//! Leptos + WASM admin/customer console for a license-management REST
//! backend.
//!
//! This crate contains the session and credential layer, the typed HTTP
//! client with its 401 signal, route guards, and the admin and customer
//! pages. Browser bindings (`localStorage`, `gloo-net`, `location`) sit
//! behind the `csr` feature; everything else builds and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialised");
    }
    leptos::mount::mount_to_body(app::App);
}
