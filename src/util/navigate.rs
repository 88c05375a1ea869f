//! Full-page navigation outside the router.
//!
//! The session context uses this after a forced sign-out so that every piece
//! of in-memory page state is dropped along with the credentials.

pub trait Navigator: Send + Sync {
    fn hard_navigate(&self, path: &str);
}

/// `window.location.href = path`.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "csr")]
impl Navigator for BrowserNavigator {
    fn hard_navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

/// Navigator for non-browser builds; only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn hard_navigate(&self, path: &str) {
        log::info!("navigation to {path} skipped outside the browser");
    }
}
