//! Transient user-facing notices (sign-in results, failed actions).
//!
//! SYSTEM CONTEXT
//! ==============
//! Lives at the application root rather than in a page because the route
//! gates unmount the login/signup forms while a request is in flight; a
//! message set there would be lost on remount.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

/// Latest notice, or `None` once dismissed.
#[derive(Clone, Copy, Debug)]
pub struct NoticeBoard(pub RwSignal<Option<Notice>>);

impl NoticeBoard {
    pub fn show(self, notice: Notice) {
        self.0.set(Some(notice));
    }

    pub fn dismiss(self) {
        self.0.set(None);
    }
}

pub fn provide_notices() -> NoticeBoard {
    let board = NoticeBoard(RwSignal::new(None));
    provide_context(board);
    board
}

/// # Panics
///
/// Panics when called outside the application root that provides notices.
pub fn use_notices() -> NoticeBoard {
    use_context::<NoticeBoard>().unwrap_or_else(|| panic!("use_notices called outside App: no NoticeBoard in context"))
}
