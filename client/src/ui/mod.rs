//! Host-surface seams for user-visible side effects.
//!
//! The session client and asset loader never touch the rendering layer
//! directly; they talk to these traits. The embedding shell wires them to its
//! toast area, its navigation mechanism, and its confirm dialog. The default
//! implementations log through `tracing` so a headless embedding still gets
//! full diagnostics.

pub mod redirect;

use std::sync::{PoisonError, RwLock};
use tracing::{info, warn};

/// Notification shown when any authenticated call comes back 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please sign in again";

/// Transient success/error notifications (toast-style, non-blocking).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Current page location and navigation.
pub trait Navigator: Send + Sync {
    /// Path of the page currently shown, e.g. `/pages/client/cart.html`.
    fn current_path(&self) -> String;
    /// Navigates to another page.
    fn goto(&self, path: &str);
}

/// Blocking yes/no decision point used before destructive actions.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Notifier that writes notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Navigator that tracks the current path in memory and logs navigations.
#[derive(Debug)]
pub struct LogNavigator {
    path: RwLock<String>,
}

impl LogNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        LogNavigator {
            path: RwLock::new(initial_path.into()),
        }
    }
}

impl Navigator for LogNavigator {
    fn current_path(&self) -> String {
        self.path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn goto(&self, path: &str) {
        info!("Navigating to {}", path);
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }
}

/// Prompt that accepts every confirmation. Suitable for non-interactive
/// embeddings; interactive shells provide their own dialog.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
