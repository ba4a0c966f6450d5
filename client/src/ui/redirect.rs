//! Role-appropriate login redirect selection.
//!
//! Both the session client and the asset loader send expired sessions back to
//! a login page. Which one depends only on the current page's path, so the
//! rule lives here as a pure function with the scheduling wrapper next to it.

use crate::ui::Navigator;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Path segment marking the administrative section of the site.
pub const ADMIN_SECTION_MARKER: &str = "/admin/";

pub const ADMIN_LOGIN_PAGE: &str = "/pages/admin/login.html";
pub const CLIENT_LOGIN_PAGE: &str = "/pages/client/login.html";

/// Login page to redirect to from `current_path`, or `None` when the current
/// page already is the target login page (never redirect a login page onto
/// itself).
pub fn login_destination(current_path: &str) -> Option<&'static str> {
    let target = if current_path.contains(ADMIN_SECTION_MARKER) {
        ADMIN_LOGIN_PAGE
    } else {
        CLIENT_LOGIN_PAGE
    };
    if current_path.contains(target) {
        None
    } else {
        Some(target)
    }
}

/// Schedules a deferred redirect to the role-appropriate login page, leaving
/// the delay for the session-expired notification to be seen. The destination
/// is computed when the delay elapses, so a page that has meanwhile navigated
/// to a login page is not redirected again.
pub fn schedule_login_redirect(navigator: Arc<dyn Navigator>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let current = navigator.current_path();
        match login_destination(&current) {
            Some(target) => navigator.goto(target),
            None => debug!("Already on {}, skipping login redirect", current),
        }
    });
}
