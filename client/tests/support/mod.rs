#![allow(dead_code)]

//! Shared fixtures for the integration suites: a local mock backend and
//! recording doubles for the host-surface seams.

use axum::Router;
use client::net::SessionClient;
use client::session::SessionStore;
use client::ui::{ConfirmPrompt, Navigator, Notifier};
use client::Config;
use std::sync::{Arc, Mutex};

/// Serves `router` on an ephemeral local port and returns the base URL.
pub async fn serve(router: Router) -> String {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test app");
    });
    format!("http://{}", addr)
}

/// Configuration pointed at the mock backend, with a short redirect delay so
/// tests can await the deferred navigation.
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        request_timeout_seconds: 5,
        redirect_delay_ms: 20,
        session_file: std::env::temp_dir().join("ordersys-test-session.json"),
    }
}

pub fn new_client(
    base_url: &str,
    store: Arc<dyn SessionStore>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
) -> SessionClient {
    SessionClient::new(
        test_config(base_url),
        store,
        notifier,
        navigator,
        Arc::new(Confirm(true)),
    )
    .expect("build session client")
}

/// Notifier that records every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Navigator that records navigations and tracks the current path.
#[derive(Debug)]
pub struct RecordingNavigator {
    path: Mutex<String>,
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(initial_path: &str) -> Self {
        RecordingNavigator {
            path: Mutex::new(initial_path.to_string()),
            visited: Mutex::new(Vec::new()),
        }
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn goto(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
        *self.path.lock().unwrap() = path.to_string();
    }
}

/// Fixed-answer confirmation prompt.
#[derive(Debug)]
pub struct Confirm(pub bool);

impl ConfirmPrompt for Confirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
