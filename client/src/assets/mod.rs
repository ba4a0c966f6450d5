//! Authenticated image loading.
//!
//! Image elements cannot attach an `Authorization` header to their own fetch,
//! so token-gated images are fetched here and shown through a local object
//! URL instead. The loader handles slots present at initial render
//! ([`AssetLoader::resolve_many`]) and slots attached later by dynamic page
//! updates (the feed consumed by [`AssetLoader::start`]).

pub mod object_url;
pub mod slot;

pub use object_url::ObjectUrlRegistry;
pub use slot::{ImageSlot, SlotReceiver, SlotSender, slot_feed};

use crate::config::Config;
use crate::errors::ClientResult;
use crate::session::SessionStore;
use crate::ui::redirect::schedule_login_redirect;
use crate::ui::{Navigator, Notifier, SESSION_EXPIRED_MESSAGE};
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Shown while the authenticated fetch is in flight.
pub const LOADING_PLACEHOLDER: &str = "/images/loading.gif";
/// Shown when the image cannot be fetched.
pub const FALLBACK_IMAGE: &str = "/images/default-product.jpg";

/// Fetches token-gated images and swaps them into their slots.
pub struct AssetLoader {
    http: Client,
    base_url: String,
    redirect_delay: Duration,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    registry: Arc<ObjectUrlRegistry>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl AssetLoader {
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;

        Ok(AssetLoader {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            redirect_delay: config.redirect_delay(),
            store,
            notifier,
            navigator,
            registry: Arc::new(ObjectUrlRegistry::new()),
            watcher: Mutex::new(None),
        })
    }

    /// The object-URL table backing resolved slots. The display layer reads
    /// image bytes through it.
    pub fn registry(&self) -> Arc<ObjectUrlRegistry> {
        Arc::clone(&self.registry)
    }

    /// Resolves one slot. Fire-and-forget: every failure terminates in the
    /// fallback image, nothing propagates to the caller.
    pub async fn resolve(&self, slot: &Arc<ImageSlot>) {
        if !slot.begin_resolve() {
            return;
        }

        // Credentials never travel in the URL; drop any query string the
        // marker may still carry.
        let clean_path = slot
            .deferred_source()
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        if clean_path.is_empty() {
            warn!("Image slot has an empty deferred source");
            slot.set_visible_source(FALLBACK_IMAGE);
            return;
        }

        slot.set_visible_source(LOADING_PLACEHOLDER);

        let Some(session) = self.store.get().await else {
            // An unauthenticated fetch would only produce a 401 the slot
            // cannot act on, so skip the network round trip entirely.
            debug!("No session, showing fallback for {}", clean_path);
            slot.set_visible_source(FALLBACK_IMAGE);
            return;
        };

        let url = format!("{}{}", self.base_url, clean_path);
        let response = match self
            .http
            .get(&url)
            .bearer_auth(&session.token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Image fetch for {} failed: {}", clean_path, e);
                slot.set_visible_source(FALLBACK_IMAGE);
                return;
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            error!("Image fetch for {} was unauthorized", clean_path);
            self.notifier.error(SESSION_EXPIRED_MESSAGE);
            slot.set_visible_source(FALLBACK_IMAGE);
            schedule_login_redirect(Arc::clone(&self.navigator), self.redirect_delay);
            return;
        }
        if !status.is_success() {
            error!("Image fetch for {} failed with status {}", clean_path, status);
            slot.set_visible_source(FALLBACK_IMAGE);
            return;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Image body for {} could not be read: {}", clean_path, e);
                slot.set_visible_source(FALLBACK_IMAGE);
                return;
            }
        };

        let object_url = self.registry.create(bytes.to_vec());
        let registry = Arc::clone(&self.registry);
        let revoke_url = object_url.clone();
        // Revoke once the display layer reports the image loaded, so blobs do
        // not accumulate across many images on long-lived pages.
        slot.on_load(move |_| {
            registry.revoke(&revoke_url);
        });
        slot.set_visible_source(&object_url);
    }

    /// Resolves a batch of slots concurrently (the initial page render path).
    pub async fn resolve_many(&self, slots: &[Arc<ImageSlot>]) {
        join_all(slots.iter().map(|slot| self.resolve(slot))).await;
    }

    /// Starts the attachment watcher: every slot announced on `feed` is
    /// resolved exactly once, covering content injected after initial render.
    pub fn start(self: &Arc<Self>, mut feed: SlotReceiver) {
        let loader = Arc::clone(self);
        let handle = tokio::spawn(async move {
            while let Some(slot) = feed.recv().await {
                loader.resolve(&slot).await;
            }
            debug!("Slot feed closed, watcher exiting");
        });

        let previous = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Tears the attachment watcher down. Already-resolved slots keep their
    /// sources; pending feed entries are dropped.
    pub fn stop(&self) {
        if let Some(handle) = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for AssetLoader {
    fn drop(&mut self) {
        self.stop();
    }
}
