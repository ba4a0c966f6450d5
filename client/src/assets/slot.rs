//! Image slots and the attachment feed.
//!
//! An [`ImageSlot`] is the view-model for one displayed image: it carries the
//! deferred (authenticated) source the loader must fetch, the source currently
//! visible, and one-shot handlers fired when the display layer reports the
//! image loaded. Pages announce freshly attached slots on a feed channel so
//! dynamically rendered content is picked up without manual wiring.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

type LoadHandler = Box<dyn FnOnce(&str) + Send>;

/// One displayed image awaiting (or holding) an authenticated source.
pub struct ImageSlot {
    deferred_source: String,
    visible_source: Mutex<Option<String>>,
    resolve_started: AtomicBool,
    on_load: Mutex<Vec<LoadHandler>>,
}

impl ImageSlot {
    /// Creates a slot whose image must be fetched from `deferred_source`.
    pub fn new(deferred_source: impl Into<String>) -> Arc<Self> {
        Arc::new(ImageSlot {
            deferred_source: deferred_source.into(),
            visible_source: Mutex::new(None),
            resolve_started: AtomicBool::new(false),
            on_load: Mutex::new(Vec::new()),
        })
    }

    /// The authenticated resource path this slot was marked with.
    pub fn deferred_source(&self) -> &str {
        &self.deferred_source
    }

    /// Source currently shown by the display layer, if any has been set.
    pub fn visible_source(&self) -> Option<String> {
        self.visible_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_visible_source(&self, source: &str) {
        *self
            .visible_source
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(source.to_string());
    }

    /// Claims the slot for resolution. Returns `false` when another caller
    /// (manual resolve or the feed worker) already started, so a slot is
    /// fetched at most once.
    pub fn begin_resolve(&self) -> bool {
        !self.resolve_started.swap(true, Ordering::SeqCst)
    }

    /// Registers a one-shot handler fired when the display layer reports the
    /// current image loaded.
    pub fn on_load(&self, handler: impl FnOnce(&str) + Send + 'static) {
        self.on_load
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(handler));
    }

    /// Called by the display layer once the visible image has actually been
    /// rendered. Fires and drops all pending load handlers.
    pub fn mark_loaded(&self) {
        let handlers = mem::take(
            &mut *self
                .on_load
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let source = self.visible_source().unwrap_or_default();
        for handler in handlers {
            handler(&source);
        }
    }
}

pub type SlotSender = mpsc::UnboundedSender<Arc<ImageSlot>>;
pub type SlotReceiver = mpsc::UnboundedReceiver<Arc<ImageSlot>>;

/// Channel on which pages announce freshly attached image slots. The sender
/// side lives with the rendering code; the receiver is handed to
/// `AssetLoader::start`.
pub fn slot_feed() -> (SlotSender, SlotReceiver) {
    mpsc::unbounded_channel()
}
