//! In-memory object URLs for fetched image bytes.
//!
//! Authenticated images cannot be shown through a plain URL without leaking
//! the credential, so the loader fetches bytes itself and hands the display
//! layer a local handle instead. Handles must be revoked once the image has
//! loaded or long-lived pages accumulate dead blobs.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// Table of live object URLs and their backing bytes.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `bytes` and returns a fresh `blob:` handle for them.
    pub fn create(&self, bytes: Vec<u8>) -> String {
        let url = format!("blob:{}", Uuid::now_v7());
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone(), bytes);
        url
    }

    /// Bytes behind a live handle, or `None` after revocation.
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Drops the handle and its bytes. Returns whether it was still live.
    pub fn revoke(&self, url: &str) -> bool {
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
