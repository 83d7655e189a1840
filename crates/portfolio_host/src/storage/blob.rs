//! Blob storage trait plus the no-op and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

use crate::HostError;

/// Object-safe boxed future used by [`BlobStore`] async methods.
pub type BlobStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Best-effort durable key/value store holding text blobs.
///
/// Writes are last-write-wins. No consistency is promised between a write and the in-memory state
/// that produced it.
pub trait BlobStore {
    /// Loads the blob stored under `key`, or `None` when nothing was saved.
    fn load_blob<'a>(
        &'a self,
        key: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<String>, HostError>>;

    /// Replaces the blob stored under `key`.
    fn save_blob<'a>(
        &'a self,
        key: &'a str,
        blob: &'a str,
    ) -> BlobStoreFuture<'a, Result<(), HostError>>;

    /// Removes the blob stored under `key`. Removing an absent key succeeds.
    fn delete_blob<'a>(&'a self, key: &'a str) -> BlobStoreFuture<'a, Result<(), HostError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that forgets everything; loads always come back empty.
pub struct NoopBlobStore;

impl BlobStore for NoopBlobStore {
    fn load_blob<'a>(
        &'a self,
        _key: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<String>, HostError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_blob<'a>(
        &'a self,
        _key: &'a str,
        _blob: &'a str,
    ) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_blob<'a>(&'a self, _key: &'a str) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Process-local store; clones share the same map.
pub struct MemoryBlobStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no key is held.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load_blob<'a>(
        &'a self,
        key: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<String>, HostError>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_blob<'a>(
        &'a self,
        key: &'a str,
        blob: &'a str,
    ) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), blob.to_string());
            Ok(())
        })
    }

    fn delete_blob<'a>(&'a self, key: &'a str) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a JSON value through any [`BlobStore`].
///
/// # Errors
///
/// Returns an error when the store read fails or the blob is not valid JSON for `T`.
pub async fn load_json_with<S: BlobStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, HostError> {
    let Some(raw) = store.load_blob(key).await? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Serializes a value to JSON and saves it through any [`BlobStore`].
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn save_json_with<S: BlobStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), HostError> {
    let raw = serde_json::to_string(value)?;
    store.save_blob(key, &raw).await
}
