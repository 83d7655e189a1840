//! `window.localStorage` adapter for [`BlobStore`].
//!
//! The browser API is synchronous, so each future resolves on first poll. On native targets the
//! adapter is inert: loads come back empty and writes are dropped.

use super::blob::{BlobStore, BlobStoreFuture};
use crate::HostError;

#[derive(Debug, Clone, Copy, Default)]
/// Browser blob store backed by `window.localStorage`.
pub struct WebLocalStorage;

impl WebLocalStorage {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, HostError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(HostError::Unavailable("localStorage"))
    }

    fn read(key: &str) -> Result<Option<String>, HostError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .get_item(key)
                .map_err(|e| HostError::Backend(format!("localStorage get_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn write(key: &str, blob: &str) -> Result<(), HostError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(key, blob)
                .map_err(|e| HostError::Backend(format!("localStorage set_item failed: {e:?}")))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, blob);
            Ok(())
        }
    }

    fn remove(key: &str) -> Result<(), HostError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?.remove_item(key).map_err(|e| {
                HostError::Backend(format!("localStorage remove_item failed: {e:?}"))
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl BlobStore for WebLocalStorage {
    fn load_blob<'a>(
        &'a self,
        key: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<String>, HostError>> {
        Box::pin(async move { Self::read(key) })
    }

    fn save_blob<'a>(
        &'a self,
        key: &'a str,
        blob: &'a str,
    ) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async move { Self::write(key, blob) })
    }

    fn delete_blob<'a>(&'a self, key: &'a str) -> BlobStoreFuture<'a, Result<(), HostError>> {
        Box::pin(async move { Self::remove(key) })
    }
}
