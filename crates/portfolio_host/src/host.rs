//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    BlobStore, ExternalUrlService, MemoryBlobStore, NoopExternalUrlService, WebExternalUrlService,
    WebLocalStorage,
};

/// Runtime-selected host services handed to the desktop provider.
///
/// Service selection happens before this bundle reaches the runtime, so runtime code never
/// branches on the target environment.
#[derive(Clone)]
pub struct HostServices {
    /// Durable key/value store for layout persistence.
    pub storage: Rc<dyn BlobStore>,
    /// Opener for links that leave the desktop.
    pub external_urls: Rc<dyn ExternalUrlService>,
}

impl HostServices {
    /// Browser composition: `localStorage` persistence and `window.open` navigation.
    pub fn browser() -> Self {
        Self {
            storage: Rc::new(WebLocalStorage),
            external_urls: Rc::new(WebExternalUrlService),
        }
    }

    /// Isolated composition for tests and previews; nothing leaves the process.
    pub fn in_memory() -> Self {
        Self::with_storage(MemoryBlobStore::default())
    }

    /// Uses `storage` for persistence and ignores external navigation.
    pub fn with_storage(storage: impl BlobStore + 'static) -> Self {
        Self {
            storage: Rc::new(storage),
            external_urls: Rc::new(NoopExternalUrlService),
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }
}
