//! Typed host-service contracts for the portfolio desktop runtime.
//!
//! The runtime never reaches for browser globals directly. Durable storage, external navigation,
//! and clock access are expressed as small traits/helpers here, with browser (`wasm32`) adapters
//! next to inert or in-memory adapters used on native targets and in tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod error;
pub mod external_url;
pub mod host;
pub mod storage;
pub mod time;

pub use error::HostError;
pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService, WebExternalUrlService,
};
pub use host::HostServices;
pub use storage::blob::{
    load_json_with, save_json_with, BlobStore, BlobStoreFuture, MemoryBlobStore, NoopBlobStore,
};
pub use storage::local_storage::WebLocalStorage;
pub use time::{calendar_date, next_monotonic_timestamp_ms, unix_time_ms_now};
