//! Icon layout persistence.
//!
//! The icon map never writes on its own; the runtime provider calls these helpers when the
//! reducer asks for it. Blobs go through the host's typed JSON helpers. Writes are best effort
//! and last-write-wins.

use std::collections::BTreeMap;

use portfolio_host::{load_json_with, save_json_with, BlobStore, HostError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::icon_layout::{IconPosition, IconPositions};

/// Storage key holding the icon layout blob.
pub const ICON_LAYOUT_KEY: &str = "desktop-icon-positions";
/// Version written into every saved layout; other versions are rejected on load.
pub const ICON_LAYOUT_SCHEMA_VERSION: u32 = 1;

/// Why a saved icon layout could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store failed, or the blob was not valid JSON.
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("icon layout schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: u32, found: u32 },
}

/// Versioned on-disk form of [`IconPositions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconLayoutSnapshot {
    pub schema_version: u32,
    pub grid_size: u32,
    pub positions: BTreeMap<String, IconPosition>,
}

impl IconLayoutSnapshot {
    /// Captures the current layout at the current schema version.
    pub fn capture(icons: &IconPositions) -> Self {
        Self {
            schema_version: ICON_LAYOUT_SCHEMA_VERSION,
            grid_size: icons.grid_size(),
            positions: icons.positions().clone(),
        }
    }

    /// Turns a loaded snapshot back into an icon map.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SchemaMismatch`] for any other schema version.
    pub fn restore(self) -> Result<IconPositions, PersistenceError> {
        if self.schema_version != ICON_LAYOUT_SCHEMA_VERSION {
            return Err(PersistenceError::SchemaMismatch {
                expected: ICON_LAYOUT_SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        Ok(IconPositions::from_parts(self.grid_size, self.positions))
    }
}

/// Loads the saved icon layout, or `None` when nothing was saved yet.
pub async fn load_icon_layout<S: BlobStore + ?Sized>(
    store: &S,
) -> Result<Option<IconPositions>, PersistenceError> {
    match load_json_with::<S, IconLayoutSnapshot>(store, ICON_LAYOUT_KEY).await? {
        Some(snapshot) => snapshot.restore().map(Some),
        None => Ok(None),
    }
}

pub async fn persist_icon_layout<S: BlobStore + ?Sized>(
    store: &S,
    icons: &IconPositions,
) -> Result<(), PersistenceError> {
    save_json_with(store, ICON_LAYOUT_KEY, &IconLayoutSnapshot::capture(icons)).await?;
    Ok(())
}

/// Removes the saved layout so the next boot starts from the default cells.
pub async fn clear_icon_layout<S: BlobStore + ?Sized>(store: &S) -> Result<(), PersistenceError> {
    store.delete_blob(ICON_LAYOUT_KEY).await?;
    Ok(())
}
