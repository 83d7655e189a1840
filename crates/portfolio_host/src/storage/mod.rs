//! Durable client-side key/value storage contracts and adapters.

pub mod blob;
pub mod local_storage;
