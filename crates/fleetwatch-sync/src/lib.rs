//! Sync layer: pulls raw regulatory records from the ingestion service.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{FeedClient, SyncError};
