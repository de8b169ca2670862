//! Cache Module
//!
//! Local cache partitioned into named stores, each with its own TTL window,
//! plus a blob cache for images.

pub mod backend;
mod clock;
mod entry;
mod image;
mod stats;
mod store;
mod store_name;


// Re-export public types
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheRecord, Payload, StoredRecord};
pub use image::ImageSource;
pub use stats::CacheStats;
pub use store::LocalCache;
pub use store_name::StoreName;

// == Public Constants ==
/// Maximum allowed key length in bytes; image URLs are keys too
pub const MAX_KEY_LENGTH: usize = 2048;

/// Largest image blob the cache will hold
pub const MAX_BLOB_SIZE: usize = 10 * 1024 * 1024; // 10 MB
