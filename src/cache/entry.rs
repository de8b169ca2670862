//! Cache Entry Module
//!
//! Defines the record handed to the cache and the envelope it is stored in.

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Cache Record ==
/// A keyed payload as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheRecord<T> {
    /// Natural id or derived composite key
    pub key: String,
    /// The data to cache
    pub payload: T,
}

impl<T> CacheRecord<T> {
    pub fn new(key: impl Into<String>, payload: T) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }
}

// == Payload ==
/// What a stored record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Structured data from one of the entity stores
    Json(serde_json::Value),
    /// Raw bytes from the image store
    #[serde(with = "blob_base64")]
    Blob(Bytes),
}

// == Stored Record ==
/// The envelope persisted by a backend.
///
/// `stored_at` exists only for expiration and is never handed back to
/// callers of the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub key: String,
    pub payload: Payload,
    pub stored_at: DateTime<Utc>,
}

impl StoredRecord {
    // == Constructor ==
    pub fn new(key: impl Into<String>, payload: Payload, stored_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            payload,
            stored_at,
        }
    }

    // == Age ==
    /// Time elapsed since the record was stored, as seen at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    // == Is Expired ==
    /// Checks whether the record has outlived `window`.
    ///
    /// A record aged exactly `window` is still fresh; it expires once its
    /// age is strictly greater.
    pub fn is_expired(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) > window
    }

    /// Remaining freshness, or zero once expired.
    pub fn remaining(&self, window: Duration, now: DateTime<Utc>) -> Duration {
        let left = window - self.age(now);
        if left > Duration::zero() {
            left
        } else {
            Duration::zero()
        }
    }
}

/// Base64 encoding for blob payloads so they survive a JSON envelope.
mod blob_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}
