//! Store Name Module
//!
//! The fixed set of cache partitions and their expiration windows.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

// == Store Name ==
/// A named partition of the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreName {
    Posts,
    Profiles,
    Messages,
    Groups,
    Stories,
    Notifications,
    Images,
}

impl StoreName {
    /// Every store, in a stable order.
    pub const ALL: [StoreName; 7] = [
        StoreName::Posts,
        StoreName::Profiles,
        StoreName::Messages,
        StoreName::Groups,
        StoreName::Stories,
        StoreName::Notifications,
        StoreName::Images,
    ];

    // == Expiration Window ==
    /// How long a record in this store stays fresh.
    ///
    /// Volatile, cheap-to-refetch data gets short windows; slow-changing or
    /// expensive data is kept longer.
    pub fn window(self) -> Duration {
        match self {
            StoreName::Posts => Duration::minutes(5),
            StoreName::Profiles => Duration::minutes(30),
            StoreName::Messages => Duration::minutes(1),
            StoreName::Groups => Duration::minutes(10),
            StoreName::Stories => Duration::minutes(5),
            StoreName::Notifications => Duration::minutes(1),
            StoreName::Images => Duration::hours(24),
        }
    }

    // == Secondary Indexes ==
    /// Payload attributes this store can be queried by.
    ///
    /// Only stores holding one entity per record are indexed; the others
    /// cache whole lists under composite keys.
    pub fn indexes(self) -> &'static [&'static str] {
        match self {
            StoreName::Posts => &["user_id"],
            StoreName::Groups => &["created_by"],
            StoreName::Profiles
            | StoreName::Messages
            | StoreName::Stories
            | StoreName::Notifications
            | StoreName::Images => &[],
        }
    }

    /// Returns true for the blob store.
    pub fn holds_blobs(self) -> bool {
        matches!(self, StoreName::Images)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoreName::Posts => "posts",
            StoreName::Profiles => "profiles",
            StoreName::Messages => "messages",
            StoreName::Groups => "groups",
            StoreName::Stories => "stories",
            StoreName::Notifications => "notifications",
            StoreName::Images => "images",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StoreName::ALL
            .into_iter()
            .find(|store| store.as_str() == s)
            .ok_or_else(|| format!("Unknown store '{}'", s))
    }
}
