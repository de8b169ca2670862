//! Cache-aware fetch wrappers
//!
//! Each feature follows the same template: derive a key, try the matching
//! store, and only on a miss call the remote backend and write the result
//! back. Backend errors are returned unchanged; cache trouble never is.

mod feed;
mod groups;
mod messages;
mod notifications;
mod profiles;
mod stories;

pub mod keys;

use std::sync::Arc;

use tracing::info;

use crate::cache::LocalCache;
use crate::remote::RemoteBackend;

// == Social Client ==
/// The client's data layer: a remote backend fronted by the local cache.
pub struct SocialClient<R> {
    cache: Arc<LocalCache>,
    remote: Arc<R>,
}

impl<R> Clone for SocialClient<R> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            remote: self.remote.clone(),
        }
    }
}

impl<R: RemoteBackend> SocialClient<R> {
    pub fn new(cache: Arc<LocalCache>, remote: Arc<R>) -> Self {
        Self { cache, remote }
    }

    pub fn cache(&self) -> &Arc<LocalCache> {
        &self.cache
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    // == Logout ==
    /// Ends the session. Returns only once every store is empty, so nothing
    /// cached for this user can be shown to the next one.
    pub async fn logout(&self) {
        self.cache.clear_all().await;
        info!("Session ended, local cache wiped");
    }
}
