//! Stories.

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::Story;
use crate::remote::{RemoteBackend, Result};

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Stories ==
    pub async fn fetch_stories(&self, user_id: &str) -> Result<Vec<Story>> {
        let key = keys::stories(user_id);
        if let Some(stories) = self.cache.get::<Vec<Story>>(StoreName::Stories, &key).await {
            return Ok(stories);
        }

        let stories = self.remote.fetch_stories(user_id).await?;
        self.cache
            .put(StoreName::Stories, CacheRecord::new(key, &stories))
            .await;
        Ok(stories)
    }
}
