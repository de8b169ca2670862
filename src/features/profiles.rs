//! Profiles and friend suggestions.

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::{FriendSuggestion, Profile};
use crate::remote::{RemoteBackend, Result};

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Profile ==
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Profile> {
        let key = keys::profile(user_id);
        if let Some(profile) = self.cache.get::<Profile>(StoreName::Profiles, &key).await {
            return Ok(profile);
        }

        let profile = self.remote.fetch_profile(user_id).await?;
        self.cache
            .put(StoreName::Profiles, CacheRecord::new(key, &profile))
            .await;
        Ok(profile)
    }

    // == Fetch Friend Suggestions ==
    /// People the user may know, cached per requested limit.
    pub async fn fetch_friend_suggestions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<FriendSuggestion>> {
        let key = keys::friend_suggestions(user_id, limit);
        if let Some(suggestions) = self
            .cache
            .get::<Vec<FriendSuggestion>>(StoreName::Profiles, &key)
            .await
        {
            return Ok(suggestions);
        }

        let suggestions = self.remote.fetch_friend_suggestions(user_id, limit).await?;
        self.cache
            .put(StoreName::Profiles, CacheRecord::new(key, &suggestions))
            .await;
        Ok(suggestions)
    }
}
