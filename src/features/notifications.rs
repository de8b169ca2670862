//! Notifications.

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::Notification;
use crate::remote::{RemoteBackend, Result};

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Notifications ==
    pub async fn fetch_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let key = keys::notifications(user_id);
        if let Some(notifications) = self
            .cache
            .get::<Vec<Notification>>(StoreName::Notifications, &key)
            .await
        {
            return Ok(notifications);
        }

        let notifications = self.remote.fetch_notifications(user_id).await?;
        self.cache
            .put(StoreName::Notifications, CacheRecord::new(key, &notifications))
            .await;
        Ok(notifications)
    }
}
