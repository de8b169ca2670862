//! Direct messages.

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::{Message, MessageDraft};
use crate::remote::{RemoteBackend, Result};

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Conversation ==
    /// Messages between `user_id` and `peer_id`. Both participants share
    /// one cached copy.
    pub async fn fetch_conversation(&self, user_id: &str, peer_id: &str) -> Result<Vec<Message>> {
        let key = keys::conversation(user_id, peer_id);
        if let Some(messages) = self
            .cache
            .get::<Vec<Message>>(StoreName::Messages, &key)
            .await
        {
            return Ok(messages);
        }

        let messages = self.remote.fetch_conversation(user_id, peer_id).await?;
        self.cache
            .put(StoreName::Messages, CacheRecord::new(key, &messages))
            .await;
        Ok(messages)
    }

    // == Send Message ==
    /// Sends a message and drops the cached conversation so the next read
    /// includes it.
    pub async fn send_message(&self, draft: &MessageDraft) -> Result<Message> {
        let message = self.remote.send_message(draft).await?;
        self.cache
            .delete(
                StoreName::Messages,
                &keys::conversation(&draft.sender_id, &draft.receiver_id),
            )
            .await;
        Ok(message)
    }
}
