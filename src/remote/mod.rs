//! Remote collaborators
//!
//! The backend-as-a-service and plain HTTP blob reads, consumed through
//! traits so the cache-aware wrappers can be exercised without a network.

mod blob;
mod error;

use async_trait::async_trait;

use crate::models::{
    FriendSuggestion, Group, LikeState, Message, MessageDraft, Notification, Post, Profile, Story,
};

pub use blob::{BlobFetcher, HttpBlobFetcher};
pub use error::{BackendError, Result};

/// Request/response contract of the remote data backend.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// One page of a user's feed, newest first.
    async fn fetch_feed(&self, user_id: &str, page_size: usize, offset: usize)
        -> Result<Vec<Post>>;

    async fn fetch_post(&self, post_id: &str) -> Result<Post>;

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile>;

    /// Messages exchanged between two users, oldest first.
    async fn fetch_conversation(&self, user_id: &str, peer_id: &str) -> Result<Vec<Message>>;

    async fn send_message(&self, draft: &MessageDraft) -> Result<Message>;

    /// Unexpired stories visible to `user_id`.
    async fn fetch_stories(&self, user_id: &str) -> Result<Vec<Story>>;

    async fn fetch_groups_created_by(&self, user_id: &str) -> Result<Vec<Group>>;

    async fn fetch_friend_suggestions(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<FriendSuggestion>>;

    async fn fetch_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    /// Likes or unlikes a post on behalf of `user_id`.
    async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<LikeState>;
}
