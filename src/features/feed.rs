//! Feed pages, single posts and likes.

use tracing::debug;

use super::{keys, SocialClient};
use crate::cache::{CacheRecord, StoreName};
use crate::models::{LikeState, Post};
use crate::remote::{RemoteBackend, Result};

impl<R: RemoteBackend> SocialClient<R> {
    // == Fetch Feed ==
    /// One page of the user's feed.
    ///
    /// The page is cached under its pagination key; each post is also
    /// cached on its own so `fetch_post` can hit.
    pub async fn fetch_feed(
        &self,
        user_id: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<Vec<Post>> {
        let key = keys::feed_page(user_id, page_size, offset);
        if let Some(posts) = self.cache.get::<Vec<Post>>(StoreName::Posts, &key).await {
            return Ok(posts);
        }

        let posts = self.remote.fetch_feed(user_id, page_size, offset).await?;

        self.cache
            .put(StoreName::Posts, CacheRecord::new(key, &posts))
            .await;
        let singles: Vec<_> = posts
            .iter()
            .map(|post| CacheRecord::new(keys::post(&post.id), post))
            .collect();
        self.cache.put_many(StoreName::Posts, singles).await;

        Ok(posts)
    }

    // == Fetch Post ==
    pub async fn fetch_post(&self, post_id: &str) -> Result<Post> {
        let key = keys::post(post_id);
        if let Some(post) = self.cache.get::<Post>(StoreName::Posts, &key).await {
            return Ok(post);
        }

        let post = self.remote.fetch_post(post_id).await?;
        self.cache
            .put(StoreName::Posts, CacheRecord::new(key, &post))
            .await;
        Ok(post)
    }

    // == Toggle Like ==
    /// Likes or unlikes a post.
    ///
    /// Cached posts embed like counts, so on success every feed page and
    /// the post itself are dropped from the cache.
    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<LikeState> {
        let state = self.remote.toggle_like(post_id, user_id).await?;

        let pages = self
            .cache
            .invalidate_prefix(StoreName::Posts, keys::FEED_PREFIX)
            .await;
        self.cache
            .delete(StoreName::Posts, &keys::post(post_id))
            .await;
        debug!(post_id, pages, "Invalidated feed after like toggle");

        Ok(state)
    }
}
