//! Cache key derivation
//!
//! Every composite key used by the fetch wrappers is built here, so
//! invalidation by prefix and lookups always agree on the format.

/// Prefix shared by every cached feed page.
pub const FEED_PREFIX: &str = "feed:";

/// Feed page: `feed:{user_id}:{page_size}:{offset}`
pub fn feed_page(user_id: &str, page_size: usize, offset: usize) -> String {
    format!("{}{}:{}:{}", FEED_PREFIX, user_id, page_size, offset)
}

/// Individual post, keyed by its id.
pub fn post(post_id: &str) -> String {
    post_id.to_string()
}

/// Profile, keyed by user id.
pub fn profile(user_id: &str) -> String {
    user_id.to_string()
}

/// Conversation between two users: `conversation:{a}:{b}` with the ids
/// ordered, so both participants derive the same key.
pub fn conversation(user_id: &str, peer_id: &str) -> String {
    let (a, b) = if user_id <= peer_id {
        (user_id, peer_id)
    } else {
        (peer_id, user_id)
    };
    format!("conversation:{}:{}", a, b)
}

/// Stories visible to a user: `stories:{user_id}`
pub fn stories(user_id: &str) -> String {
    format!("stories:{}", user_id)
}

/// Friend suggestions: `suggestions:{user_id}:{limit}`
pub fn friend_suggestions(user_id: &str, limit: usize) -> String {
    format!("suggestions:{}:{}", user_id, limit)
}

/// Ids of the groups a user created: `groups:{user_id}`
pub fn groups_created_by(user_id: &str) -> String {
    format!("groups:{}", user_id)
}

/// Notifications list, keyed by user id.
pub fn notifications(user_id: &str) -> String {
    user_id.to_string()
}
