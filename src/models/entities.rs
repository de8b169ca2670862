//! Domain entities cached by the client.
//!
//! Field names follow the remote backend's column names so cached payloads
//! can be queried by the same attributes (`user_id`, `created_by`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A feed post with its aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub likes_count: u32,
    pub comments_count: u32,
    /// Whether the viewing user has liked the post
    #[serde(default)]
    pub liked_by_me: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A message that has not been sent yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: String,
    pub member_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub user_id: String,
    pub media_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A suggested friend with the number of friends in common.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendSuggestion {
    pub profile: Profile,
    pub mutual_friends: u32,
}

/// Outcome of toggling a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_optional_fields_default() {
        let json = r#"{
            "id": "p1",
            "user_id": "u1",
            "content": "hi",
            "likes_count": 3,
            "comments_count": 0,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.likes_count, 3);
        assert!(post.image_url.is_none());
        assert!(!post.liked_by_me);
    }

    #[test]
    fn test_group_serializes_index_attribute() {
        let group = Group {
            id: "g1".to_string(),
            name: "Hiking".to_string(),
            description: None,
            created_by: "u1".to_string(),
            member_count: 4,
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["created_by"], "u1");
    }
}
