//! Domain entities and admin API response models.

pub mod entities;
pub mod responses;

pub use entities::{
    FriendSuggestion, Group, LikeState, Message, MessageDraft, Notification, Post, Profile, Story,
};
pub use responses::{
    ClearResponse, GetResponse, HealthResponse, ListResponse, StatsResponse, StoreStatsResponse,
    SweepResponse,
};
