/// HTTP request handlers
pub mod follows;
pub mod health;
pub mod timeline;
pub mod tweets;

use std::sync::Arc;

use crate::services::{FollowService, PostService, TimelineService};

/// Shared handler state
pub struct AppState {
    pub timeline: Arc<TimelineService>,
    pub posts: Arc<PostService>,
    pub follows: Arc<FollowService>,
}
