/// Business logic layer
///
/// - `timeline`: read path (cache-aside assembly)
/// - `posts`: write path (persist, fan-out invalidation, event emission)
/// - `follows`: follow graph management
pub mod follows;
pub mod posts;
pub mod timeline;

pub use follows::FollowService;
pub use posts::PostService;
pub use timeline::TimelineService;
