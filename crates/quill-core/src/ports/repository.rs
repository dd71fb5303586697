use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining the point operations every store supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or replace by key). Durable once this returns.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
///
/// Listings are ordered by creation time, ties broken by id.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts, at most `limit` of them when given.
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError>;

    /// Posts attributed to `owner_id`.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, RepoError>;
}

/// Sort key shared by every store so listings agree across backends.
pub fn listing_order(a: &Post, b: &Post) -> std::cmp::Ordering {
    a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id))
}
