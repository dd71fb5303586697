//! In-memory post store - used for tests and throwaway servers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Post, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, listing_order};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id.clone(), post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(listing_order);
        if let Some(limit) = limit {
            posts.truncate(limit as usize);
        }
        Ok(posts)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| p.is_owned_by(owner_id))
            .cloned()
            .collect();
        posts.sort_by(listing_order);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::Caller;

    fn post(id: &str, owner: &str) -> Post {
        Post::new(
            PostId::from(id),
            &Caller::new(owner, "Someone"),
            "Title".into(),
            "Body".into(),
            None,
        )
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("a", "owner")).await.unwrap();

        let found = repo.find_by_id(&PostId::from("a")).await.unwrap();
        assert_eq!(found.map(|p| p.title), Some("Title".to_string()));
        assert!(repo.find_by_id(&PostId::from("b")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_by_key() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("a", "owner")).await.unwrap();
        let mut edited = post("a", "owner");
        edited.title = "Edited".into();
        repo.save(edited).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Edited");
    }

    #[tokio::test]
    async fn test_list_limit_and_owner_filter() {
        let repo = InMemoryPostRepository::new();
        for (id, owner) in [("a", "me"), ("b", "you"), ("c", "me")] {
            repo.save(post(id, owner)).await.unwrap();
        }

        assert_eq!(repo.list(Some(2)).await.unwrap().len(), 2);
        let mine = repo.find_by_owner("me").await.unwrap();
        let ids: Vec<_> = mine.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"a") && ids.contains(&"c"));
    }
}
