//! Sample posts for a fresh store.

use chrono::{Duration, Utc};

use quill_core::domain::{Caller, Post, PostId};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

const DEMO_POSTS: [(&str, &str, &str); 2] = [
    (
        "The quick brown fox",
        "A short story about a fox, a dog and a great deal of jumping.",
        "https://images.unsplash.com/photo-1634534904807-b676da34dc79?fit=crop&h=150&w=200",
    ),
    (
        "Notes on writing every day",
        "Small drafts, saved often, add up to finished pieces.",
        "https://images.unsplash.com/photo-1636654286371-a2496896eb6d?fit=crop&h=150&w=200",
    ),
];

/// Insert the demo posts when the store holds nothing yet.
///
/// Returns how many posts were written.
pub async fn seed_demo_posts(
    repo: &dyn PostRepository,
    caller: &Caller,
) -> Result<usize, RepoError> {
    if !repo.list(Some(1)).await?.is_empty() {
        tracing::debug!("Store already has posts, skipping demo seed");
        return Ok(0);
    }

    let base = Utc::now();
    for (i, (title, body, image)) in DEMO_POSTS.iter().enumerate() {
        let mut post = Post::new(
            PostId::from(format!("demo-{i}")),
            caller,
            title.to_string(),
            body.to_string(),
            Some(image.to_string()),
        );
        post.created_at = base + Duration::milliseconds(i as i64);
        post.updated_at = post.created_at;
        repo.save(post).await?;
    }

    tracing::info!(count = DEMO_POSTS.len(), "Seeded demo posts");
    Ok(DEMO_POSTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryPostRepository;

    #[tokio::test]
    async fn test_seeds_only_an_empty_store() {
        let repo = InMemoryPostRepository::new();
        let caller = Caller::new("owner", "Owner");

        assert_eq!(seed_demo_posts(&repo, &caller).await.unwrap(), 2);
        assert_eq!(seed_demo_posts(&repo, &caller).await.unwrap(), 0);

        let posts = repo.list(None).await.unwrap();
        assert_eq!(posts[0].id.as_str(), "demo-0");
        assert_eq!(posts[1].id.as_str(), "demo-1");
    }
}
