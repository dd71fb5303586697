//! Post service - the behaviour behind every GraphQL field.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{Caller, Post, PostFilter, PostId};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// What `update` does with an `id` that no stored post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Reject the update with a not-found error.
    Strict,
    /// Create the post under the supplied id.
    #[default]
    Upsert,
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "upsert" => Ok(Self::Upsert),
            other => Err(format!("unknown update policy `{other}`")),
        }
    }
}

/// Service tunables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound on the `Home` feed.
    pub home_page_size: u64,
    pub update_policy: UpdatePolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            home_page_size: 10,
            update_policy: UpdatePolicy::default(),
        }
    }
}

/// Arguments of the `update` mutation.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    /// `None` keeps the stored image, a blank string removes it.
    pub image: Option<String>,
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    config: ServiceConfig,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn hello(&self, name: Option<&str>) -> String {
        let name = name.filter(|n| !n.is_empty()).unwrap_or("World");
        format!("Hello {name}!")
    }

    pub async fn posts(
        &self,
        caller: &Caller,
        filter: Option<PostFilter>,
    ) -> Result<Vec<Post>, DomainError> {
        let posts = match filter.unwrap_or_default() {
            PostFilter::Home => self.repo.list(Some(self.config.home_page_size)).await?,
            PostFilter::Mine => self.repo.find_by_owner(&caller.owner_id).await?,
        };
        Ok(posts)
    }

    pub async fn post(&self, id: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(&PostId::from(id))
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn update(&self, caller: &Caller, input: UpdatePost) -> Result<Post, DomainError> {
        let UpdatePost {
            id,
            title,
            body,
            image,
        } = input;

        if title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if body.trim().is_empty() {
            return Err(DomainError::Validation("body must not be empty".to_string()));
        }

        let post = match id.filter(|id| !id.trim().is_empty()).map(PostId::from) {
            None => {
                let post = Post::new(PostId::generate(), caller, title, body, image);
                tracing::info!(post_id = %post.id, owner = %caller.owner_id, "Creating post");
                post
            }
            Some(id) => match self.repo.find_by_id(&id).await? {
                Some(mut post) => {
                    post.revise(caller, title, body, image);
                    tracing::info!(post_id = %post.id, "Updating post");
                    post
                }
                None if self.config.update_policy == UpdatePolicy::Upsert => {
                    tracing::info!(post_id = %id, "Creating post under caller-supplied id");
                    Post::new(id, caller, title, body, image)
                }
                None => return Err(DomainError::post_not_found(id.into_inner())),
            },
        };

        Ok(self.repo.save(post).await?)
    }
}
