use async_graphql::{Context, Object, Result};

use quill_core::domain::Caller;
use quill_core::{PostService, UpdatePost};

use super::error::domain_error;
use super::types::PostObject;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a post (no `id`) or edit an existing one. Every call is a durable write.
    /// Omitting `image` keeps the stored one and a blank `image` removes it.
    async fn update(
        &self,
        ctx: &Context<'_>,
        id: Option<String>,
        title: String,
        body: String,
        image: Option<String>,
    ) -> Result<PostObject> {
        let service = ctx.data::<PostService>()?;
        let caller = ctx.data::<Caller>()?;

        let post = service
            .update(
                caller,
                UpdatePost {
                    id,
                    title,
                    body,
                    image,
                },
            )
            .await
            .map_err(domain_error)?;
        Ok(post.into())
    }
}
