use async_graphql::{Context, Object, Result};

use quill_core::PostService;
use quill_core::domain::Caller;

use super::error::domain_error;
use super::types::{PostFilterValue, PostObject};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Diagnostic greeting.
    async fn hello(&self, ctx: &Context<'_>, name: Option<String>) -> Result<String> {
        Ok(ctx.data::<PostService>()?.hello(name.as_deref()))
    }

    /// `Home` is the public feed, `Mine` the caller's own posts. Defaults to `Home`.
    async fn posts(
        &self,
        ctx: &Context<'_>,
        filter: Option<PostFilterValue>,
    ) -> Result<Vec<PostObject>> {
        let service = ctx.data::<PostService>()?;
        let caller = ctx.data::<Caller>()?;

        let posts = service
            .posts(caller, filter.map(Into::into))
            .await
            .map_err(domain_error)?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    /// A single post. Fails when no post has this id.
    async fn post(&self, ctx: &Context<'_>, id: String) -> Result<PostObject> {
        let service = ctx.data::<PostService>()?;
        let post = service.post(&id).await.map_err(domain_error)?;
        Ok(post.into())
    }
}
