//! GraphQL schema: `Post`, `PostFilter`, the query root and the `update` mutation.

mod error;
mod mutation;
mod query;
mod types;

use async_graphql::{EmptySubscription, Schema};

use quill_core::PostService;

pub use error::domain_error;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{PostFilterValue, PostObject};

pub type QuillSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around `service`.
///
/// Each request must also carry the caller's [`quill_core::domain::Caller`] as request data.
pub fn build_schema(service: PostService) -> QuillSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}
