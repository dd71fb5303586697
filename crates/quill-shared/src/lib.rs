//! # Quill Shared
//!
//! Wire types shared between the API server and its clients.

pub mod dto;
pub mod graphql;

pub use dto::PostDto;
pub use graphql::{GraphQLError, GraphQLRequest, GraphQLResponse};
