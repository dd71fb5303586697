//! Client errors.

use quill_shared::GraphQLError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL errors: {}", join(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error("Response carried no data")]
    MissingData,

    #[error("Draft is incomplete: {0}")]
    Incomplete(&'static str),
}

impl ClientError {
    /// True when the server reported that the requested post does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::GraphQL(errors) if errors.iter().any(|e| e.code() == Some("NOT_FOUND")))
    }
}

fn join(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
