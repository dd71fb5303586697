//! Domain errors rendered as GraphQL errors.

use async_graphql::{Error, ErrorExtensions};

use quill_core::DomainError;

/// Convert a domain failure into a response error with `code` and `status`
/// extensions. Internal details are logged, never returned.
pub fn domain_error(err: DomainError) -> Error {
    match err {
        DomainError::NotFound { entity_type, id } => {
            Error::new(format!("Invalid {} ID: {}", entity_type.to_lowercase(), id)).extend_with(
                |_, e| {
                    e.set("code", "NOT_FOUND");
                    e.set("status", 404);
                    e.set("id", id.clone());
                },
            )
        }
        DomainError::Validation(msg) => Error::new(msg).extend_with(|_, e| {
            e.set("code", "BAD_USER_INPUT");
            e.set("status", 400);
        }),
        DomainError::Internal(detail) => {
            tracing::error!("Internal error: {}", detail);
            Error::new("Internal server error").extend_with(|_, e| {
                e.set("code", "INTERNAL_SERVER_ERROR");
                e.set("status", 500);
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_code_and_id() {
        let err = domain_error(DomainError::post_not_found("abc"));
        assert_eq!(err.message, "Invalid post ID: abc");

        let ext = serde_json::to_value(err.extensions.unwrap()).unwrap();
        assert_eq!(ext["code"], "NOT_FOUND");
        assert_eq!(ext["id"], "abc");
    }

    #[test]
    fn test_internal_errors_are_redacted() {
        let err = domain_error(DomainError::Internal("db.json: permission denied".into()));
        assert_eq!(err.message, "Internal server error");
    }
}
