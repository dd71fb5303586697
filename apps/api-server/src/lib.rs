//! # Quill API Server
//!
//! GraphQL API for posts, served by actix-web.

pub mod config;
pub mod graphql;
pub mod handlers;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_cors::Cors;

/// CORS policy: any origin may call the API.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .expose_headers([observability::REQUEST_ID_HEADER])
        .max_age(3600)
}
