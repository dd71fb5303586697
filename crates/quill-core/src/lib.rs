//! # Quill Core
//!
//! The domain layer of Quill.
//! This crate contains the post model, the repository ports and the
//! service that backs every GraphQL resolver. It has no infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::{PostService, ServiceConfig, UpdatePolicy, UpdatePost};
