//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external dependencies, in-memory and JSON file stores only

pub mod database;
pub mod file;
pub mod memory;
pub mod seed;

// Re-exports
pub use file::JsonFilePostRepository;
pub use memory::InMemoryPostRepository;
pub use seed::seed_demo_posts;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
