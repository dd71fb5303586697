//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::Caller;
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use quill_core::PostService;
use quill_infra::{InMemoryPostRepository, JsonFilePostRepository, seed_demo_posts};

#[cfg(feature = "postgres")]
use quill_infra::PostgresPostRepository;

use crate::config::{AppConfig, StoreConfig};
use crate::graphql::{QuillSchema, build_schema};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub schema: QuillSchema,
    /// Identity attached to every GraphQL request.
    pub caller: Caller,
    pub graphiql: bool,
}

impl AppState {
    /// Open the configured store and build the schema over it.
    pub async fn new(config: &AppConfig) -> Result<Self, RepoError> {
        let repo = open_store(&config.store).await?;

        if config.seed_demo_posts {
            seed_demo_posts(repo.as_ref(), &config.caller).await?;
        }

        tracing::info!("Application state initialized");
        Ok(Self::with_repository(repo, config))
    }

    /// Build the state over an already-open store.
    pub fn with_repository(repo: Arc<dyn PostRepository>, config: &AppConfig) -> Self {
        let service = PostService::new(repo, config.service.clone());
        Self {
            schema: build_schema(service),
            caller: config.caller.clone(),
            graphiql: config.graphiql,
        }
    }
}

async fn open_store(store: &StoreConfig) -> Result<Arc<dyn PostRepository>, RepoError> {
    match store {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store. Posts are lost on restart.");
            Ok(Arc::new(InMemoryPostRepository::new()))
        }
        StoreConfig::File(path) => Ok(Arc::new(JsonFilePostRepository::open(path.clone()).await?)),
        #[cfg(feature = "postgres")]
        StoreConfig::Postgres(db_config) => {
            let conn = quill_infra::database::connect(db_config).await?;
            Ok(Arc::new(PostgresPostRepository::new(conn)))
        }
        #[cfg(not(feature = "postgres"))]
        StoreConfig::Postgres(_) => Err(RepoError::Connection(
            "STORE=postgres needs the `postgres` feature".to_string(),
        )),
    }
}
