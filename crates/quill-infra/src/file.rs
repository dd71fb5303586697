//! JSON file post store.
//!
//! The whole store is one pretty-printed JSON object mapping post id to the
//! full post record. Every write rewrites the document: the new contents go to
//! a sibling temp file which is then renamed over the original, and writers
//! inside the process are serialized so read-modify-write cycles cannot
//! interleave.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use quill_core::domain::{Post, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, listing_order};

type Document = BTreeMap<PostId, Post>;

pub struct JsonFilePostRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePostRepository {
    /// Use `path` as the store. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Like [`new`](Self::new), but fails early if an existing file does not parse.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let repo = Self::new(path);
        let document = repo.load().await?;
        tracing::info!(
            path = %repo.path.display(),
            posts = document.len(),
            "Opened JSON file store"
        );
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, RepoError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| RepoError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    async fn store(&self, document: &Document) -> Result<(), RepoError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepoError {
    RepoError::Io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl BaseRepository<Post, PostId> for JsonFilePostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, "Reading post from file store");
        let mut document = self.load().await?;
        Ok(document.remove(id))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        document.insert(post.id.clone(), post.clone());
        self.store(&document).await?;

        tracing::debug!(post_id = %post.id, posts = document.len(), "Wrote file store");
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for JsonFilePostRepository {
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.load().await?.into_values().collect();
        posts.sort_by(listing_order);
        if let Some(limit) = limit {
            posts.truncate(limit as usize);
        }
        Ok(posts)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .load()
            .await?
            .into_values()
            .filter(|p| p.is_owned_by(owner_id))
            .collect();
        posts.sort_by(listing_order);
        Ok(posts)
    }
}
