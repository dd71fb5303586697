use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Caller;

const ID_ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";
const ID_LENGTH: usize = 21;

/// Opaque post identifier, minted server-side on first save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Mint a fresh random URL-safe identifier.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for PostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post entity - the only content type.
///
/// Records written before attribution and timestamps existed still
/// deserialize; the missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub owner_id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post attributed to `caller`.
    pub fn new(
        id: PostId,
        caller: &Caller,
        title: String,
        body: String,
        image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id: caller.owner_id.clone(),
            title,
            body,
            author: caller.author.clone(),
            image: image.filter(|url| !url.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit in place. `id`, `owner_id` and `created_at` never change.
    /// An absent image keeps the stored one and a blank image removes it.
    pub fn revise(&mut self, caller: &Caller, title: String, body: String, image: Option<String>) {
        self.title = title;
        self.body = body;
        self.author = caller.author.clone();
        if let Some(url) = image {
            self.image = Some(url).filter(|url| !url.trim().is_empty());
        }
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller() -> Caller {
        Caller::new("owner", "Ada")
    }

    #[test]
    fn test_generated_ids_are_url_safe_and_distinct() {
        let a = PostId::generate();
        let b = PostId::generate();

        assert_eq!(a.as_str().len(), ID_LENGTH);
        assert!(
            a.as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_revise_keeps_identity_and_image() {
        let mut post = Post::new(
            PostId::from("p1"),
            &caller(),
            "A".into(),
            "B".into(),
            Some("https://img/1.png".into()),
        );
        let created_at = post.created_at;

        post.revise(&Caller::new("owner", "Ada L."), "A2".into(), "B2".into(), None);

        assert_eq!(post.id.as_str(), "p1");
        assert_eq!(post.owner_id, "owner");
        assert_eq!(post.author, "Ada L.");
        assert_eq!(post.image.as_deref(), Some("https://img/1.png"));
        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at >= created_at);
    }

    #[test]
    fn test_blank_image_clears_and_is_never_stored() {
        let mut post = Post::new(
            PostId::from("p1"),
            &caller(),
            "A".into(),
            "B".into(),
            Some(" ".into()),
        );
        assert_eq!(post.image, None);

        post.revise(&caller(), "A".into(), "B".into(), Some("https://img/2.png".into()));
        assert_eq!(post.image.as_deref(), Some("https://img/2.png"));

        post.revise(&caller(), "A".into(), "B".into(), Some(String::new()));
        assert_eq!(post.image, None);
    }

    #[test]
    fn test_legacy_record_deserializes_with_defaults() {
        let post: Post =
            serde_json::from_str(r#"{"id":"abc","title":"Hi","body":"There"}"#).unwrap();

        assert_eq!(post.id.as_str(), "abc");
        assert!(post.owner_id.is_empty());
        assert!(post.image.is_none());
    }
}
