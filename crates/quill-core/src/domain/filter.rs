use serde::{Deserialize, Serialize};

/// Selects between the public feed and the caller's own posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostFilter {
    #[default]
    Home,
    Mine,
}
