//! Data Transfer Objects - the shapes the GraphQL API returns.

use serde::{Deserialize, Serialize};

/// A post as returned by the `posts`, `post` and `update` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Filter values accepted by `posts(filter:)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostFilterDto {
    Home,
    Mine,
}

/// `{ posts: [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct PostsData {
    pub posts: Vec<PostDto>,
}

/// `{ post: {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct PostData {
    pub post: PostDto,
}

/// `{ update: {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateData {
    pub update: PostDto,
}

/// `{ hello: "..." }`
#[derive(Debug, Clone, Deserialize)]
pub struct HelloData {
    pub hello: String,
}
