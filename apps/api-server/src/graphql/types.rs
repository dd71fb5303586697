use async_graphql::{Enum, ID, SimpleObject};

use quill_core::domain::{Post, PostFilter};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Post")]
pub struct PostObject {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub author: String,
    pub image: Option<String>,
}

impl From<Post> for PostObject {
    fn from(post: Post) -> Self {
        Self {
            id: ID(post.id.into_inner()),
            title: post.title,
            body: post.body,
            author: post.author,
            image: post.image,
        }
    }
}

#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "PostFilter", rename_items = "PascalCase")]
pub enum PostFilterValue {
    Home,
    Mine,
}

impl From<PostFilterValue> for PostFilter {
    fn from(value: PostFilterValue) -> Self {
        match value {
            PostFilterValue::Home => PostFilter::Home,
            PostFilterValue::Mine => PostFilter::Mine,
        }
    }
}
