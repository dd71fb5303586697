//! Editor state machine.
//!
//! A session opened with an id starts out `Loading` until the stored post
//! arrives and fills the fields (`Populated`). A session opened without one is
//! `Blank`. The first keystroke moves either to `Editing`.

use quill_shared::PostDto;

/// The editor's working copy of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// `None` until the server has assigned one.
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
}

impl Draft {
    /// Saving requires both a title and a body.
    pub fn is_publishable(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

impl From<PostDto> for Draft {
    fn from(post: PostDto) -> Self {
        Self {
            id: Some(post.id),
            title: post.title,
            body: post.body,
            image: post.image,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Loading { id: String },
    Blank,
    Populated,
    Editing,
}

/// Where the editor should move after a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Swap the current location without adding a history entry.
    Replace(String),
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    state: EditorState,
    draft: Draft,
}

impl EditorSession {
    pub fn open(id: Option<&str>) -> Self {
        match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self {
                state: EditorState::Loading { id: id.to_string() },
                draft: Draft {
                    id: Some(id.to_string()),
                    ..Draft::default()
                },
            },
            None => Self {
                state: EditorState::Blank,
                draft: Draft::default(),
            },
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The id still being fetched, if any.
    pub fn loading_id(&self) -> Option<&str> {
        match &self.state {
            EditorState::Loading { id } => Some(id),
            _ => None,
        }
    }

    /// Fill the fields from the fetched post. Ignored unless still loading.
    pub fn loaded(&mut self, post: PostDto) -> bool {
        if self.loading_id().is_none() {
            return false;
        }
        self.draft = Draft::from(post);
        self.state = EditorState::Populated;
        true
    }

    /// Apply a keystroke. Returns the draft to autosave when it is complete.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> Option<Draft> {
        let value = value.into();
        match field {
            Field::Title => self.draft.title = value,
            Field::Body => self.draft.body = value,
            Field::Image => {
                self.draft.image = Some(value).filter(|url| !url.trim().is_empty());
            }
        }
        self.state = EditorState::Editing;

        self.draft.is_publishable().then(|| self.draft.clone())
    }

    pub fn is_publishable(&self) -> bool {
        self.draft.is_publishable()
    }

    /// Adopt the server's copy of the id. The first save of a new post
    /// moves the editor to that post's route.
    pub fn saved(&mut self, post: &PostDto) -> Option<Navigation> {
        if self.draft.id.is_some() {
            return None;
        }
        self.draft.id = Some(post.id.clone());
        Some(Navigation::Replace(self.route()))
    }

    pub fn route(&self) -> String {
        match &self.draft.id {
            Some(id) => format!("/write/{id}"),
            None => "/write".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: &str) -> PostDto {
        PostDto {
            id: id.to_string(),
            title: "Stored".into(),
            body: "Stored body".into(),
            author: "Owner".into(),
            image: Some("https://images.example/a.jpg".into()),
        }
    }

    #[test]
    fn test_existing_post_loads_then_edits() {
        let mut session = EditorSession::open(Some("abc"));
        assert_eq!(session.state(), &EditorState::Loading { id: "abc".into() });
        assert_eq!(session.route(), "/write/abc");

        assert!(session.loaded(stored("abc")));
        assert_eq!(session.state(), &EditorState::Populated);
        assert_eq!(session.draft().title, "Stored");

        let due = session.edit(Field::Title, "Changed").unwrap();
        assert_eq!(session.state(), &EditorState::Editing);
        assert_eq!(due.id.as_deref(), Some("abc"));
        assert_eq!(due.image.as_deref(), Some("https://images.example/a.jpg"));

        assert!(!session.loaded(stored("abc")));
        assert_eq!(session.draft().title, "Changed");
    }

    #[test]
    fn test_autosave_is_due_only_with_title_and_body() {
        let mut session = EditorSession::open(None);
        assert_eq!(session.state(), &EditorState::Blank);

        assert!(session.edit(Field::Title, "Hello").is_none());
        assert!(session.edit(Field::Image, "https://img").is_none());
        assert!(session.edit(Field::Body, "World").is_some());
        assert!(session.edit(Field::Body, "  ").is_none());
        assert!(!session.is_publishable());
    }

    #[test]
    fn test_blank_image_clears_it() {
        let mut session = EditorSession::open(None);
        session.edit(Field::Image, "https://img");
        session.edit(Field::Image, "");
        assert_eq!(session.draft().image, None);
    }

    #[test]
    fn test_first_save_replaces_route_once() {
        let mut session = EditorSession::open(Some("  "));
        assert_eq!(session.route(), "/write");
        session.edit(Field::Title, "T");
        session.edit(Field::Body, "B");

        let nav = session.saved(&stored("new-id"));
        assert_eq!(nav, Some(Navigation::Replace("/write/new-id".into())));
        assert_eq!(session.draft().id.as_deref(), Some("new-id"));

        assert_eq!(session.saved(&stored("new-id")), None);
    }
}
