//! # Quill Client
//!
//! Talks to the Quill GraphQL API and drives an editor that autosaves.
//!
//! - [`GraphQLClient`] issues the `hello`, `posts`, `post` and `update` operations.
//! - [`Debouncer`] coalesces bursts of input into one trailing-edge action.
//! - [`EditorSession`] is the editor's state machine.
//! - [`Autosaver`] ties a session to a debouncer and a [`PostGateway`].

pub mod autosave;
pub mod client;
pub mod debounce;
pub mod editor;
pub mod error;

pub use autosave::{AutosaveEvent, Autosaver, PostGateway};
pub use client::GraphQLClient;
pub use debounce::Debouncer;
pub use editor::{Draft, EditorSession, EditorState, Field, Navigation};
pub use error::ClientError;
