//! Domain entities - the core business objects.

mod filter;
mod identity;
mod post;

pub use filter::PostFilter;
pub use identity::Caller;
pub use post::{Post, PostId};
