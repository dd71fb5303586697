use serde::{Deserialize, Serialize};

/// The identity a request is made on behalf of.
///
/// There is a single configured identity today, but every service call takes
/// it explicitly so nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Attribution key stored on every post this caller writes.
    pub owner_id: String,
    /// Display name shown as the post author.
    pub author: String,
}

impl Caller {
    pub fn new(owner_id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            author: author.into(),
        }
    }
}
