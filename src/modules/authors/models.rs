use serde::{Deserialize, Serialize};

use crate::catalog::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Record for Author {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Replacement for an author's mutable fields; a missing `bio` clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorUpdate {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}
