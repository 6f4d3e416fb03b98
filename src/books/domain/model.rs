use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// BookId is issued by the store on creation and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub u32);

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Fiction,
    NonFiction,
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Section::Fiction => write!(f, "Fiction"),
            Section::NonFiction => write!(f, "NonFiction"),
        }
    }
}

// Book abstracts a single title in the catalog; every field except the id may
// be replaced by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub section: Section,
}

impl Book {
    pub fn new(id: BookId, title: &str, author: &str, section: Section) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            section,
        }
    }

    // display-only convenience, not used anywhere in routing
    pub fn author_uppercase(&self) -> String {
        self.author.to_uppercase()
    }
}
