use serde::{Deserialize, Serialize};
use crate::books::domain::model::{Book, BookId, Section};
use crate::core::library::StoreError;

// The full set of catalog operations. Adding a variant here will not compile
// until the handler routes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    Create {
        title: String,
        author: String,
        section: Section,
    },
    Read {
        id: BookId,
    },
    Update {
        id: BookId,
        title: String,
        author: String,
        section: Section,
    },
    Delete {
        id: BookId,
    },
}

// One success shape per request kind, plus the single error shape every
// request can fall back to. Error carries whatever the store reported,
// untouched; callers match on the kind themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    Created {
        id: BookId,
    },
    Found {
        book: Book,
    },
    Updated,
    Deleted,
    Error {
        error: StoreError,
    },
}
