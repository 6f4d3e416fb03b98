pub mod memory_book_store;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use crate::books::domain::model::{Book, BookId, Section};
use crate::core::library::StoreResult;

/// A single-result reply channel: the store sends exactly one result on the
/// paired sender, after which the channel is spent.
pub type Reply<T> = oneshot::Receiver<StoreResult<T>>;

// BookStore abstracts the persistence engine behind the catalog. Operations
// hand back their reply channel immediately; the result arrives on it exactly
// once, whether the store computed inline or on its own worker. Dropping the
// sender without a result is out of contract.
//
// The token carries cancellation for the call; implementations decide whether
// to honor it, and should check it before work that can block.
pub trait BookStore: Sync + Send {
    // issue a fresh id and add the book
    fn create(&self, ctx: &CancellationToken, title: &str, author: &str, section: Section) -> Reply<BookId>;

    // fetch a book; a missing id resolves to StoreError::NotFound
    fn read(&self, ctx: &CancellationToken, id: BookId) -> Reply<Book>;

    // replace every field of an existing book except its id
    fn update(&self, ctx: &CancellationToken, id: BookId, title: &str, author: &str, section: Section) -> Reply<()>;

    // remove a book
    fn delete(&self, ctx: &CancellationToken, id: BookId) -> Reply<()>;
}
