use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use crate::books::domain::model::{Book, BookId, Section};
use crate::books::repository::{BookStore, Reply};
use crate::core::library::{StoreError, StoreResult};

#[derive(Debug)]
struct Inner {
    books: HashMap<BookId, Book>,
    // next id to issue; None once the sequence has run out
    next_id: Option<u32>,
}

// MemoryBookStore keeps the catalog in a map guarded by a read-write lock.
// Ids come from a monotonic sequence starting at 1; a create that finds the
// sequence spent resolves to a runtime error. Clones share the same catalog,
// so one handle can seed while another serves a dispatcher.
#[derive(Debug, Clone)]
pub struct MemoryBookStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                books: HashMap::new(),
                next_id: Some(1),
            })),
        }
    }

    // seeds the catalog and continues the id sequence past the largest seeded id
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = match books.iter().map(|b| b.id.0).max() {
            None => Some(1),
            Some(max) => max.checked_add(1),
        };
        Self {
            inner: Arc::new(RwLock::new(Inner {
                books: books.into_iter().map(|b| (b.id, b)).collect(),
                next_id,
            })),
        }
    }

    // snapshot of the catalog, in no particular order
    pub fn books(&self) -> Vec<Book> {
        let inner = self.inner.read().expect("acquire read lock on book store");
        inner.books.values().cloned().collect()
    }

    fn do_create(&self, ctx: &CancellationToken, title: &str, author: &str, section: Section) -> StoreResult<BookId> {
        if ctx.is_cancelled() {
            return Err(cancelled("create"));
        }
        let mut inner = self.inner.write().expect("acquire write lock on book store");
        let id = match inner.next_id {
            Some(next) => BookId(next),
            None => return Err(StoreError::runtime("book id space exhausted")),
        };
        inner.next_id = id.0.checked_add(1);
        inner.books.insert(id, Book::new(id, title, author, section));
        Ok(id)
    }

    fn do_read(&self, ctx: &CancellationToken, id: BookId) -> StoreResult<Book> {
        if ctx.is_cancelled() {
            return Err(cancelled("read"));
        }
        let inner = self.inner.read().expect("acquire read lock on book store");
        inner.books.get(&id).cloned().ok_or(StoreError::not_found(id))
    }

    fn do_update(&self, ctx: &CancellationToken, id: BookId, title: &str, author: &str, section: Section) -> StoreResult<()> {
        if ctx.is_cancelled() {
            return Err(cancelled("update"));
        }
        let mut inner = self.inner.write().expect("acquire write lock on book store");
        match inner.books.get_mut(&id) {
            Some(book) => {
                book.title = title.to_string();
                book.author = author.to_string();
                book.section = section;
                Ok(())
            }
            None => Err(StoreError::not_found(id)),
        }
    }

    fn do_delete(&self, ctx: &CancellationToken, id: BookId) -> StoreResult<()> {
        if ctx.is_cancelled() {
            return Err(cancelled("delete"));
        }
        let mut inner = self.inner.write().expect("acquire write lock on book store");
        match inner.books.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(id)),
        }
    }
}

impl Default for MemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for MemoryBookStore {
    fn create(&self, ctx: &CancellationToken, title: &str, author: &str, section: Section) -> Reply<BookId> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(self.do_create(ctx, title, author, section));
        rx
    }

    fn read(&self, ctx: &CancellationToken, id: BookId) -> Reply<Book> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(self.do_read(ctx, id));
        rx
    }

    fn update(&self, ctx: &CancellationToken, id: BookId, title: &str, author: &str, section: Section) -> Reply<()> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(self.do_update(ctx, id, title, author, section));
        rx
    }

    fn delete(&self, ctx: &CancellationToken, id: BookId) -> Reply<()> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(self.do_delete(ctx, id));
        rx
    }
}

fn cancelled(op: &str) -> StoreError {
    StoreError::runtime(format!("{} cancelled before reaching the store", op).as_str())
}
