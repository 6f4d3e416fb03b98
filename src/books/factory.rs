use crate::books::domain::model::Book;
use crate::books::repository::memory_book_store::MemoryBookStore;
use crate::books::repository::BookStore;

pub fn create_book_store() -> Box<dyn BookStore> {
    Box::new(MemoryBookStore::new())
}

pub fn create_seeded_book_store(books: Vec<Book>) -> Box<dyn BookStore> {
    Box::new(MemoryBookStore::with_books(books))
}
