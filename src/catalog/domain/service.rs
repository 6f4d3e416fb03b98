use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use crate::books::repository::{BookStore, Reply};
use crate::catalog::domain::RequestHandler;
use crate::catalog::request::{Request, Response};
use crate::core::library::{StoreError, StoreResult};

pub struct CatalogHandler {
    store: Box<dyn BookStore>,
}

impl CatalogHandler {
    pub fn new(store: Box<dyn BookStore>) -> Self {
        Self {
            store,
        }
    }
}

#[async_trait]
impl RequestHandler for CatalogHandler {
    // One suspend point per invocation: awaiting the reply of the one store
    // operation the request maps to. Store errors pass through verbatim; no
    // retries, no timeouts, no state kept across calls.
    async fn handle(&self, ctx: &CancellationToken, request: Request) -> Response {
        match request {
            Request::Create { title, author, section } => {
                match await_reply(self.store.create(ctx, title.as_str(), author.as_str(), section)).await {
                    Ok(id) => Response::Created { id },
                    Err(error) => Response::Error { error },
                }
            }
            Request::Read { id } => {
                match await_reply(self.store.read(ctx, id)).await {
                    Ok(book) => Response::Found { book },
                    Err(error) => Response::Error { error },
                }
            }
            Request::Update { id, title, author, section } => {
                match await_reply(self.store.update(ctx, id, title.as_str(), author.as_str(), section)).await {
                    Ok(()) => Response::Updated,
                    Err(error) => Response::Error { error },
                }
            }
            Request::Delete { id } => {
                match await_reply(self.store.delete(ctx, id)).await {
                    Ok(()) => Response::Deleted,
                    Err(error) => Response::Error { error },
                }
            }
        }
    }
}

// Consumes the single result of a reply channel. A sender dropped without a
// result breaks the store contract; it surfaces as a runtime error rather
// than a hang or a panic.
async fn await_reply<T>(reply: Reply<T>) -> StoreResult<T> {
    match reply.await {
        Ok(result) => result,
        Err(_) => {
            warn!("store dropped the reply channel without a result");
            Err(StoreError::runtime("store dropped the reply channel without a result"))
        }
    }
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use serde_json::json;
    use tokio::sync::oneshot;
    use tokio_util::sync::CancellationToken;
    use crate::books::domain::model::{Book, BookId, Section};
    use crate::books::factory::{create_book_store, create_seeded_book_store};
    use crate::books::repository::{BookStore, Reply};
    use crate::catalog::domain::service::CatalogHandler;
    use crate::catalog::domain::RequestHandler;
    use crate::catalog::factory::create_request_handler;
    use crate::catalog::request::{Request, Response};
    use crate::core::library::{StoreError, StoreResult};

    lazy_static! {
        static ref HOBBIT: Book = Book::new(BookId(1), "The Hobbit", "J.R.R. Tolkien", Section::Fiction);
    }

    // Always fails with its configured error; replies are sent from a spawned
    // task, the way a store with real workers would.
    struct FailingBookStore {
        error: StoreError,
    }

    impl FailingBookStore {
        fn new(error: StoreError) -> Self {
            Self { error }
        }

        fn reply<T: Send + 'static>(&self) -> Reply<T> {
            let (tx, rx) = oneshot::channel();
            let error = self.error.clone();
            tokio::spawn(async move {
                let result: StoreResult<T> = Err(error);
                let _ = tx.send(result);
            });
            rx
        }
    }

    impl BookStore for FailingBookStore {
        fn create(&self, _ctx: &CancellationToken, _title: &str, _author: &str, _section: Section) -> Reply<BookId> {
            self.reply()
        }

        fn read(&self, _ctx: &CancellationToken, _id: BookId) -> Reply<Book> {
            self.reply()
        }

        fn update(&self, _ctx: &CancellationToken, _id: BookId, _title: &str, _author: &str, _section: Section) -> Reply<()> {
            self.reply()
        }

        fn delete(&self, _ctx: &CancellationToken, _id: BookId) -> Reply<()> {
            self.reply()
        }
    }

    // Drops every reply sender without sending, which no conforming store may do.
    struct SilentBookStore;

    impl SilentBookStore {
        fn reply<T>(&self) -> Reply<T> {
            let (tx, rx) = oneshot::channel();
            drop(tx);
            rx
        }
    }

    impl BookStore for SilentBookStore {
        fn create(&self, _ctx: &CancellationToken, _title: &str, _author: &str, _section: Section) -> Reply<BookId> {
            self.reply()
        }

        fn read(&self, _ctx: &CancellationToken, _id: BookId) -> Reply<Book> {
            self.reply()
        }

        fn update(&self, _ctx: &CancellationToken, _id: BookId, _title: &str, _author: &str, _section: Section) -> Reply<()> {
            self.reply()
        }

        fn delete(&self, _ctx: &CancellationToken, _id: BookId) -> Reply<()> {
            self.reply()
        }
    }

    fn create_request() -> Request {
        Request::Create {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            section: Section::Fiction,
        }
    }

    #[tokio::test]
    async fn test_should_create_book() {
        let handler = create_request_handler(create_book_store());
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, create_request()).await;
        assert_eq!(Response::Created { id: BookId(1) }, response);
    }

    #[tokio::test]
    async fn test_should_fail_create_book_when_store_errors() {
        let error = StoreError::database("store offline", true);
        let handler = CatalogHandler::new(Box::new(FailingBookStore::new(error.clone())));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, create_request()).await;
        assert_eq!(Response::Error { error }, response);
    }

    #[tokio::test]
    async fn test_should_fail_create_book_when_id_space_is_spent() {
        let handler = create_request_handler(create_seeded_book_store(vec![
            Book::new(BookId(u32::MAX), "Dune", "Frank Herbert", Section::Fiction),
        ]));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, create_request()).await;
        assert!(matches!(response, Response::Error { error: StoreError::Runtime { .. } }));
    }

    #[tokio::test]
    async fn test_should_read_book() {
        let handler = create_request_handler(create_seeded_book_store(vec![HOBBIT.clone()]));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert_eq!(Response::Found { book: HOBBIT.clone() }, response);
    }

    #[tokio::test]
    async fn test_should_read_book_twice() {
        let handler = create_request_handler(create_seeded_book_store(vec![HOBBIT.clone()]));
        let ctx = CancellationToken::new();

        let first = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        let second = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_should_not_find_missing_book() {
        let handler = create_request_handler(create_book_store());
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert_eq!(Response::Error { error: StoreError::not_found(BookId(1)) }, response);
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let handler = create_request_handler(create_seeded_book_store(vec![HOBBIT.clone()]));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, Request::Update {
            id: BookId(1),
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            section: Section::NonFiction,
        }).await;
        assert_eq!(Response::Updated, response);

        let reloaded = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert_eq!(Response::Found {
            book: Book::new(BookId(1), "The Hobbit", "J.R.R. Tolkien", Section::NonFiction),
        }, reloaded);
    }

    #[tokio::test]
    async fn test_should_delete_book() {
        let handler = create_request_handler(create_seeded_book_store(vec![HOBBIT.clone()]));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, Request::Delete { id: BookId(1) }).await;
        assert_eq!(Response::Deleted, response);

        let reloaded = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert_eq!(Response::Error { error: StoreError::not_found(BookId(1)) }, reloaded);
    }

    #[tokio::test]
    async fn test_should_pass_store_errors_through_unchanged() {
        let error = StoreError::database("store offline", false);
        let handler = CatalogHandler::new(Box::new(FailingBookStore::new(error.clone())));
        let ctx = CancellationToken::new();

        let requests = vec![
            create_request(),
            Request::Read { id: BookId(1) },
            Request::Update {
                id: BookId(1),
                title: "t".to_string(),
                author: "a".to_string(),
                section: Section::Fiction,
            },
            Request::Delete { id: BookId(1) },
        ];
        for request in requests {
            let response = handler.handle(&ctx, request).await;
            assert_eq!(Response::Error { error: error.clone() }, response);
        }
    }

    #[tokio::test]
    async fn test_should_surface_dropped_reply_channel() {
        let handler = CatalogHandler::new(Box::new(SilentBookStore));
        let ctx = CancellationToken::new();

        let response = handler.handle(&ctx, Request::Read { id: BookId(1) }).await;
        assert!(matches!(response, Response::Error { error: StoreError::Runtime { .. } }));
    }

    #[tokio::test]
    async fn test_should_handle_request_value() {
        let handler = create_request_handler(create_book_store());
        let ctx = CancellationToken::new();

        let value = json!({"Create": {"title": "The Hobbit", "author": "J.R.R. Tolkien", "section": "Fiction"}});
        let response = handler.handle_value(&ctx, value).await;
        assert_eq!(Response::Created { id: BookId(1) }, response);
    }

    #[tokio::test]
    async fn test_should_reject_unknown_request_value() {
        let handler = create_request_handler(create_book_store());
        let ctx = CancellationToken::new();

        let value = json!({"Burn": {"id": 1}});
        let response = handler.handle_value(&ctx, value.clone()).await;
        assert_eq!(Response::Error { error: StoreError::invalid_request(value) }, response);
    }
}
