use bookstore::books::domain::model::{Book, BookId, Section};
use bookstore::books::factory::create_seeded_book_store;
use bookstore::catalog::factory::create_request_handler;
use bookstore::catalog::request::Request;
use bookstore::utils::log::setup_tracing;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::info;

// Drives one request of each kind through the handler against a seeded
// in-memory store and logs every exchange as JSON.

#[tokio::main]
async fn main() -> serde_json::Result<()> {
    setup_tracing();

    let store = create_seeded_book_store(vec![
        Book::new(BookId(1), "A Brief History of Time", "Stephen Hawking", Section::NonFiction),
    ]);
    let handler = create_request_handler(store);
    let ctx = CancellationToken::new();

    let requests = vec![
        Request::Create {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            section: Section::Fiction,
        },
        Request::Read { id: BookId(2) },
        Request::Update {
            id: BookId(2),
            title: "The Hobbit, or There and Back Again".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            section: Section::Fiction,
        },
        Request::Delete { id: BookId(1) },
        Request::Read { id: BookId(1) },
    ];
    for request in requests {
        info!("request: {}", serde_json::to_string(&request)?);
        let response = handler.handle(&ctx, request).await;
        info!("response: {}", serde_json::to_string(&response)?);
    }

    // a request shape the catalog does not support, through the untyped edge
    let value = json!({"Archive": {"id": 2}});
    info!("request: {}", value);
    let response = handler.handle_value(&ctx, value).await;
    info!("response: {}", serde_json::to_string(&response)?);

    Ok(())
}
