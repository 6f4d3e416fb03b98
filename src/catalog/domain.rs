pub mod service;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use crate::catalog::request::{Request, Response};
use crate::core::library::StoreError;

// RequestHandler is the sole entry point of the dispatch core. Adapters build
// a Request (or hand over raw json via handle_value) and always get a
// well-formed Response back; failures travel inside Response::Error, never as
// a panic.
#[async_trait]
pub trait RequestHandler: Sync + Send {
    async fn handle(&self, ctx: &CancellationToken, request: Request) -> Response;

    // untyped inbound edge: values outside the supported request set come
    // back as an InvalidRequest error carrying the offending value
    async fn handle_value(&self, ctx: &CancellationToken, value: Value) -> Response {
        match serde_json::from_value::<Request>(value.clone()) {
            Ok(request) => self.handle(ctx, request).await,
            Err(err) => {
                warn!("rejected request value: {}", err);
                Response::Error { error: StoreError::invalid_request(value) }
            }
        }
    }
}
