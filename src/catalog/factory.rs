use crate::books::repository::BookStore;
use crate::catalog::domain::RequestHandler;
use crate::catalog::domain::service::CatalogHandler;

pub fn create_request_handler(store: Box<dyn BookStore>) -> Box<dyn RequestHandler> {
    Box::new(CatalogHandler::new(store))
}
