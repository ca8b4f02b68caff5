// Services module - business logic layer

pub mod account_service;
pub mod catalog_service;
pub mod loader;
pub mod message_service;
pub mod order_service;
pub mod review_service;

pub use account_service::AccountService;
pub use catalog_service::CatalogService;
pub use loader::{LoadOutcome, LoadState, Loader};
pub use message_service::MessageService;
pub use order_service::OrderService;
pub use review_service::ReviewService;
