pub mod accounts;
pub mod api;
pub mod catalog;
pub mod health;
pub mod messages;
pub mod metrics;
pub mod middleware;
pub mod orders;
pub mod reviews;

pub use api::{create_api_router, ApiError, ApiResult, ApiState};
pub use health::*;
pub use metrics::*;
pub use middleware::*;
