// Re-export all model types
pub use self::account::*;
pub use self::conversation::*;
pub use self::dashboard::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::order::*;
pub use self::profile::*;
pub use self::review::*;
pub use self::search::*;
pub use self::service::*;
pub use self::settings::*;
pub use self::validation::*;

mod account;
mod conversation;
mod dashboard;
mod enums;
mod errors;
mod order;
mod profile;
mod review;
mod search;
mod service;
mod settings;
mod validation;
