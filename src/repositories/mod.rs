pub mod account_repository;
pub mod conversation_repository;
pub mod latency;
pub mod order_repository;
pub mod review_repository;
pub mod seed;
pub mod service_repository;


pub use account_repository::{
    AccountRepository, InMemoryAccountRepository, InMemoryProfileRepository, ProfileRepository,
};
pub use conversation_repository::{ConversationRepository, InMemoryConversationRepository};
pub use latency::SimulatedLatency;
pub use order_repository::{InMemoryOrderRepository, OrderChange, OrderRepository};
pub use review_repository::{InMemoryReviewRepository, ReviewRepository};
pub use service_repository::{InMemoryServiceRepository, ServiceRepository};
