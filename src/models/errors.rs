use thiserror::Error;

use super::{FieldErrors, OrderStatus};

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {id}")]
    ServiceNotFound { id: String },

    #[error("Order not found: {id}")]
    OrderNotFound { id: String },

    #[error("Conversation not found: {id}")]
    ConversationNotFound { id: String },

    #[error("Recipient not found: {id}")]
    RecipientNotFound { id: String },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    #[error("Validation failed: {fields}")]
    InvalidFields { fields: FieldErrors },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid status transition for order {order_id}: {from} -> {to}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order {order_id} is not awaiting a review")]
    ReviewNotPending { order_id: String },

    #[error("Load failed: {message}")]
    Load { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Item not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation failed: {0}")]
    Fields(FieldErrors),

    #[error("Required field missing: {field}")]
    RequiredField { field: String },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Fields(fields) => ServiceError::InvalidFields { fields },
            other => ServiceError::ValidationError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
