//! # API Error Type
//!
//! Unified error type for desk operations and console commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow at the Counter                            │
//! │                                                                         │
//! │  Operator types "sell 17 3"                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Desk operation                                                  │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store error? ──── StoreError::Status(500) ─────┐               │  │
//! │  │         │                                       │               │  │
//! │  │         ▼                                       ▼               │  │
//! │  │  Billing error? ── CoreError::InsufficientStock ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Console prints "! Not enough stock for Amoxicillin: ..." and keeps    │
//! │  reading commands. No error ends the session.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pharmacy_core::{CoreError, ValidationError};
use pharmacy_store::StoreError;

/// Error returned from desk operations.
///
/// The console prints `message`; `code` decides nothing there but lets
/// callers and tests tell failures apart without matching on text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

/// Error codes for desk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Remote store rejected the request or could not be reached
    NetworkFailure,

    /// Sale quantity exceeds stock
    InsufficientStock,

    /// No product with the given id
    NotFound,

    /// Operator input did not validate
    ValidationError,

    /// Nothing has been sold yet in this session
    NoInvoice,

    /// The printer could not take the receipt
    PrintFailed,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates the "nothing sold yet" error.
    pub fn no_invoice() -> Self {
        ApiError::new(ErrorCode::NoInvoice, "No invoice yet; sell something first")
    }

    /// Creates a print failure.
    pub fn print_failed(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PrintFailed, message)
    }

    /// Returns true for remote store failures.
    pub fn is_network_failure(&self) -> bool {
        self.code == ErrorCode::NetworkFailure
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::AmountTooLarge { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_network_failure() {
            ApiError::new(ErrorCode::NetworkFailure, format!("Network failure: {}", err))
        } else {
            ApiError::internal(err.to_string())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
