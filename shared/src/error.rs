//! Error types for the shared crate
//!
//! Standardized error taxonomy used across the entire engine. Every failure
//! maps to a stable error code string plus a human-readable message.

use thiserror::Error;

/// Stable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Success
    Success,
    /// Validation error
    Validation,
    /// Resource not found
    NotFound,
    /// No pricing rule resolves a nightly rate
    RuleNotFound,
    /// Not enough free rooms for the requested window
    InsufficientAvailability,
    /// Unknown promotion code
    InvalidCode,
    /// Promotion outside its activity window or disabled
    ExpiredCode,
    /// Promotion scope does not match the order kind
    ScopeMismatch,
    /// Disallowed lifecycle transition
    InvalidTransition,
    /// Checkout already performed
    AlreadyCheckedOut,
    /// Storage / database error
    Storage,
}

impl ErrorCode {
    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::RuleNotFound => "No pricing rule applies",
            Self::InsufficientAvailability => "Not enough rooms available",
            Self::InvalidCode => "Unknown promotion code",
            Self::ExpiredCode => "Promotion code is not active",
            Self::ScopeMismatch => "Promotion code not valid for this order",
            Self::InvalidTransition => "Operation not allowed in current state",
            Self::AlreadyCheckedOut => "Booking already checked out",
            Self::Storage => "Database error",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::RuleNotFound => "E1001",
            Self::InsufficientAvailability => "E1002",
            Self::InvalidCode => "E1003",
            Self::ExpiredCode => "E1004",
            Self::ScopeMismatch => "E1005",
            Self::InvalidTransition => "E1006",
            Self::AlreadyCheckedOut => "E1007",
            Self::Storage => "E9002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub enum BookingError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// No base price and no applicable override for a date
    #[error("No pricing rule applies: {message}")]
    RuleNotFound { message: String },

    /// Fewer free rooms than requested
    #[error("Insufficient availability: {message}")]
    InsufficientAvailability { message: String },

    /// Promotion code does not exist for the property
    #[error("Unknown promotion code: {code}")]
    InvalidCode { code: String },

    /// Promotion disabled or outside its activity window
    #[error("Promotion code not active: {code}")]
    ExpiredCode { code: String },

    /// Promotion scope incompatible with the order kind
    #[error("Promotion code {code} not valid here: {message}")]
    ScopeMismatch { code: String, message: String },

    /// Lifecycle guard violation
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// Second checkout attempt
    #[error("Booking already checked out: {booking_id}")]
    AlreadyCheckedOut { booking_id: String },

    /// Storage / database error
    #[error("Database error: {message}")]
    Storage { message: String },
}

impl BookingError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a RuleNotFound error
    pub fn rule_not_found(message: impl Into<String>) -> Self {
        Self::RuleNotFound { message: message.into() }
    }

    /// Create an InsufficientAvailability error
    pub fn insufficient_availability(message: impl Into<String>) -> Self {
        Self::InsufficientAvailability { message: message.into() }
    }

    /// Create an InvalidCode error
    pub fn invalid_code(code: impl Into<String>) -> Self {
        Self::InvalidCode { code: code.into() }
    }

    /// Create an ExpiredCode error
    pub fn expired_code(code: impl Into<String>) -> Self {
        Self::ExpiredCode { code: code.into() }
    }

    /// Create a ScopeMismatch error
    pub fn scope_mismatch(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ScopeMismatch { code: code.into(), message: message.into() }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition { message: message.into() }
    }

    /// Create an AlreadyCheckedOut error
    pub fn already_checked_out(booking_id: impl Into<String>) -> Self {
        Self::AlreadyCheckedOut { booking_id: booking_id.into() }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    // ========== Error inspection methods ==========

    /// Get the stable error code for this error
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::Validation,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::RuleNotFound { .. } => ErrorCode::RuleNotFound,
            Self::InsufficientAvailability { .. } => ErrorCode::InsufficientAvailability,
            Self::InvalidCode { .. } => ErrorCode::InvalidCode,
            Self::ExpiredCode { .. } => ErrorCode::ExpiredCode,
            Self::ScopeMismatch { .. } => ErrorCode::ScopeMismatch,
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::AlreadyCheckedOut { .. } => ErrorCode::AlreadyCheckedOut,
            Self::Storage { .. } => ErrorCode::Storage,
        }
    }

    /// Only storage failures are worth retrying; business rejections are
    /// deterministic and must surface immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

/// Result type for engine operations
pub type BookingResult<T> = Result<T, BookingError>;
