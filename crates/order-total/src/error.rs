//! # Error Types
//!
//! Error types for order-total.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  calculator         - NO ERRORS. Bad lines are skipped, missing        │
//! │                       options fall back to defaults.                    │
//! │                                                                         │
//! │  validation         - ValidationError (opt-in strict checks)           │
//! │  config             - PricingError    (loading defaults)               │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → caller                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised around the calculator (never by it).
#[derive(Debug, Error)]
pub enum PricingError {
    /// Configuration contains a value the calculator cannot use.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load pricing config: {0}")]
    ConfigLoadFailed(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for PricingError {
    fn from(err: std::io::Error) -> Self {
        PricingError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for PricingError {
    fn from(err: toml::de::Error) -> Self {
        PricingError::ConfigLoadFailed(err.to_string())
    }
}

impl PricingError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidConfig(_) | PricingError::ConfigLoadFailed(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Only produced by the strict validators in [`crate::validation`]. The
/// calculator itself absorbs the same conditions by skipping lines.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A single cart line failed validation.
    #[error("line {index}: {source}")]
    Line {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
