//! # Validation Module
//!
//! Opt-in strict validation for callers that would rather reject bad input
//! than have it skipped.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Ways to Treat Bad Input                        │
//! │                                                                         │
//! │  Calculator (always)                                                   │
//! │  ├── Bad line      → skipped                                           │
//! │  └── Absent option → default                                           │
//! │           │                                                             │
//! │  THIS MODULE (only if the caller asks)                                 │
//! │  ├── Bad line      → ValidationError::Line { index, .. }               │
//! │  └── Bad option    → ValidationError                                   │
//! │                                                                         │
//! │  Passing validation never changes what the calculator returns.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_total::validation::{validate_cart, validate_options};
//! use order_total::{CartLine, PricingOptions};
//!
//! let cart = vec![CartLine::new(20.0, 2)];
//! assert!(validate_cart(&cart).is_ok());
//! assert!(validate_options(&PricingOptions::new().with_day_of_week(3)).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::{AsCartLine, CartLine, PricingOptions};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a non-negative amount (price, rate, threshold, weight).
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must be zero or greater
///
/// ## Example
/// ```rust
/// use order_total::validation::validate_amount;
///
/// assert!(validate_amount("price", 0.0).is_ok());
/// assert!(validate_amount("price", -0.01).is_err());
/// assert!(validate_amount("price", f64::NAN).is_err());
/// ```
pub fn validate_amount(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    Ok(())
}

/// Validates a day of the week (0 = Sunday … 6 = Saturday).
pub fn validate_day_of_week(day: u8) -> ValidationResult<()> {
    if day > 6 {
        return Err(ValidationError::OutOfRange {
            field: "day_of_week".to_string(),
            min: 0,
            max: 6,
        });
    }

    Ok(())
}

// =============================================================================
// Line Validators
// =============================================================================

/// Validates one cart line.
///
/// ## Rules
/// - `price` present, finite, >= 0
/// - `qty` present, > 0
/// - `weight`, if present, finite and >= 0
///
/// Every line that passes here is also counted by the calculator. The
/// reverse is not true: the calculator accepts a NaN weight, for example.
pub fn validate_line(line: &CartLine) -> ValidationResult<()> {
    let price = line.price.ok_or_else(|| ValidationError::Required {
        field: "price".to_string(),
    })?;
    let qty = line.qty.ok_or_else(|| ValidationError::Required {
        field: "qty".to_string(),
    })?;

    validate_amount("price", price)?;
    validate_quantity(qty)?;

    if let Some(weight) = line.weight {
        validate_amount("weight", weight)?;
    }

    Ok(())
}

/// Validates every line of a cart, stopping at the first bad one.
///
/// Errors are wrapped in [`ValidationError::Line`] with the zero-based
/// index of the offending line. An empty cart is valid.
pub fn validate_cart<L: AsCartLine>(cart: &[L]) -> ValidationResult<()> {
    for (index, slot) in cart.iter().enumerate() {
        let result = match slot.as_cart_line() {
            Some(line) => validate_line(line),
            None => Err(ValidationError::Required {
                field: "line".to_string(),
            }),
        };

        result.map_err(|source| ValidationError::Line {
            index,
            source: Box::new(source),
        })?;
    }

    Ok(())
}

// =============================================================================
// Option Validators
// =============================================================================

/// Validates the pricing options that are present.
///
/// ## Rules
/// - `tax_rate`, `free_ship_threshold`, `ship_per_kg`: finite and >= 0
/// - `day_of_week`: 0..=6
///
/// `promo_code` is not checked; unknown codes simply have no effect.
pub fn validate_options(options: &PricingOptions) -> ValidationResult<()> {
    let amounts = [
        ("tax_rate", options.tax_rate),
        ("free_ship_threshold", options.free_ship_threshold),
        ("ship_per_kg", options.ship_per_kg),
    ];

    for (field, value) in amounts {
        if let Some(value) = value {
            validate_amount(field, value)?;
        }
    }

    if let Some(day) = options.day_of_week {
        validate_day_of_week(day)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("price", 0.0).is_ok());
        assert!(validate_amount("price", 99.99).is_ok());

        assert_eq!(
            validate_amount("price", -5.0),
            Err(ValidationError::Negative {
                field: "price".to_string()
            })
        );
        assert!(validate_amount("price", f64::INFINITY).is_err());
        assert!(validate_amount("price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_day_of_week() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(6).is_ok());
        assert!(validate_day_of_week(7).is_err());
    }

    #[test]
    fn test_validate_line() {
        assert!(validate_line(&CartLine::new(15.0, 1).with_weight(0.4)).is_ok());

        let missing_qty = CartLine {
            price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(
            validate_line(&missing_qty),
            Err(ValidationError::Required {
                field: "qty".to_string()
            })
        );
        assert!(validate_line(&CartLine::new(-5.0, 2)).is_err());
        assert!(validate_line(&CartLine::new(10.0, 0)).is_err());
        assert!(validate_line(&CartLine::new(10.0, 1).with_weight(-1.0)).is_err());
    }

    #[test]
    fn test_validate_cart_reports_index() {
        let cart = vec![
            Some(CartLine::new(20.0, 2)),
            None,
            Some(CartLine::new(10.0, 0)),
        ];

        let err = validate_cart(&cart).unwrap_err();
        assert_eq!(err.to_string(), "line 1: line is required");

        let cart = vec![CartLine::new(20.0, 2), CartLine::new(10.0, 0)];
        let err = validate_cart(&cart).unwrap_err();
        assert!(matches!(err, ValidationError::Line { index: 1, .. }));

        assert!(validate_cart::<CartLine>(&[]).is_ok());
    }

    #[test]
    fn test_validate_options() {
        assert!(validate_options(&PricingOptions::default()).is_ok());
        assert!(validate_options(
            &PricingOptions::new()
                .with_tax_rate(0.0)
                .with_free_ship_threshold(9999.0)
                .with_ship_per_kg(3.0)
                .with_day_of_week(3)
                .with_promo_code("WHATEVER")
        )
        .is_ok());

        assert!(validate_options(&PricingOptions::new().with_tax_rate(-0.1)).is_err());
        assert!(validate_options(&PricingOptions::new().with_ship_per_kg(f64::NAN)).is_err());
        assert!(validate_options(&PricingOptions::new().with_day_of_week(7)).is_err());
    }
}
