//! # Money Module
//!
//! Two-decimal rounding and shipping-unit helpers for `f64` amounts.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT CONTRACT                                            │
//! │                                                                         │
//! │  Totals must match a reference double-precision calculation, so        │
//! │  amounts stay f64 and are rounded to cents at exactly two points:      │
//! │                                                                         │
//! │    taxed = round2((subtotal - discount) × (1 + tax))                   │
//! │    total = round2(taxed + shipping)                                    │
//! │                                                                         │
//! │  Nothing else is rounded. Shipping is NOT rounded on its own.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use order_total::money::{round2, shipping_units};
//!
//! assert_eq!(round2(60.50000000000001), 60.5);
//! assert_eq!(shipping_units(0.4), 1.0);
//! ```

/// Rounds to two decimal places, half away from zero.
///
/// ## Halfway Cases
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  ROUND HALF AWAY FROM ZERO                                          │
/// │                                                                     │
/// │    0.125 → 12.5 cents → 13 → 0.13                                  │
/// │    0.625 → 62.5 cents → 63 → 0.63   (bankers would give 0.62)      │
/// │   -0.125 → -12.5 cents → -13 → -0.13                               │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Only values whose cent-scaled form is exactly `k + 0.5` in binary hit
/// the halfway rule; most decimal literals like `1.005` are already a hair
/// below or above it.
///
/// ## Example
/// ```rust
/// use order_total::money::round2;
///
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(118.80000000000001), 118.8);
/// ```
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Returns the number of billable kilograms for a total weight.
///
/// Weight is ceiling-rounded to the next whole kilogram: `0` bills nothing,
/// anything in `(0, 1]` bills one kilogram.
///
/// ## Example
/// ```rust
/// use order_total::money::shipping_units;
///
/// assert_eq!(shipping_units(0.0), 0.0);
/// assert_eq!(shipping_units(0.01), 1.0);
/// assert_eq!(shipping_units(1.2), 2.0);
/// ```
#[inline]
pub fn shipping_units(total_weight: f64) -> f64 {
    total_weight.ceil()
}

/// Returns `rate` of `amount` without rounding (0.05 = 5%).
#[inline]
pub fn percent_of(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Converts a two-decimal amount to integer cents, for callers that store
/// totals as integers.
///
/// ## Example
/// ```rust
/// use order_total::money::to_cents;
///
/// assert_eq!(to_cents(114.25), 11425);
/// assert_eq!(to_cents(99.99), 9999);
/// ```
#[inline]
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

// =============================================================================
// Unit Tests
// =============================================================================
