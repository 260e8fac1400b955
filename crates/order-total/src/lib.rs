//! # order-total: Cart Total Calculation
//!
//! Computes the final payable amount for a shopping cart from its lines and
//! a set of pricing options. One pure calculation, no I/O.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_order_total                                 │
//! │                                                                         │
//! │   cart empty? ────────────────────────────────────────────► 0.0         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   resolve options (defaults: tax 10%, free ship ≥ 100, 2.5/kg)          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   aggregate valid lines ──► subtotal, total weight, has luxury          │
//! │        │                                                                │
//! │   subtotal == 0? ─────────────────────────────────────────► 0.0         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   tax = base (+5% if luxury)                                            │
//! │   discount = max(Wednesday 5%, SAVE10 10%)   ◄── counter +1 on SAVE10   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   taxed    = round2((subtotal - discount) × (1 + tax))                  │
//! │   shipping = taxed ≥ threshold ? 0 : ceil(weight) × per_kg              │
//! │   total    = max(0, round2(taxed + shipping))                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - The calculation itself
//! - [`types`] - Cart lines, options, counters, breakdown
//! - [`money`] - Two-decimal rounding and weight ceiling
//! - [`validation`] - Opt-in strict checks for callers that want errors
//! - [`config`] - Calculator defaults from TOML and environment
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use order_total::{compute_order_total, CartLine, PricingOptions, PromoCounters};
//!
//! let cart = vec![
//!     CartLine::new(90.0, 1).with_weight(0.5),
//!     CartLine::new(30.0, 1),
//! ];
//! let opts = PricingOptions::new()
//!     .with_promo_code("SAVE10")
//!     .with_free_ship_threshold(110.0);
//!
//! let mut counters = PromoCounters::default();
//! let total = compute_order_total(&cart, &opts, Some(&mut counters));
//!
//! assert_eq!(total, 118.8);
//! assert_eq!(counters.promo_used, 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod config;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{compute_order_breakdown, compute_order_total, OrderTotalCalculator};
pub use config::PricingConfig;
pub use error::{PricingError, PricingResult, ValidationError};
pub use types::*;

// =============================================================================
// Pricing Constants
// =============================================================================

/// Tax rate used when the options carry none.
pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Free-shipping threshold used when the options carry none.
pub const DEFAULT_FREE_SHIP_THRESHOLD: f64 = 100.0;

/// Per-kilogram shipping rate used when the options carry none.
pub const DEFAULT_SHIP_PER_KG: f64 = 2.5;

/// Added to the tax rate when any line is luxury.
pub const LUXURY_TAX_SURCHARGE: f64 = 0.05;

/// Share of the subtotal taken off on Wednesdays.
pub const MIDWEEK_DISCOUNT_RATE: f64 = 0.05;

/// Share of the subtotal taken off with [`PROMO_CODE_SAVE10`].
pub const PROMO_DISCOUNT_RATE: f64 = 0.10;

/// The only promo code with an effect. Compared exactly.
pub const PROMO_CODE_SAVE10: &str = "SAVE10";

/// Day number of Wednesday, counting Sunday as 0.
pub const MIDWEEK_DAY: u8 = 3;
