//! # Order Total Calculator
//!
//! Turns cart lines and pricing options into a payable total.
//!
//! ## Calculation Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Empty cart                      → 0.0                               │
//! │  2. Resolve options against defaults                                    │
//! │  3. Aggregate valid lines           → subtotal, weight, luxury flag     │
//! │  4. subtotal == 0                   → 0.0                               │
//! │  5. Effective tax = base (+0.05 if any luxury line)                     │
//! │  6. Discount = max(midweek 5%, SAVE10 10%)      never stacked           │
//! │  7. taxed    = round2((subtotal - discount) × (1 + tax))                │
//! │  8. shipping = taxed ≥ threshold ? 0 : ceil(weight) × per_kg            │
//! │  9. total    = max(0, round2(taxed + shipping))                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never fails. Bad lines are skipped and absent options
//! fall back to defaults. The only side effect is the optional promo
//! counter, bumped once per call that reaches step 6 with `"SAVE10"`,
//! whether or not the promo discount ends up being the larger one.
//!
//! Line order does not matter: aggregation is a plain sum and an OR.

use tracing::{debug, trace};

use crate::config::PricingConfig;
use crate::error::PricingResult;
use crate::money::{percent_of, round2, shipping_units};
use crate::types::{
    AsCartLine, DiscountKind, OrderBreakdown, PricingOptions, PromoCounters, SkipReason,
};
use crate::validation::{validate_cart, validate_options};
use crate::{LUXURY_TAX_SURCHARGE, MIDWEEK_DISCOUNT_RATE, PROMO_DISCOUNT_RATE};

// =============================================================================
// Free Functions
// =============================================================================

/// Computes the payable total with the built-in defaults.
///
/// Returns a non-negative amount rounded to two decimals, or `0.0` for an
/// empty cart or a cart without any positive valid line.
///
/// ## Example
/// ```rust
/// use order_total::{compute_order_total, CartLine, PricingOptions};
///
/// let cart = vec![CartLine::new(20.0, 2), CartLine::new(15.0, 1).with_weight(0.4)];
/// let opts = PricingOptions::new()
///     .with_tax_rate(0.1)
///     .with_free_ship_threshold(100.0)
///     .with_ship_per_kg(3.0);
///
/// assert_eq!(compute_order_total(&cart, &opts, None), 63.5);
/// ```
pub fn compute_order_total<L: AsCartLine>(
    cart: &[L],
    options: &PricingOptions,
    counters: Option<&mut PromoCounters>,
) -> f64 {
    OrderTotalCalculator::default().compute(cart, options, counters)
}

/// Computes the full breakdown with the built-in defaults.
///
/// Returns `None` where [`compute_order_total`] returns `0.0` through an
/// early exit.
pub fn compute_order_breakdown<L: AsCartLine>(
    cart: &[L],
    options: &PricingOptions,
    counters: Option<&mut PromoCounters>,
) -> Option<OrderBreakdown> {
    OrderTotalCalculator::default().breakdown(cart, options, counters)
}

// =============================================================================
// Calculator
// =============================================================================

/// Order total calculator bound to a set of defaults.
///
/// `OrderTotalCalculator::default()` uses the built-in defaults
/// (tax 0.10, free shipping from 100, 2.5 per kg). Fields present on
/// [`PricingOptions`] always take precedence over the configured ones.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderTotalCalculator {
    config: PricingConfig,
}

/// Option values after falling back to defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedRates {
    tax_rate: f64,
    free_ship_threshold: f64,
    ship_per_kg: f64,
}

/// Sums over the valid lines of a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LineTotals {
    subtotal: f64,
    total_weight: f64,
    has_luxury: bool,
}

impl OrderTotalCalculator {
    /// Creates a calculator using `config` for absent option fields.
    pub fn new(config: PricingConfig) -> Self {
        OrderTotalCalculator { config }
    }

    /// Returns the configured defaults.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Computes the payable total. See the module docs for the steps.
    pub fn compute<L: AsCartLine>(
        &self,
        cart: &[L],
        options: &PricingOptions,
        counters: Option<&mut PromoCounters>,
    ) -> f64 {
        self.breakdown(cart, options, counters)
            .map_or(0.0, |breakdown| breakdown.total)
    }

    /// Validates the cart and options strictly, then computes the total.
    ///
    /// Any line or option the lenient path would skip or accept silently
    /// is reported instead. On success the result equals [`Self::compute`].
    /// On failure the counter is not touched.
    pub fn compute_strict<L: AsCartLine>(
        &self,
        cart: &[L],
        options: &PricingOptions,
        counters: Option<&mut PromoCounters>,
    ) -> PricingResult<f64> {
        validate_cart(cart)?;
        validate_options(options)?;
        Ok(self.compute(cart, options, counters))
    }

    /// Computes the total and every intermediate value.
    ///
    /// Returns `None` for an empty cart and for a zero subtotal; in both
    /// cases the counter is left untouched.
    pub fn breakdown<L: AsCartLine>(
        &self,
        cart: &[L],
        options: &PricingOptions,
        counters: Option<&mut PromoCounters>,
    ) -> Option<OrderBreakdown> {
        if cart.is_empty() {
            debug!("Empty cart, total is zero");
            return None;
        }

        let rates = self.resolve(options);
        let totals = aggregate_lines(cart);

        if totals.subtotal == 0.0 {
            debug!(lines = cart.len(), "No line contributed to the subtotal");
            return None;
        }

        let effective_tax_rate = if totals.has_luxury {
            rates.tax_rate + LUXURY_TAX_SURCHARGE
        } else {
            rates.tax_rate
        };

        let (discount, applied_discount) = select_discount(totals.subtotal, options, counters);

        let taxed_amount = round2((totals.subtotal - discount) * (1.0 + effective_tax_rate));

        let shipping = if taxed_amount >= rates.free_ship_threshold {
            0.0
        } else {
            shipping_units(totals.total_weight) * rates.ship_per_kg
        };

        let total = round2(taxed_amount + shipping).max(0.0);

        debug!(
            subtotal = totals.subtotal,
            discount,
            ?applied_discount,
            effective_tax_rate,
            taxed_amount,
            shipping,
            total,
            "Computed order total"
        );

        Some(OrderBreakdown {
            subtotal: totals.subtotal,
            total_weight: totals.total_weight,
            has_luxury: totals.has_luxury,
            effective_tax_rate,
            discount,
            applied_discount,
            taxed_amount,
            shipping,
            total,
        })
    }

    fn resolve(&self, options: &PricingOptions) -> ResolvedRates {
        ResolvedRates {
            tax_rate: options.tax_rate.unwrap_or(self.config.tax_rate()),
            free_ship_threshold: options
                .free_ship_threshold
                .unwrap_or(self.config.free_ship_threshold()),
            ship_per_kg: options.ship_per_kg.unwrap_or(self.config.ship_per_kg()),
        }
    }
}

// =============================================================================
// Steps
// =============================================================================

/// Sums price, weight and the luxury flag over valid lines.
fn aggregate_lines<L: AsCartLine>(cart: &[L]) -> LineTotals {
    let mut totals = LineTotals::default();

    for (index, slot) in cart.iter().enumerate() {
        let Some(line) = slot.as_cart_line() else {
            debug!(index, reason = %SkipReason::MissingLine, "Skipping cart line");
            continue;
        };
        if let Some(reason) = line.skip_reason() {
            debug!(index, reason = %reason, "Skipping cart line");
            continue;
        }

        // skip_reason() == None guarantees both are present
        let (Some(price), Some(qty)) = (line.price, line.qty) else {
            continue;
        };
        let qty = qty as f64;

        totals.subtotal += price * qty;

        let weight = line.weight.unwrap_or(0.0);
        if weight > 0.0 {
            totals.total_weight += weight * qty;
        }

        if line.is_luxury() {
            totals.has_luxury = true;
        }

        trace!(index, price, qty, weight, "Aggregated cart line");
    }

    totals
}

/// Picks the larger of the midweek and promo discounts.
///
/// Bumps the promo counter whenever `"SAVE10"` is present.
fn select_discount(
    subtotal: f64,
    options: &PricingOptions,
    counters: Option<&mut PromoCounters>,
) -> (f64, Option<DiscountKind>) {
    let midweek = if options.is_midweek() {
        Some(percent_of(subtotal, MIDWEEK_DISCOUNT_RATE))
    } else {
        None
    };

    if !options.has_save10() {
        return match midweek {
            Some(amount) => (amount, Some(DiscountKind::Midweek)),
            None => (0.0, None),
        };
    }

    if let Some(counters) = counters {
        counters.record_promo_use();
        debug!(promo_used = counters.promo_used, "Recorded promo use");
    }

    let promo = percent_of(subtotal, PROMO_DISCOUNT_RATE);
    match midweek {
        Some(amount) if amount > promo => (amount, Some(DiscountKind::Midweek)),
        _ => (promo, Some(DiscountKind::Promo)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartLine, ItemCategory};

    #[test]
    fn test_aggregate_skips_invalid_lines() {
        let cart = vec![
            None,
            Some(CartLine {
                qty: Some(1),
                ..Default::default()
            }),
            Some(CartLine::new(-5.0, 2)),
            Some(CartLine::new(10.0, 0)),
            Some(CartLine::new(20.0, 2).with_weight(0.5)),
        ];

        let totals = aggregate_lines(&cart);
        assert_eq!(totals.subtotal, 40.0);
        assert_eq!(totals.total_weight, 1.0);
        assert!(!totals.has_luxury);
    }

    #[test]
    fn test_aggregate_ignores_non_positive_weight() {
        let cart = vec![
            CartLine::new(10.0, 1),
            CartLine::new(5.0, 2).with_weight(0.0),
            CartLine::new(5.0, 2).with_weight(-3.0),
        ];

        let totals = aggregate_lines(&cart);
        assert_eq!(totals.subtotal, 30.0);
        assert_eq!(totals.total_weight, 0.0);
    }

    #[test]
    fn test_aggregate_luxury_flag_is_sticky() {
        let cart = vec![
            CartLine::new(10.0, 1).with_category(ItemCategory::Lux),
            CartLine::new(10.0, 1).with_category(ItemCategory::Normal),
            CartLine::new(10.0, 1),
        ];
        assert!(aggregate_lines(&cart).has_luxury);

        // A skipped luxury line does not count
        let cart = vec![
            CartLine::new(10.0, 0).with_category(ItemCategory::Lux),
            CartLine::new(10.0, 1),
        ];
        assert!(!aggregate_lines(&cart).has_luxury);
    }

    #[test]
    fn test_select_discount_none() {
        let (discount, kind) = select_discount(100.0, &PricingOptions::default(), None);
        assert_eq!(discount, 0.0);
        assert_eq!(kind, None);
    }

    #[test]
    fn test_select_discount_midweek_only() {
        let opts = PricingOptions::new().with_day_of_week(3);
        let (discount, kind) = select_discount(100.0, &opts, None);
        assert_eq!(discount, 5.0);
        assert_eq!(kind, Some(DiscountKind::Midweek));
    }

    #[test]
    fn test_select_discount_promo_beats_midweek() {
        let opts = PricingOptions::new()
            .with_day_of_week(3)
            .with_promo_code("SAVE10");
        let mut counters = PromoCounters::default();

        let (discount, kind) = select_discount(100.0, &opts, Some(&mut counters));
        assert_eq!(discount, 10.0);
        assert_eq!(kind, Some(DiscountKind::Promo));
        assert_eq!(counters.promo_used, 1);
    }

    #[test]
    fn test_select_discount_unknown_code_does_nothing() {
        let opts = PricingOptions::new().with_promo_code("SAVE20");
        let mut counters = PromoCounters::default();

        let (discount, kind) = select_discount(100.0, &opts, Some(&mut counters));
        assert_eq!(discount, 0.0);
        assert_eq!(kind, None);
        assert_eq!(counters.promo_used, 0);
    }

    #[test]
    fn test_resolve_prefers_options_then_config() {
        let config = PricingConfig::from_toml_str(
            "[pricing]\ntax_rate = 0.2\nfree_ship_threshold = 50.0\nship_per_kg = 1.0\n",
        )
        .unwrap();
        let calculator = OrderTotalCalculator::new(config);

        let rates = calculator.resolve(&PricingOptions::new().with_ship_per_kg(7.0));
        assert_eq!(rates.tax_rate, 0.2);
        assert_eq!(rates.free_ship_threshold, 50.0);
        assert_eq!(rates.ship_per_kg, 7.0);

        let rates = OrderTotalCalculator::default().resolve(&PricingOptions::default());
        assert_eq!(rates.tax_rate, 0.10);
        assert_eq!(rates.free_ship_threshold, 100.0);
        assert_eq!(rates.ship_per_kg, 2.5);
    }

    #[test]
    fn test_breakdown_matches_total() {
        let cart = vec![CartLine::new(100.0, 1)
            .with_category(ItemCategory::Lux)
            .with_weight(1.2)];
        let opts = PricingOptions::new()
            .with_day_of_week(3)
            .with_tax_rate(0.1)
            .with_free_ship_threshold(120.0)
            .with_ship_per_kg(2.5);

        let breakdown = compute_order_breakdown(&cart, &opts, None).unwrap();
        assert_eq!(breakdown.subtotal, 100.0);
        assert_eq!(breakdown.discount, 5.0);
        assert_eq!(breakdown.applied_discount, Some(DiscountKind::Midweek));
        assert!(breakdown.has_luxury);
        assert_eq!(breakdown.taxed_amount, 109.25);
        assert_eq!(breakdown.shipping, 5.0);
        assert_eq!(breakdown.total, compute_order_total(&cart, &opts, None));
    }

    #[test]
    fn test_compute_strict() {
        let calculator = OrderTotalCalculator::default();
        let opts = PricingOptions::new().with_promo_code("SAVE10");
        let mut counters = PromoCounters::default();

        let total = calculator
            .compute_strict(&[CartLine::new(100.0, 1)], &opts, Some(&mut counters))
            .unwrap();
        assert_eq!(total, 99.0);
        assert_eq!(counters.promo_used, 1);

        let cart = vec![CartLine::new(100.0, 1), CartLine::new(10.0, 0)];
        let err = calculator
            .compute_strict(&cart, &opts, Some(&mut counters))
            .unwrap_err();
        assert!(matches!(err, crate::PricingError::Validation(_)));
        assert_eq!(counters.promo_used, 1);

        let bad_day = PricingOptions::new().with_day_of_week(9);
        assert!(calculator
            .compute_strict(&[CartLine::new(1.0, 1)], &bad_day, None)
            .is_err());
    }

    #[test]
    fn test_custom_defaults_change_result() {
        let config = PricingConfig::from_toml_str("[pricing]\ntax_rate = 0.0\n").unwrap();
        let calculator = OrderTotalCalculator::new(config);
        let cart = vec![CartLine::new(200.0, 1)];

        assert_eq!(calculator.compute(&cart, &PricingOptions::default(), None), 200.0);
        assert_eq!(
            compute_order_total(&cart, &PricingOptions::default(), None),
            220.0
        );
    }
}
