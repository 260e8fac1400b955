//! # Domain Types
//!
//! Types passed into and out of the order total calculator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │ PricingOptions  │   │  PromoCounters  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  price?         │   │  tax_rate?      │   │  promo_used     │       │
//! │  │  qty?           │   │  free_ship_thr? │   │  (caller-owned) │       │
//! │  │  category?      │   │  ship_per_kg?   │   └─────────────────┘       │
//! │  │  weight?        │   │  promo_code?    │                              │
//! │  └─────────────────┘   │  day_of_week?   │   ┌─────────────────┐       │
//! │                        └─────────────────┘   │ OrderBreakdown  │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  ─────────────  │       │
//! │  │  ItemCategory   │   │  DiscountKind   │   │  subtotal       │       │
//! │  │  Food/Lux/Normal│   │  Midweek/Promo  │   │  discount       │       │
//! │  └─────────────────┘   └─────────────────┘   │  taxed/shipping │       │
//! │                                              │  total          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every input field is optional. "Absent" and "zero" are distinct values
//! but usually resolve to the same behaviour (see [`CartLine`]).

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{MIDWEEK_DAY, PROMO_CODE_SAVE10};

// =============================================================================
// Item Category
// =============================================================================

/// Category of a cart line. Only [`ItemCategory::Lux`] affects pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Groceries.
    Food,
    /// Luxury goods; adds a tax surcharge to the whole order.
    Lux,
    /// Everything else.
    Normal,
}

impl ItemCategory {
    /// Returns true for luxury goods.
    #[inline]
    pub fn is_luxury(&self) -> bool {
        matches!(self, ItemCategory::Lux)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCategory::Food => write!(f, "food"),
            ItemCategory::Lux => write!(f, "lux"),
            ItemCategory::Normal => write!(f, "normal"),
        }
    }
}

impl FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(ItemCategory::Food),
            "lux" | "luxury" => Ok(ItemCategory::Lux),
            "normal" => Ok(ItemCategory::Normal),
            other => Err(format!(
                "Unknown item category: '{}'. Valid options: food, lux, normal",
                other
            )),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// Why a cart line is left out of the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The slot holds no line at all.
    MissingLine,
    /// `price` is absent.
    MissingPrice,
    /// `qty` is absent.
    MissingQuantity,
    /// `price < 0`.
    NegativePrice,
    /// `qty <= 0`.
    NonPositiveQuantity,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::MissingLine => "missing line",
            SkipReason::MissingPrice => "missing price",
            SkipReason::MissingQuantity => "missing quantity",
            SkipReason::NegativePrice => "negative price",
            SkipReason::NonPositiveQuantity => "non-positive quantity",
        };
        f.write_str(s)
    }
}

/// One line of a cart.
///
/// ## Validity
/// A line counts toward the order only if `price` and `qty` are both
/// present, `price >= 0` and `qty > 0`. Anything else is skipped without
/// error.
///
/// ## Absent vs Zero
/// - `weight: None` and `weight: Some(0.0)` both add no shipping weight
/// - `category: None` and `category: Some(Normal | Food)` are both "not luxury"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Unit price.
    #[serde(default)]
    pub price: Option<f64>,

    /// Quantity.
    #[serde(default)]
    pub qty: Option<i64>,

    /// Item category.
    #[serde(default)]
    pub category: Option<ItemCategory>,

    /// Per-unit weight in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl CartLine {
    /// Creates a line with a price and quantity and no category or weight.
    pub fn new(price: f64, qty: i64) -> Self {
        CartLine {
            price: Some(price),
            qty: Some(qty),
            category: None,
            weight: None,
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the per-unit weight in kilograms.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns why this line would be skipped, or `None` if it counts.
    ///
    /// Checks run in the same order the calculator applies them: missing
    /// fields first, then out-of-range values.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        let (price, qty) = match (self.price, self.qty) {
            (None, _) => return Some(SkipReason::MissingPrice),
            (_, None) => return Some(SkipReason::MissingQuantity),
            (Some(price), Some(qty)) => (price, qty),
        };

        if price < 0.0 {
            return Some(SkipReason::NegativePrice);
        }
        if qty <= 0 {
            return Some(SkipReason::NonPositiveQuantity);
        }

        None
    }

    /// Returns true if the line counts toward the order.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.skip_reason().is_none()
    }

    /// Returns true if the line is in the luxury category.
    #[inline]
    pub fn is_luxury(&self) -> bool {
        self.category.is_some_and(|c| c.is_luxury())
    }
}

/// Anything the calculator can read as a possibly-absent cart line.
///
/// Lets callers pass `&[CartLine]` directly, or `&[Option<CartLine>]` when
/// the source data can contain holes.
pub trait AsCartLine {
    /// Returns the line, or `None` for an absent slot.
    fn as_cart_line(&self) -> Option<&CartLine>;
}

impl AsCartLine for CartLine {
    #[inline]
    fn as_cart_line(&self) -> Option<&CartLine> {
        Some(self)
    }
}

impl AsCartLine for Option<CartLine> {
    #[inline]
    fn as_cart_line(&self) -> Option<&CartLine> {
        self.as_ref()
    }
}

impl<T: AsCartLine + ?Sized> AsCartLine for &T {
    #[inline]
    fn as_cart_line(&self) -> Option<&CartLine> {
        (**self).as_cart_line()
    }
}

// =============================================================================
// Pricing Options
// =============================================================================

/// Per-call pricing options.
///
/// All fields are independently optional:
///
/// | Field                 | When absent                          |
/// |-----------------------|--------------------------------------|
/// | `tax_rate`            | calculator default (0.10)            |
/// | `free_ship_threshold` | calculator default (100)             |
/// | `ship_per_kg`         | calculator default (2.5)             |
/// | `promo_code`          | no promo discount                    |
/// | `day_of_week`         | no midweek discount                  |
///
/// `day_of_week` counts from Sunday = 0; Wednesday (3) earns the midweek
/// discount. Only the exact promo code `"SAVE10"` has an effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingOptions {
    /// Base tax rate (0.10 = 10%).
    #[serde(default)]
    pub tax_rate: Option<f64>,

    /// Taxed amount at or above which shipping is free.
    #[serde(default)]
    pub free_ship_threshold: Option<f64>,

    /// Shipping charge per started kilogram.
    #[serde(default)]
    pub ship_per_kg: Option<f64>,

    /// Promo code entered by the customer.
    #[serde(default)]
    pub promo_code: Option<String>,

    /// Day of the week, 0 = Sunday … 6 = Saturday.
    #[serde(default)]
    pub day_of_week: Option<u8>,
}

impl PricingOptions {
    /// Creates options with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn with_free_ship_threshold(mut self, threshold: f64) -> Self {
        self.free_ship_threshold = Some(threshold);
        self
    }

    pub fn with_ship_per_kg(mut self, rate: f64) -> Self {
        self.ship_per_kg = Some(rate);
        self
    }

    pub fn with_promo_code(mut self, code: impl Into<String>) -> Self {
        self.promo_code = Some(code.into());
        self
    }

    pub fn with_day_of_week(mut self, day: u8) -> Self {
        self.day_of_week = Some(day);
        self
    }

    /// Sets `day_of_week` from a calendar weekday.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Weekday;
    /// use order_total::PricingOptions;
    ///
    /// let opts = PricingOptions::new().on_weekday(Weekday::Wed);
    /// assert_eq!(opts.day_of_week, Some(3));
    /// assert!(opts.is_midweek());
    /// ```
    pub fn on_weekday(mut self, weekday: Weekday) -> Self {
        self.day_of_week = Some(weekday.num_days_from_sunday() as u8);
        self
    }

    /// Returns true if the midweek discount applies.
    #[inline]
    pub fn is_midweek(&self) -> bool {
        self.day_of_week == Some(MIDWEEK_DAY)
    }

    /// Returns true if the promo code is exactly `"SAVE10"`.
    #[inline]
    pub fn has_save10(&self) -> bool {
        self.promo_code.as_deref() == Some(PROMO_CODE_SAVE10)
    }
}

// =============================================================================
// Promo Counters
// =============================================================================

/// Caller-owned usage counters.
///
/// The calculator bumps `promo_used` once per call that carries the
/// `"SAVE10"` code and reaches discount selection. It never creates or
/// resets the counter.
///
/// ## Sharing
/// The calculator borrows the counter mutably for the duration of one
/// call. To share a counter between threads, keep it behind a
/// `Mutex<PromoCounters>` and pass the guard; the calculator does no
/// locking of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromoCounters {
    /// Number of priced orders that carried the promo code.
    pub promo_used: i64,
}

impl PromoCounters {
    /// Creates counters starting at `promo_used`.
    pub const fn starting_at(promo_used: i64) -> Self {
        PromoCounters { promo_used }
    }

    /// Records one promo use.
    #[inline]
    pub fn record_promo_use(&mut self) {
        self.promo_used = self.promo_used.saturating_add(1);
    }
}

// =============================================================================
// Order Breakdown
// =============================================================================

/// Which discount was applied. The two never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// 5% Wednesday discount.
    Midweek,
    /// 10% `SAVE10` discount.
    Promo,
}

/// Intermediate values of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderBreakdown {
    /// Sum of `price × qty` over valid lines.
    pub subtotal: f64,
    /// Sum of `weight × qty` over valid lines with positive weight (kg).
    pub total_weight: f64,
    /// True if any valid line is luxury.
    pub has_luxury: bool,
    /// Tax rate after the luxury surcharge.
    pub effective_tax_rate: f64,
    /// Discount subtracted from the subtotal before tax.
    pub discount: f64,
    /// Source of `discount`, if any.
    pub applied_discount: Option<DiscountKind>,
    /// Discounted subtotal with tax, rounded to cents.
    pub taxed_amount: f64,
    /// Shipping charge (not rounded on its own).
    pub shipping: f64,
    /// Final payable amount, rounded to cents, never negative.
    pub total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
