//! # Money Module
//!
//! Provides `Money` for monetary values and `DiscountRate` for percentage
//! discounts, both backed by integers.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    12.10 * 3 = 36.300000000000004                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (paise)                              │
//! │    1210 * 3 = 3630 → "36.30"                                            │
//! │                                                                         │
//! │  Decimal text from the sheet or the operator goes through              │
//! │  rust_decimal straight into minor units, so "12.10" never becomes      │
//! │  a float.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharmacy_core::money::{DiscountRate, Money};
//!
//! let price = Money::parse("12.50").unwrap();
//! assert_eq!(price.cents(), 1250);
//!
//! let rate = DiscountRate::from_bps(1000); // 10%
//! assert_eq!(price.percentage(rate).unwrap().cents(), 125);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Basis points in 100%.
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses plain decimal text ("12.5", "-3", "0.005").
///
/// Surrounding whitespace is ignored. Exponent notation and thousands
/// separators are rejected.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Scales a decimal to hundredths, rounding half away from zero.
///
/// `None` when the result does not fit an `i64`.
///
/// ## Example
/// ```rust
/// use pharmacy_core::money::{parse_decimal, to_hundredths};
///
/// assert_eq!(parse_decimal("12.5").and_then(to_hundredths), Some(1250));
/// assert_eq!(parse_decimal("0.005").and_then(to_hundredths), Some(1));
/// assert_eq!(parse_decimal("-3").and_then(to_hundredths), Some(-300));
/// assert_eq!(parse_decimal("1e3"), None);
/// ```
pub fn to_hundredths(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for ₹).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never needs a separate type
/// - **Single field tuple struct**: serializes as a plain integer
/// - **No float constructor**: values enter through [`Money::parse`] or
///   [`Money::from_cents`] only
/// - **Checked arithmetic**: a price that parsed fine can still overflow
///   once multiplied, so products of amounts return `Option`
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Invoice.subtotal ──► Invoice.discount_amount ──► Invoice.total
///                                                                       │
///                                             Receipt: "Total Amount: ₹270.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// let price = Money::from_cents(1250); // 12.50
    /// assert_eq!(price.cents(), 1250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses decimal text ("12.5", "100", "0.99") into Money.
    ///
    /// More than two fractional digits round half up: "0.125" → 0.13.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// assert_eq!(Money::parse("12.50").unwrap().cents(), 1250);
    /// assert!(Money::parse("twelve").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        parse_decimal(text).and_then(to_hundredths).map(Money)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1210);
    /// assert_eq!(unit_price.checked_mul_quantity(3).unwrap().cents(), 3630);
    /// assert!(Money::from_cents(i64::MAX).checked_mul_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts `other`. `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `rate` of this amount, rounded half up to the minor unit.
    ///
    /// `None` only when a rate above 100% pushes the result past `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::{DiscountRate, Money};
    ///
    /// let line = Money::from_cents(1999);
    /// // 19.99 × 12.5% = 2.49875 → 2.50
    /// assert_eq!(line.percentage(DiscountRate::from_bps(1250)).unwrap().cents(), 250);
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Option<Money> {
        let amount = Decimal::new(self.0, 2).checked_mul(rate.as_fraction())?;
        to_hundredths(amount).map(Money)
    }

    /// Formats with a currency symbol prefix: `₹12.50`, `-₹3.00`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor_part()
        )
    }
}

/// Plain two-decimal rendering without a currency symbol ("12.50").
///
/// This is also the form written to the remote sheet.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// The counter accepts percentages with two decimals ("12.25"), so
/// 1 bp = 0.01% keeps every accepted value exact.
/// 1000 bps = 10%, 10000 bps = 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a fraction of one: 1250 bps → 0.125.
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Two-decimal percentage text without the sign ("10.00").
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Shortest percentage form: "10%", "12.5%", "12.25%".
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
