//! Type-safe price representation using decimal arithmetic.
//!
//! The backend stores prices as SQL decimals and transmits them as strings
//! (or, for computed totals, as JSON numbers). Prices are kept as
//! [`Decimal`] end to end and only turned into text when displayed.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol used when displaying prices.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Number of fraction digits shown for every displayed amount.
const DISPLAY_SCALE: u32 = 2;

/// A monetary amount in the store's currency.
///
/// Serializes as a decimal string (e.g. `"12.50"`), which is the shape the
/// backend uses for `Preco` and `Subtotal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a price from decimal text.
    ///
    /// Accepts plain decimals (`"12.5"`) and scientific notation (`"1.25e1"`),
    /// which is how some JSON encoders render floating point totals.
    ///
    /// # Errors
    ///
    /// Returns the underlying `rust_decimal` error if the text is not a number.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// The amount rounded half away from zero to two fraction digits.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Amount formatted with exactly two fraction digits (e.g. `"12.50"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        let mut rounded = self.rounded();
        rounded.rescale(DISPLAY_SCALE);
        rounded.to_string()
    }

    /// Format for display (e.g. `"R$12.50"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.to_fixed())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
