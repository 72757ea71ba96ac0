//! Money type and locale-aware amount parsing.
//!
//! Cart totals are plain `f64` sums (catalog prices arrive as floats or as
//! formatted strings). `Money` is the cents-based representation used when
//! an amount has to be shown to a customer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    fn decimal_separator(&self) -> char {
        match self {
            Currency::USD => '.',
            Currency::BRL | Currency::EUR => ',',
        }
    }

    fn thousands_separator(&self) -> char {
        match self {
            Currency::USD => ',',
            Currency::BRL | Currency::EUR => '.',
        }
    }

}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use vitrine_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::BRL);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    /// Format for display using the currency's local conventions
    /// (e.g., "R$ 1.234,56", "$1,234.56").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let whole = group_thousands(abs / divisor, self.currency.thousands_separator());
        let frac = abs % divisor;
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let sep = match self.currency {
            Currency::BRL => " ",
            Currency::USD | Currency::EUR => "",
        };
        format!(
            "{}{}{}{}{}{:0width$}",
            sign,
            self.currency.symbol(),
            sep,
            whole,
            self.currency.decimal_separator(),
            frac,
            width = places as usize
        )
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Parse a locale-formatted amount such as `"R$ 1.234,56"` or `"19.90"`.
///
/// Everything except digits, `,` and `.` is discarded first. When a comma
/// is present it is the decimal separator and dots are grouping marks
/// (only the last comma counts). Without a comma a single dot is the
/// decimal point, several dots are grouping marks. Returns `None` when no
/// finite number remains.
pub fn parse_locale_amount(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = if let Some(pos) = kept.rfind(',') {
        let (whole, frac) = kept.split_at(pos);
        let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
        let frac: String = frac.chars().filter(char::is_ascii_digit).collect();
        format!("{}.{}", whole, frac)
    } else if kept.matches('.').count() > 1 {
        kept.replace('.', "")
    } else {
        kept
    };

    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
