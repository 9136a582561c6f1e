//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations, parsing of spreadsheet-style
//! amount text, and whole-currency formatting for reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fundsheet::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use fundsheet::models::Money;
    /// assert_eq!(Money::from_units(180).cents(), 18000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whole units, rounding half to even
    pub const fn rounded_units(&self) -> i64 {
        let quotient = self.0 / 100;
        let remainder = (self.0 % 100).abs();
        let step = if self.0 < 0 { -1 } else { 1 };

        if remainder > 50 || (remainder == 50 && quotient % 2 != 0) {
            quotient + step
        } else {
            quotient
        }
    }

    /// Amount as a float, for chart scaling only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10.50", "$10.50", "$-10.50",
    /// "1,234.50", "(50.00)" (accounting negative), "10" (whole units),
    /// "1.5e3" (exponent form). Digits past the cents are rounded half to even.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();
        if original.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        // Accounting negatives wrap the value in parentheses
        let (mut negative, s) = match original.strip_prefix('(').and_then(|v| v.strip_suffix(')'))
        {
            Some(inner) => (true, inner.trim()),
            None => (false, original),
        };

        // Currency symbol may sit before or after the sign
        let s = strip_sign(s, &mut negative);
        let s = s.strip_prefix('$').unwrap_or(s);
        let s = strip_sign(s, &mut negative);

        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let cents = if cleaned.contains(|c: char| c == 'e' || c == 'E') {
            parse_exponent_cents(&cleaned).ok_or_else(invalid)?
        } else {
            parse_decimal_cents(&cleaned).ok_or_else(invalid)?
        };

        if cents > MAX_ABS_CENTS {
            return Err(MoneyParseError::OutOfRange(original.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format as whole currency units with thousands separators
    ///
    /// # Examples
    /// ```
    /// use fundsheet::models::Money;
    /// assert_eq!(Money::from_cents(123_456_78).format_whole("$"), "$123,457");
    /// assert_eq!(Money::from_units(-235).format_whole("$"), "-$235");
    /// ```
    pub fn format_whole(&self, symbol: &str) -> String {
        let units = self.rounded_units();
        let grouped = group_thousands(units.unsigned_abs());
        if units < 0 {
            format!("-{}{}", symbol, grouped)
        } else {
            format!("{}{}", symbol, grouped)
        }
    }

    /// Plain decimal form for CSV output, e.g. "-235.00"
    pub fn to_plain(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        }
    }

    /// Format with a currency symbol, keeping the cents
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.units().unsigned_abs());
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, grouped, self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, grouped, self.cents_part())
        }
    }
}

/// Largest magnitude `parse` accepts
///
/// Any row's debit - credit stays representable, and ingestion rejects a
/// table whose absolute amounts would not sum within an i64.
pub const MAX_ABS_CENTS: i64 = i64::MAX / 4;

fn strip_sign<'a>(s: &'a str, negative: &mut bool) -> &'a str {
    if let Some(rest) = s.strip_prefix('-') {
        *negative = !*negative;
        rest
    } else {
        s.strip_prefix('+').unwrap_or(s)
    }
}

/// Unsigned "123", "123.4", ".75", "0.999" to cents
fn parse_decimal_cents(text: &str) -> Option<i64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let units: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let digit = |i: usize| -> i64 {
        fraction
            .as_bytes()
            .get(i)
            .map_or(0, |b| i64::from(b - b'0'))
    };
    let mut cents = units.checked_mul(100)?.checked_add(digit(0) * 10 + digit(1))?;

    // Half to even on the sub-cent remainder
    let rest = fraction.get(2..).unwrap_or("");
    if let Some(first) = rest.bytes().next() {
        let tail_nonzero = rest.bytes().skip(1).any(|b| b != b'0');
        let round_up = match first {
            b'6'..=b'9' => true,
            b'5' => tail_nonzero || cents % 2 != 0,
            _ => false,
        };
        if round_up {
            cents = cents.checked_add(1)?;
        }
    }

    Some(cents)
}

/// Unsigned exponent form ("1.5e3") to cents
fn parse_exponent_cents(text: &str) -> Option<i64> {
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let scaled = value * 100.0;
    if scaled >= MAX_ABS_CENTS as f64 {
        // Reported as out of range by the caller
        return Some(i64::MAX);
    }

    let mut rounded = scaled.round();
    if (scaled - scaled.trunc()) == 0.5 && rounded % 2.0 != 0.0 {
        rounded -= 1.0;
    }
    Some(rounded as i64)
}

/// Insert a comma between every group of three digits
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    /// Magnitude above [`MAX_ABS_CENTS`]
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Empty money value"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
