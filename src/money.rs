//! Exact decimal money values.
//!
//! Uses `rust_decimal` internally so that totals are computed without
//! floating-point drift. [`Money`] may be any sign (a net total can be
//! negative); [`Amount`] is the strictly positive magnitude a transaction
//! carries.

use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// A signed monetary value.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use finance_tracker::Money;
///
/// let a = Money::from_str("10.5").unwrap();
/// let b = Money::from_str("12").unwrap();
/// assert_eq!((a - b).to_string(), "-1.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Number of decimal places used when rendering for people.
    pub const DISPLAY_PLACES: usize = 2;

    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Adds `rhs`, clamping to the representable range instead of overflowing.
    pub fn saturating_add(self, rhs: Self) -> Self {
        match self.0.checked_add(rhs.0) {
            Some(value) => Money(value),
            None if rhs.is_negative() => Money(Decimal::MIN),
            None => Money(Decimal::MAX),
        }
    }

    /// Renders the value without trailing fractional zeros (`1000`, `12.5`).
    pub fn to_plain_string(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", Self::DISPLAY_PLACES, self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_plain_string())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

/// A strictly positive transaction magnitude.
///
/// Income versus expense is carried by [`TxKind`](crate::TxKind), never by
/// the sign of the amount, so an `Amount` can never be zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Money);

impl Amount {
    /// Wraps `value` if it is greater than zero.
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Amount(Money(value)))
        } else {
            None
        }
    }

    /// The amount as a (positive) money value.
    pub fn money(&self) -> Money {
        self.0
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidAmount(s.trim().to_string());
        let money = Money::from_str(s).map_err(|_| invalid())?;
        Amount::new(money.value()).ok_or_else(invalid)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accepts both JSON numbers and strings.
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Amount::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!("amount must be greater than zero, got {value}"))
        })
    }
}
