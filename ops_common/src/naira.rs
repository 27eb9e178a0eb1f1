use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

pub const NGN_CURRENCY_CODE: &str = "NGN";
pub const NGN_CURRENCY_CODE_LOWER: &str = "ngn";

//--------------------------------------       Naira        ----------------------------------------------------------
/// An amount of Nigerian Naira.
///
/// Order totals are carried as major-unit decimal values end to end. The payment gateway bills in kobo, the minor
/// currency unit (1 NGN = 100 kobo), so amounts cross the gateway boundary via [`Naira::to_kobo`].
#[derive(Debug, Clone, Copy, Default, Type, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Naira(f64);

impl Add for Naira {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Naira {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Naira {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in Naira: {0}")]
pub struct NairaConversionError(String);

impl From<f64> for Naira {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Naira {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl TryFrom<i64> for Naira {
    type Error = NairaConversionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value.unsigned_abs() > (1u64 << f64::MANTISSA_DIGITS) {
            Err(NairaConversionError(format!("Value {value} is too large to convert to Naira")))
        } else {
            #[allow(clippy::cast_precision_loss)]
            Ok(Self(value as f64))
        }
    }
}

impl Display for Naira {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₦{:0.2}", self.0)
    }
}

impl Naira {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn from_kobo(kobo: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(kobo as f64 / 100.0)
    }

    /// The amount in the gateway's minor currency unit.
    pub fn to_kobo(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kobo_conversions() {
        let amount = Naira::from(1500.0);
        assert_eq!(amount.to_kobo(), 150_000);
        assert_eq!(Naira::from_kobo(150_000), amount);
        assert_eq!(Naira::from(0.01).to_kobo(), 1);
    }

    #[test]
    fn positivity() {
        assert!(Naira::from(0.01).is_positive());
        assert!(!Naira::from(0.0).is_positive());
        assert!(!Naira::from(-5.0).is_positive());
    }

    #[test]
    fn display() {
        assert_eq!(Naira::from(1500.0).to_string(), "₦1500.00");
        assert_eq!(Naira::from(0.5).to_string(), "₦0.50");
    }

    #[test]
    fn arithmetic() {
        let total: Naira = vec![Naira::from(100.0), Naira::from(250.5)].into_iter().sum();
        assert_eq!(total, Naira::from(350.5));
        assert_eq!(Naira::from(100.0) - Naira::from(40.0), Naira::from(60.0));
    }
}
