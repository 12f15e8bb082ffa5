//! ACRYL amounts.
//!
//! On-chain values are integers in the smallest unit; one ACRYL is
//! 100,000,000 units. Decimal strings are parsed exactly, without going
//! through floating point.

use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;

use crate::error::{Error, Result};

/// Number of decimal places of the native token.
pub const DECIMALS: u32 = 8;

/// Default fee for transfers, leases, lease cancellations and aliases.
pub const DEFAULT_FEE: u64 = 100_000;

const UNITS_PER_ACRYL: u64 = 10u64.pow(DECIMALS);

/// An amount of the native token, stored in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Acryl(u64);

impl Acryl {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One ACRYL in base units.
    pub const ONE_ACRYL: Self = Self(UNITS_PER_ACRYL);

    /// Create from base units.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Get the raw base unit value.
    #[inline]
    pub const fn as_units(&self) -> u64 {
        self.0
    }

    /// Whole ACRYL part.
    pub const fn whole(&self) -> u64 {
        self.0 / UNITS_PER_ACRYL
    }

    /// Fractional part in base units.
    pub const fn fraction(&self) -> u64 {
        self.0 % UNITS_PER_ACRYL
    }
}

/// Check that a signed amount or fee is positive and widen it to `u64`.
///
/// # Errors
///
/// Returns [`Error::InvalidAmount`] for zero or negative values.
pub fn ensure_positive(field: &'static str, value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(Error::InvalidAmount { field, value });
    }
    Ok(value.unsigned_abs())
}

impl fmt::Display for Acryl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08} ACRYL", self.whole(), self.fraction())
    }
}

impl FromStr for Acryl {
    type Err = Error;

    /// Parse a decimal ACRYL amount such as `1`, `0.5` or `12.00000001`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidEncoding(format!("amount \"{s}\": {reason}"));

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected decimal digits"));
        }
        if fraction.len() > DECIMALS as usize {
            return Err(invalid("more than 8 decimal places"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("too large"))?
        };
        let mut padded = fraction.to_owned();
        while padded.len() < DECIMALS as usize {
            padded.push('0');
        }
        let fraction: u64 = padded.parse().map_err(|_| invalid("bad fraction"))?;

        whole
            .checked_mul(UNITS_PER_ACRYL)
            .and_then(|units| units.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| invalid("too large"))
    }
}

impl Add for Acryl {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Acryl {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<u64> for Acryl {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Acryl> for u64 {
    fn from(value: Acryl) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!("1.5".parse::<Acryl>().unwrap().as_units(), 150_000_000);
        assert_eq!("0.00000001".parse::<Acryl>().unwrap().as_units(), 1);
        assert_eq!("12".parse::<Acryl>().unwrap().as_units(), 1_200_000_000);
        assert_eq!(".1".parse::<Acryl>().unwrap().as_units(), 10_000_000);
        assert_eq!("3.".parse::<Acryl>().unwrap().as_units(), 300_000_000);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", ".", "-1", "1.000000001", "1,5", "abc", "1.2.3"] {
            assert!(input.parse::<Acryl>().is_err(), "{input} accepted");
        }
        assert!("999999999999999999".parse::<Acryl>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Acryl::from_units(150_000_000).to_string(), "1.50000000 ACRYL");
        assert_eq!(Acryl::from_units(1).to_string(), "0.00000001 ACRYL");
        assert_eq!(Acryl::ZERO.to_string(), "0.00000000 ACRYL");
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("amount", 1000).unwrap(), 1000);
        assert!(matches!(
            ensure_positive("amount", 0),
            Err(Error::InvalidAmount { field: "amount", value: 0 })
        ));
        assert!(matches!(
            ensure_positive("fee", -5),
            Err(Error::InvalidAmount { field: "fee", value: -5 })
        ));
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Acryl::ZERO - Acryl::ONE_ACRYL, Acryl::ZERO);
        assert_eq!(
            Acryl::from_units(u64::MAX) + Acryl::ONE_ACRYL,
            Acryl::from_units(u64::MAX)
        );
    }
}
