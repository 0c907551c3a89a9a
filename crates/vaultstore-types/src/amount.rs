

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VaultError};

/// Number of fractional decimal digits carried by an [`Amount`]
pub const DECIMALS: u32 = 18;

const SCALE: u128 = 10u128.pow(DECIMALS);

/// Non-negative native-currency amount with 18 decimal places.
/// Stored as base units in a u128, so a negative balance is unrepresentable.
/// Serialized as its exact decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(0);

    /// Create from raw base units
    pub const fn from_base_units(raw: u128) -> Self {
        Amount(raw)
    }

    /// Get the raw base units
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    /// Create from whole units
    pub const fn from_units(units: u64) -> Self {
        Amount((units as u128) * SCALE)
    }

    /// Parse an exact decimal string such as "1", "0.4" or ".25"
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(VaultError::InvalidAmount(format!("cannot parse: {:?}", s)));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VaultError::InvalidAmount(format!("cannot parse: {:?}", s)));
        }
        if frac.len() > DECIMALS as usize {
            return Err(VaultError::InvalidAmount(format!(
                "more than {} fractional digits: {}",
                DECIMALS, s
            )));
        }

        let overflow = || VaultError::InvalidAmount(format!("overflow: {}", s));

        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_units: u128 = if frac.is_empty() {
            0
        } else {
            // at most 18 digits, always fits
            let digits: u128 = frac.parse().map_err(|_| overflow())?;
            digits * 10u128.pow(DECIMALS - frac.len() as u32)
        };

        whole_units
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_units))
            .map(Amount)
            .ok_or_else(overflow)
    }

    /// Check if amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if amount is strictly positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction, `None` if the result would be negative
    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Amount::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = VaultError;

    fn try_from(s: String) -> Result<Self> {
        Amount::parse(&s)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", frac, width = DECIMALS as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}
