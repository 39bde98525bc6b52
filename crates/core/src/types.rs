//! Strong types shared across the store.
//!
//! These types keep the different integer identities from mixing:
//! - `ExchangeId` - the surrogate id of a trading venue
//! - `VendorId` - the surrogate id of an upstream data source
//! - `AssetId` - the surrogate id of a tradable instrument
//! - `Day` - the calendar-date bucket of one end-of-day bar

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result};

macro_rules! surrogate_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

surrogate_id! {
    /// Identity of a trading venue. Stable and immutable once assigned.
    ExchangeId
}

surrogate_id! {
    /// Identity of an upstream data vendor.
    ///
    /// Provenance only on price rows; it does not participate in uniqueness.
    VendorId
}

surrogate_id! {
    /// Identity of a tradable instrument, bound to exactly one exchange.
    AssetId
}

/// Calendar-date bucket for daily price bars.
///
/// Wraps `NaiveDate`; persisted as ISO `YYYY-MM-DD` text, which sorts
/// lexicographically in date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Day(pub NaiveDate);

impl Day {
    pub const STORAGE_FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a Day from year, month, day components.
    /// Returns None if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the ISO `YYYY-MM-DD` storage form.
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, Self::STORAGE_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a valid ISO date", s)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The ISO text form stored in the composite key column.
    pub fn to_storage_string(&self) -> String {
        self.0.format(Self::STORAGE_FORMAT).to_string()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_storage_string())
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_and_formats_iso() {
        let day = Day::parse("2023-01-03").unwrap();
        assert_eq!(day, Day::from_ymd(2023, 1, 3).unwrap());
        assert_eq!(day.to_storage_string(), "2023-01-03");
    }

    #[test]
    fn day_rejects_malformed_dates() {
        assert!(matches!(Day::parse("2023-13-40"), Err(Error::InvalidInput(_))));
        assert!(matches!(Day::parse("03/01/2023"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn day_ordering_matches_storage_ordering() {
        let a = Day::from_ymd(2023, 1, 3).unwrap();
        let b = Day::from_ymd(2023, 1, 4).unwrap();
        assert!(a < b);
        assert!(a.to_storage_string() < b.to_storage_string());
    }
}
