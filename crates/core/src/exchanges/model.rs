//! Exchange domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::types::ExchangeId;

/// A trading venue on which assets are listed.
///
/// `abbrev` and `name` are each unique across all exchanges; `code` is an
/// optional secondary identifier (e.g., an operating MIC) that is unique when
/// present. Multiple exchanges without a code may coexist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: ExchangeId,
    pub abbrev: String,
    pub name: String,
    pub code: Option<String>,
    pub timezone: String,
    pub created_date: DateTime<Utc>,
    pub last_updated_date: DateTime<Utc>,
}

/// Payload for registering a new exchange.
///
/// Timestamps are stamped by the storage layer at write time, never supplied
/// by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExchange {
    pub abbrev: String,
    pub name: String,
    pub timezone: String,
    pub code: Option<String>,
}

impl NewExchange {
    pub fn new(abbrev: &str, name: &str, timezone: &str) -> Self {
        Self {
            abbrev: abbrev.to_string(),
            name: name.to_string(),
            timezone: timezone.to_string(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.abbrev.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Exchange abbreviation cannot be empty".to_string(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Exchange name cannot be empty".to_string(),
            ));
        }

        // Timezone must be a recognized IANA zone identifier
        if chrono_tz::Tz::from_str(&self.timezone).is_err() {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a recognized IANA timezone",
                self.timezone
            )));
        }

        if let Some(code) = &self.code {
            if code.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "Exchange code cannot be empty when provided".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_exchange() {
        let new = NewExchange::new("NASDAQ", "NASDAQ Stock Market", "America/New_York");
        assert!(new.validate().is_ok());
    }

    #[test]
    fn rejects_empty_abbrev_and_name() {
        let new = NewExchange::new("", "NASDAQ Stock Market", "America/New_York");
        assert!(matches!(new.validate(), Err(Error::InvalidInput(_))));

        let new = NewExchange::new("NASDAQ", "  ", "America/New_York");
        assert!(matches!(new.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let new = NewExchange::new("NASDAQ", "NASDAQ Stock Market", "America/Gotham");
        assert!(matches!(new.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_blank_secondary_code() {
        let new =
            NewExchange::new("NASDAQ", "NASDAQ Stock Market", "America/New_York").with_code(" ");
        assert!(matches!(new.validate(), Err(Error::InvalidInput(_))));
    }
}
