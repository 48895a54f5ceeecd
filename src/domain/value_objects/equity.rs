use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::types::BigDecimal;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Fraction of a company offered with a job, a decimal in `[0, 1]`.
///
/// Held as an arbitrary-precision decimal so the value written to the
/// `NUMERIC` column is exactly the one the caller sent, scale included.
#[derive(Debug, Clone, PartialEq)]
pub struct Equity(BigDecimal);

impl Equity {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let value = value.trim();

        if value.is_empty() {
            return Err(DomainError::InvalidEquity(
                "Equity cannot be empty".to_string(),
            ));
        }

        // Plain decimal notation only: no signs, exponents or NaN/inf
        if !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(DomainError::InvalidEquity(format!(
                "Equity must be a decimal number: {}",
                value
            )));
        }

        let decimal = BigDecimal::from_str(value)
            .map_err(|_| DomainError::InvalidEquity(format!("Not a number: {}", value)))?;

        if decimal < BigDecimal::from(0) || decimal > BigDecimal::from(1) {
            return Err(DomainError::InvalidEquity(format!(
                "Equity must be between 0 and 1: {}",
                value
            )));
        }

        Ok(Self(decimal))
    }

    /// JSON numbers arrive as `f64`; their shortest decimal form is kept
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidEquity(value.to_string()));
        }
        Self::new(value.to_string())
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl std::fmt::Display for Equity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}

impl FromStr for Equity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Equity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Equity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Equity::from_f64(n),
            Raw::Text(s) => Equity::new(s),
        }
        .map_err(serde::de::Error::custom)
    }
}
