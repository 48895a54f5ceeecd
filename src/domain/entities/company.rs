use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Handles appear in URL paths and are matched against lower-cased job
/// references, so only lower-case path-safe characters are allowed
pub static HANDLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("Invalid regex pattern for handles"));

/// A company that posts jobs, keyed by its immutable `handle`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl Company {
    const MAX_HANDLE_LENGTH: usize = 25;

    pub fn new(
        handle: String,
        name: String,
        description: String,
        num_employees: Option<i32>,
        logo_url: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::validate_handle(&handle)?;

        Ok(Self {
            handle,
            name,
            description,
            num_employees,
            logo_url,
        })
    }

    pub fn validate_handle(handle: &str) -> Result<(), DomainError> {
        if handle.is_empty() {
            return Err(DomainError::InvalidHandle(
                "Handle cannot be empty".to_string(),
            ));
        }

        if handle.chars().count() > Self::MAX_HANDLE_LENGTH {
            return Err(DomainError::InvalidHandle(format!(
                "Handle too long: {} > {}",
                handle.chars().count(),
                Self::MAX_HANDLE_LENGTH
            )));
        }

        if !HANDLE_REGEX.is_match(handle) {
            return Err(DomainError::InvalidHandle(format!(
                "Handle must be lower-case alphanumeric with hyphens/underscores: {}",
                handle
            )));
        }

        Ok(())
    }
}
