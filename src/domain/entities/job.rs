use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Equity;

/// A stored job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Decimal text as rendered by the store
    pub equity: Option<String>,
    pub company_handle: String,
}

/// A job about to be inserted.
///
/// Title and company handle are normalized to trimmed lower-case, which is
/// also the form used for duplicate detection.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    title: String,
    salary: Option<i32>,
    equity: Option<Equity>,
    company_handle: String,
}

impl NewJob {
    pub fn new(
        title: &str,
        salary: Option<i32>,
        equity: Option<Equity>,
        company_handle: &str,
    ) -> Self {
        Self {
            title: normalize(title),
            salary,
            equity,
            company_handle: normalize(company_handle),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn salary(&self) -> Option<i32> {
        self.salary
    }

    pub fn equity(&self) -> Option<&Equity> {
        self.equity.as_ref()
    }

    pub fn company_handle(&self) -> &str {
        &self.company_handle
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
