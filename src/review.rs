// src/review.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::request::Source;

pub const RATING_NOT_AVAILABLE: &str = "N/A";
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// One user review as exported. Field names and the `YYYY-MM-DD` date
/// format are the on-disk contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub title: String,
    #[serde(rename = "review")]
    pub body: String,
    pub date: NaiveDate,
    pub rating: String,
    #[serde(rename = "reviewer_name")]
    pub reviewer: String,
    pub source: Source,
    pub company: String,
}
