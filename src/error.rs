// src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

/// A date string matched none of the supported formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse date '{0}' (supported: 'YYYY-MM-DD', 'Month DD, YYYY', 'MM/DD/YYYY', 'Mon DD, YYYY', 'DD Month YYYY')")]
pub struct UnparseableDate(pub String);

/// Input rejected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("company name cannot be empty")]
    EmptyCompany,
    #[error("invalid source '{0}', must be one of: g2, capterra, getapp")]
    InvalidSource(String),
    #[error(transparent)]
    InvalidDate(#[from] UnparseableDate),
    #[error("start date {start} cannot be after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Transport-level failure for a single page fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("connection error fetching {url}: {reason}")]
    Connection { url: String, reason: String },
    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },
}

/// An adapter carries a CSS selector the parser rejects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid selector '{css}': {reason}")]
pub struct SelectorError {
    pub css: &'static str,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures that prevent a crawl from starting or continuing, other than
/// transport errors (those end the crawl with partial results instead).
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("cannot build page URL: {0}")]
    Url(#[from] url::ParseError),
}
