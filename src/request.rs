// src/request.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::error::RequestError;

/// The review sites a run can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    G2,
    Capterra,
    GetApp,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::G2, Source::Capterra, Source::GetApp];

    /// Lowercase identifier used on the command line and in file names.
    pub fn id(self) -> &'static str {
        match self {
            Source::G2 => "g2",
            Source::Capterra => "capterra",
            Source::GetApp => "getapp",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::G2 => "G2",
            Source::Capterra => "Capterra",
            Source::GetApp => "GetApp",
        };
        f.write_str(name)
    }
}

impl FromStr for Source {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Source::ALL
            .into_iter()
            .find(|source| source.id() == wanted)
            .ok_or_else(|| RequestError::InvalidSource(s.to_string()))
    }
}

/// A validated scraping run: who, where, and which closed date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    company: String,
    start: NaiveDate,
    end: NaiveDate,
    source: Source,
}

impl ScrapeRequest {
    /// Validates raw user input. Nothing touches the network until this succeeds.
    pub fn parse(
        company: &str,
        start_date: &str,
        end_date: &str,
        source: &str,
    ) -> Result<Self, RequestError> {
        let source = source.parse::<Source>()?;
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        Self::new(company, start, end, source)
    }

    pub fn new(
        company: &str,
        start: NaiveDate,
        end: NaiveDate,
        source: Source,
    ) -> Result<Self, RequestError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(RequestError::EmptyCompany);
        }
        if start > end {
            return Err(RequestError::StartAfterEnd { start, end });
        }
        Ok(Self {
            company: company.to_string(),
            start,
            end,
            source,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// `{company}_{source}_reviews_{YYYYMMDD}_{YYYYMMDD}.json`
    pub fn default_output_file(&self) -> String {
        format!(
            "{}_{}_reviews_{}_{}.json",
            self.company,
            self.source.id(),
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d"),
        )
    }
}
