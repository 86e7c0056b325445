// src/extractor.rs

use scraper::ElementRef;

use crate::dates::parse_date;
use crate::error::UnparseableDate;
use crate::request::Source;
use crate::review::{ANONYMOUS_REVIEWER, RATING_NOT_AVAILABLE, ReviewRecord};
use crate::sites::{Field, SelectorStrategy};
use crate::text::normalize;

/// Why a review card did not yield a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingField(Field),
    UnparseableDate(UnparseableDate),
}

/// Outcome for one review card. Range filtering happens in the crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(ReviewRecord),
    Skipped(SkipReason),
}

/// Extracts one outcome per card, in page order. Never fails as a whole.
pub fn extract(
    cards: &[ElementRef<'_>],
    strategy: &SelectorStrategy,
    source: Source,
    company: &str,
) -> Vec<Extraction> {
    cards
        .iter()
        .map(|card| match extract_card(*card, strategy, source, company) {
            Ok(record) => Extraction::Found(record),
            Err(reason) => Extraction::Skipped(reason),
        })
        .collect()
}

fn extract_card(
    card: ElementRef<'_>,
    strategy: &SelectorStrategy,
    source: Source,
    company: &str,
) -> Result<ReviewRecord, SkipReason> {
    let required = |field| {
        strategy
            .locate(card, field)
            .ok_or(SkipReason::MissingField(field))
    };

    let title = required(Field::Title)?;
    let body = required(Field::Body)?;
    let date_text = required(Field::Date)?;
    let date = parse_date(&normalize(&date_text)).map_err(SkipReason::UnparseableDate)?;

    let rating = strategy
        .locate(card, Field::Rating)
        .map(|raw| normalize(&raw))
        .unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string());
    let reviewer = strategy
        .locate(card, Field::Reviewer)
        .map(|raw| normalize(&raw))
        .unwrap_or_else(|| ANONYMOUS_REVIEWER.to_string());

    Ok(ReviewRecord {
        title: normalize(&title),
        body: normalize(&body),
        date,
        rating,
        reviewer,
        source,
        company: company.to_string(),
    })
}
