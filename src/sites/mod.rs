// src/sites/mod.rs
//! Per-site scraping configuration.
//!
//! Each supported review site is described by a [`SiteAdapter`]: where its
//! review pages live, which CSS selectors find review cards and their fields,
//! and how a "next page" link looks. Adapters are plain data. The crawler and
//! the extractor are shared and take an adapter (compiled into a
//! [`SelectorStrategy`]) as a parameter.
//!
//! Selector lists are ordered fallbacks: the first selector that matches wins.

use url::Url;

use crate::request::Source;

pub mod capterra;
pub mod g2;
pub mod getapp;
pub mod strategy;

pub use strategy::SelectorStrategy;

/// The review fields an adapter knows how to locate inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Body,
    Date,
    Rating,
    Reviewer,
}

/// How to turn a matched element into a raw field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// All descendant text.
    Text,
    /// First whitespace-separated word of an attribute, e.g. `aria-label="4.5 out of 5"`.
    FirstWordOfAttr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub css: &'static str,
    pub read: Read,
}

impl FieldRule {
    pub const fn text(css: &'static str) -> Self {
        Self { css, read: Read::Text }
    }

    pub const fn first_word_of(css: &'static str, attr: &'static str) -> Self {
        Self { css, read: Read::FirstWordOfAttr(attr) }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSelectors {
    pub title: &'static [FieldRule],
    pub body: &'static [FieldRule],
    pub date: &'static [FieldRule],
    pub rating: &'static [FieldRule],
    pub reviewer: &'static [FieldRule],
}

impl FieldSelectors {
    pub fn rules(&self, field: Field) -> &'static [FieldRule] {
        match field {
            Field::Title => self.title,
            Field::Body => self.body,
            Field::Date => self.date,
            Field::Rating => self.rating,
            Field::Reviewer => self.reviewer,
        }
    }
}

/// The order in which a site lists reviews by default.
///
/// The crawler only stops at the first review older than the requested window
/// when the site lists newest reviews first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NewestFirst,
    Unspecified,
}

/// Whether page 1 carries an explicit `?page=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstPage {
    Numbered,
    Bare,
}

#[derive(Debug, Clone, Copy)]
pub struct SiteAdapter {
    pub source: Source,
    /// Review listing URL with a `{company}` placeholder.
    pub url_template: &'static str,
    pub first_page: FirstPage,
    /// Extra request headers. The user agent comes from the settings.
    pub headers: &'static [(&'static str, &'static str)],
    pub card_selectors: &'static [&'static str],
    pub fields: FieldSelectors,
    pub next_page_selectors: &'static [&'static str],
    pub sort_order: SortOrder,
}

impl SiteAdapter {
    pub fn for_source(source: Source) -> &'static SiteAdapter {
        match source {
            Source::G2 => &g2::ADAPTER,
            Source::Capterra => &capterra::ADAPTER,
            Source::GetApp => &getapp::ADAPTER,
        }
    }

    /// URL of the 1-based `page` of reviews for `company`.
    pub fn page_url(&self, company: &str, page: u32) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.url_template.replace("{company}", company))?;
        if page > 1 || self.first_page == FirstPage::Numbered {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        Ok(url)
    }
}
