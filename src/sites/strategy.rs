// src/sites/strategy.rs

use scraper::{ElementRef, Html, Selector};

use super::{Field, FieldRule, Read, SiteAdapter};
use crate::error::SelectorError;

struct CompiledRule {
    selector: Selector,
    read: Read,
}

/// A [`SiteAdapter`]'s selectors, parsed once per run.
pub struct SelectorStrategy {
    cards: Vec<Selector>,
    title: Vec<CompiledRule>,
    body: Vec<CompiledRule>,
    date: Vec<CompiledRule>,
    rating: Vec<CompiledRule>,
    reviewer: Vec<CompiledRule>,
    next_page: Vec<Selector>,
}

impl SelectorStrategy {
    pub fn compile(adapter: &SiteAdapter) -> Result<Self, SelectorError> {
        let rules = |field: Field| -> Result<Vec<CompiledRule>, SelectorError> {
            adapter
                .fields
                .rules(field)
                .iter()
                .map(|rule: &FieldRule| {
                    Ok(CompiledRule {
                        selector: parse_selector(rule.css)?,
                        read: rule.read,
                    })
                })
                .collect()
        };

        Ok(Self {
            cards: parse_all(adapter.card_selectors)?,
            title: rules(Field::Title)?,
            body: rules(Field::Body)?,
            date: rules(Field::Date)?,
            rating: rules(Field::Rating)?,
            reviewer: rules(Field::Reviewer)?,
            next_page: parse_all(adapter.next_page_selectors)?,
        })
    }

    /// Review cards on the page, from the first card selector that matches anything.
    pub fn cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.cards
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|cards| !cards.is_empty())
            .unwrap_or_default()
    }

    pub fn has_next_page(&self, document: &Html) -> bool {
        self.next_page
            .iter()
            .any(|selector| document.select(selector).next().is_some())
    }

    /// Raw value of `field` inside `card`, trying each fallback rule in order.
    ///
    /// A rule whose element exists but lacks the wanted attribute falls through
    /// to the next rule.
    pub fn locate(&self, card: ElementRef<'_>, field: Field) -> Option<String> {
        self.rules(field).iter().find_map(|rule| {
            let element = card.select(&rule.selector).next()?;
            match rule.read {
                Read::Text => Some(element.text().collect()),
                Read::FirstWordOfAttr(attr) => element
                    .value()
                    .attr(attr)
                    .and_then(|value| value.split_whitespace().next())
                    .map(str::to_string),
            }
        })
    }

    fn rules(&self, field: Field) -> &[CompiledRule] {
        match field {
            Field::Title => &self.title,
            Field::Body => &self.body,
            Field::Date => &self.date,
            Field::Rating => &self.rating,
            Field::Reviewer => &self.reviewer,
        }
    }
}

fn parse_selector(css: &'static str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|e| SelectorError {
        css,
        reason: e.to_string(),
    })
}

fn parse_all(list: &'static [&'static str]) -> Result<Vec<Selector>, SelectorError> {
    list.iter().map(|css| parse_selector(css)).collect()
}
