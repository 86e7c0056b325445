// src/sites/g2.rs

use super::{FieldRule, FieldSelectors, FirstPage, SiteAdapter, SortOrder};
use crate::request::Source;

pub static ADAPTER: SiteAdapter = SiteAdapter {
    source: Source::G2,
    url_template: "https://www.g2.com/products/{company}/reviews",
    first_page: FirstPage::Numbered,
    headers: &[],
    card_selectors: &["div.paper--box.paper--padding"],
    fields: FieldSelectors {
        title: &[FieldRule::text("h3")],
        body: &[FieldRule::text("p")],
        date: &[FieldRule::text("time")],
        // aria-label="4.5 out of 5 stars"
        rating: &[FieldRule::first_word_of("svg.stars", "aria-label")],
        reviewer: &[FieldRule::text("span.reviewer-name"), FieldRule::text("div.name")],
    },
    next_page_selectors: &[r#"a[aria-label="Next"]"#],
    sort_order: SortOrder::NewestFirst,
};
