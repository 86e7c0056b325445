// src/sites/capterra.rs

use super::{FieldRule, FieldSelectors, FirstPage, SiteAdapter, SortOrder};
use crate::request::Source;

pub static ADAPTER: SiteAdapter = SiteAdapter {
    source: Source::Capterra,
    url_template: "https://www.capterra.com/p/{company}/reviews",
    first_page: FirstPage::Bare,
    headers: &[
        ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        ("Accept-Language", "en-US,en;q=0.5"),
    ],
    card_selectors: &["div.review-card", "div.review"],
    fields: FieldSelectors {
        title: &[FieldRule::text("h3.review__title"), FieldRule::text("h3")],
        body: &[FieldRule::text("p.review__body"), FieldRule::text("p")],
        date: &[FieldRule::text("span.review__date"), FieldRule::text("span[data-date]")],
        rating: &[FieldRule::text("span.rating")],
        reviewer: &[FieldRule::text("span.reviewer-name"), FieldRule::text("span.reviewer")],
    },
    next_page_selectors: &[r#"a[aria-label="Next page"]"#, "a.next"],
    sort_order: SortOrder::NewestFirst,
};
