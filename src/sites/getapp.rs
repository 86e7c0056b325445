// src/sites/getapp.rs

use super::{FieldRule, FieldSelectors, FirstPage, SiteAdapter, SortOrder};
use crate::request::Source;

pub static ADAPTER: SiteAdapter = SiteAdapter {
    source: Source::GetApp,
    url_template: "https://www.getapp.com/software/{company}/reviews/",
    first_page: FirstPage::Bare,
    headers: &[
        ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        ("Accept-Language", "en-US,en;q=0.5"),
    ],
    card_selectors: &[r#"div[data-testid="review-card"]"#, "div.review-card"],
    fields: FieldSelectors {
        title: &[FieldRule::text("h3"), FieldRule::text("h4")],
        body: &[FieldRule::text(r#"p[data-testid="review-content"]"#), FieldRule::text("p")],
        date: &[FieldRule::text("time"), FieldRule::text("span.review-date")],
        rating: &[
            FieldRule::first_word_of(r#"[data-testid="rating"]"#, "aria-label"),
            FieldRule::text("span.rating"),
        ],
        reviewer: &[
            FieldRule::text(r#"span[data-testid="reviewer-name"]"#),
            FieldRule::text("span.reviewer-name"),
        ],
    },
    next_page_selectors: &[r#"a[aria-label="Next"]"#, "a.next"],
    sort_order: SortOrder::NewestFirst,
};
