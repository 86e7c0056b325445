// src/crawler/mod.rs

use std::time::Duration;

use chrono::NaiveDate;
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

pub mod datascraper;

use crate::dates::is_in_range;
use crate::error::{CrawlError, FetchError};
use crate::extractor::{Extraction, SkipReason, extract};
use crate::request::ScrapeRequest;
use crate::review::ReviewRecord;
use crate::sites::{SelectorStrategy, SiteAdapter, SortOrder};

/// Anything that can hand back the markup of a page.
pub trait PageSource {
    fn fetch(
        &self,
        url: &Url,
        headers: &[(&'static str, &'static str)],
    ) -> impl Future<Output = Result<String, FetchError>>;
}

impl<T: PageSource> PageSource for &T {
    fn fetch(
        &self,
        url: &Url,
        headers: &[(&'static str, &'static str)],
    ) -> impl Future<Output = Result<String, FetchError>> {
        (**self).fetch(url, headers)
    }
}

/// Why a crawl ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No review cards on the page: past the last page, or markup we do not recognise.
    NoCardsLocated,
    /// A review older than the start date showed up after page 1.
    CrossedStartBoundary,
    NoNextPage,
    NoRecordsInRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    Completed(StopReason),
    /// A page fetch failed. Records from earlier pages are kept.
    Interrupted(FetchError),
}

#[derive(Debug)]
pub struct CrawlReport {
    pub records: Vec<ReviewRecord>,
    /// Number of pages requested, including a failed one.
    pub pages: u32,
    pub outcome: CrawlOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageRequested { page: u32, url: String },
    PageScanned { page: u32, located: usize, kept: usize, skipped: usize },
    Skipped { page: u32, reason: SkipReason },
    Stopped { page: u32, reason: StopReason },
    Failed { page: u32, error: FetchError },
}

/// Receives progress of a crawl. Frontends decide what to show.
pub trait ProgressSink {
    fn on_event(&mut self, _event: &CrawlEvent) {}
}

/// Discards every event.
pub struct NullProgress;
impl ProgressSink for NullProgress {}

/// Renders events as log lines.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_event(&mut self, event: &CrawlEvent) {
        match event {
            CrawlEvent::PageRequested { page, url } => info!(page, %url, "Fetching page"),
            CrawlEvent::PageScanned { page, located, kept, skipped } => {
                info!(page, located, kept, skipped, "Page scanned")
            }
            CrawlEvent::Skipped { page, reason } => debug!(page, ?reason, "Skipped review card"),
            CrawlEvent::Stopped { page, reason } => info!(page, ?reason, "Reached last page"),
            CrawlEvent::Failed { page, error } => warn!(page, %error, "Page fetch failed"),
        }
    }
}

/// What one fetched page contained.
struct PageScan {
    located: usize,
    extractions: Vec<Extraction>,
    has_next: bool,
}

/// Parses and extracts in one go so no parsed tree is held across an await.
fn scan_page(body: &str, strategy: &SelectorStrategy, request: &ScrapeRequest) -> PageScan {
    let document = Html::parse_document(body);
    let cards = strategy.cards(&document);

    PageScan {
        located: cards.len(),
        extractions: extract(&cards, strategy, request.source(), request.company()),
        has_next: strategy.has_next_page(&document),
    }
}

/// Walks a site's review pages, keeping reviews dated inside the request's window.
///
/// Pages are fetched one at a time with a fixed pause between them. The crawl
/// stops when a page has no review cards, no next-page link, or no review in
/// range. For sites that list newest reviews first it also stops at the first
/// review older than the window on any page after the first, which assumes
/// in-range reviews are contiguous in that order.
pub struct Crawler<S> {
    source: S,
    delay: Duration,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        Self { source, delay }
    }

    pub async fn run(
        &self,
        request: &ScrapeRequest,
        adapter: &SiteAdapter,
        progress: &mut dyn ProgressSink,
    ) -> Result<CrawlReport, CrawlError> {
        let strategy = SelectorStrategy::compile(adapter)?;
        let mut records = Vec::new();
        let mut page = 1u32;

        let outcome = loop {
            let url = adapter.page_url(request.company(), page)?;
            progress.on_event(&CrawlEvent::PageRequested { page, url: url.to_string() });

            let body = match self.source.fetch(&url, adapter.headers).await {
                Ok(body) => body,
                Err(error) => {
                    progress.on_event(&CrawlEvent::Failed { page, error: error.clone() });
                    break CrawlOutcome::Interrupted(error);
                }
            };

            let scan = scan_page(&body, &strategy, request);
            if scan.located == 0 {
                break stop(progress, page, StopReason::NoCardsLocated);
            }

            let tally = accumulate(
                scan.extractions,
                &mut records,
                Window::new(request.start(), request.end()),
                page > 1 && adapter.sort_order == SortOrder::NewestFirst,
                |reason| progress.on_event(&CrawlEvent::Skipped { page, reason }),
            );
            progress.on_event(&CrawlEvent::PageScanned {
                page,
                located: scan.located,
                kept: tally.kept,
                skipped: tally.skipped,
            });

            if tally.crossed_start {
                break stop(progress, page, StopReason::CrossedStartBoundary);
            }
            if !scan.has_next {
                break stop(progress, page, StopReason::NoNextPage);
            }
            if tally.kept == 0 {
                break stop(progress, page, StopReason::NoRecordsInRange);
            }

            page += 1;
            tokio::time::sleep(self.delay).await;
        };

        Ok(CrawlReport { records, pages: page, outcome })
    }
}

fn stop(progress: &mut dyn ProgressSink, page: u32, reason: StopReason) -> CrawlOutcome {
    progress.on_event(&CrawlEvent::Stopped { page, reason });
    CrawlOutcome::Completed(reason)
}

#[derive(Clone, Copy)]
struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PageTally {
    kept: usize,
    skipped: usize,
    crossed_start: bool,
}

/// Appends in-range records in page order. With `stop_when_older` the first
/// record dated before the window ends the page; the rest are discarded.
fn accumulate(
    extractions: Vec<Extraction>,
    records: &mut Vec<ReviewRecord>,
    window: Window,
    stop_when_older: bool,
    mut on_skip: impl FnMut(SkipReason),
) -> PageTally {
    let mut tally = PageTally::default();

    for extraction in extractions {
        let record = match extraction {
            Extraction::Found(record) => record,
            Extraction::Skipped(reason) => {
                tally.skipped += 1;
                on_skip(reason);
                continue;
            }
        };

        if is_in_range(record.date, window.start, window.end) {
            records.push(record);
            tally.kept += 1;
        } else if stop_when_older && record.date < window.start {
            tally.crossed_start = true;
            break;
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::request::Source;

    /// Serves canned G2 pages keyed by page number and records every request.
    struct FakeSite {
        pages: HashMap<u32, Result<String, FetchError>>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeSite {
        fn new() -> Self {
            Self { pages: HashMap::new(), requested: RefCell::new(Vec::new()) }
        }

        fn page(mut self, n: u32, dates: &[&str], has_next: bool) -> Self {
            self.pages.insert(n, Ok(g2_page(dates, has_next)));
            self
        }

        fn failing(mut self, n: u32, error: FetchError) -> Self {
            self.pages.insert(n, Err(error));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }
    }

    impl PageSource for FakeSite {
        async fn fetch(
            &self,
            url: &Url,
            _headers: &[(&'static str, &'static str)],
        ) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            let page: u32 = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            self.pages
                .get(&page)
                .cloned()
                .unwrap_or_else(|| Ok("<html><body></body></html>".to_string()))
        }
    }

    fn g2_page(dates: &[&str], has_next: bool) -> String {
        let cards: String = dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                format!(
                    r#"<div class="paper--box paper--padding">
                         <h3>Review {i}</h3><p>Body {i}</p><time>{date}</time>
                       </div>"#
                )
            })
            .collect();
        let next = if has_next { r#"<a aria-label="Next" href="?page=n">Next</a>"# } else { "" };
        format!("<html><body>{cards}{next}</body></html>")
    }

    fn request(start: &str, end: &str) -> ScrapeRequest {
        ScrapeRequest::parse("hubspot", start, end, "g2").unwrap()
    }

    #[derive(Default)]
    struct Recorder(Vec<CrawlEvent>);

    impl ProgressSink for Recorder {
        fn on_event(&mut self, event: &CrawlEvent) {
            self.0.push(event.clone());
        }
    }

    async fn crawl(site: &FakeSite, req: &ScrapeRequest) -> (CrawlReport, Vec<CrawlEvent>) {
        let crawler = Crawler::new(site, Duration::ZERO);
        let mut events = Recorder::default();
        let report = crawler
            .run(req, SiteAdapter::for_source(Source::G2), &mut events)
            .await
            .unwrap();
        (report, events.0)
    }

    #[tokio::test]
    async fn stops_on_last_page_without_next_link() {
        let site = FakeSite::new()
            .page(1, &["2024-03-20", "2024-03-18"], true)
            .page(2, &["2024-03-12"], true)
            .page(3, &["2024-03-05", "2024-03-02"], false);

        let (report, events) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 5);
        assert_eq!(report.pages, 3);
        assert_eq!(report.outcome, CrawlOutcome::Completed(StopReason::NoNextPage));
        assert_eq!(site.requested().len(), 3);
        assert!(site.requested().iter().all(|u| !u.ends_with("page=4")));
        assert_eq!(
            events.last(),
            Some(&CrawlEvent::Stopped { page: 3, reason: StopReason::NoNextPage })
        );
    }

    #[tokio::test]
    async fn stops_when_page_crosses_start_date() {
        let site = FakeSite::new()
            .page(1, &["2024-03-20"], true)
            .page(2, &["2024-02-10", "2024-02-01"], true)
            .page(3, &["2024-01-20"], true);

        let (report, _) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.outcome, CrawlOutcome::Completed(StopReason::CrossedStartBoundary));
        assert_eq!(site.requested().len(), 2);
    }

    #[tokio::test]
    async fn crossing_discards_rest_of_page() {
        let site = FakeSite::new()
            .page(1, &["2024-03-20"], true)
            .page(2, &["2024-03-10", "2024-02-10", "2024-03-09"], true);

        let (report, events) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        let dates: Vec<String> = report.records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, ["2024-03-20", "2024-03-10"]);
        assert!(events.contains(&CrawlEvent::PageScanned { page: 2, located: 3, kept: 1, skipped: 0 }));
    }

    #[tokio::test]
    async fn older_reviews_on_first_page_do_not_stop_early() {
        let site = FakeSite::new()
            .page(1, &["2024-03-20", "2024-02-10", "2024-03-15"], true)
            .page(2, &["2024-03-10"], false);

        let (report, _) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 3);
        assert_eq!(site.requested().len(), 2);
    }

    #[tokio::test]
    async fn page_without_in_range_records_stops_even_with_next_link() {
        let site = FakeSite::new()
            .page(1, &["2024-05-20", "2024-05-18"], true)
            .page(2, &["2024-03-10"], true);

        let (report, _) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert!(report.records.is_empty());
        assert_eq!(report.outcome, CrawlOutcome::Completed(StopReason::NoRecordsInRange));
        assert_eq!(site.requested().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_stops() {
        let site = FakeSite::new().page(1, &["2024-03-20"], true);

        let (report, _) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.outcome, CrawlOutcome::Completed(StopReason::NoCardsLocated));
        assert_eq!(report.pages, 2);
    }

    #[tokio::test]
    async fn timeout_keeps_earlier_pages() {
        let timeout = FetchError::Timeout { url: "https://www.g2.com/products/hubspot/reviews?page=2".into() };
        let site = FakeSite::new()
            .page(1, &["2024-03-20", "2024-03-19"], true)
            .failing(2, timeout.clone())
            .page(3, &["2024-03-10"], true)
            .page(4, &["2024-03-08"], true)
            .page(5, &["2024-03-05"], false);

        let (report, events) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.outcome, CrawlOutcome::Interrupted(timeout.clone()));
        assert_eq!(site.requested().len(), 2);
        assert!(events.contains(&CrawlEvent::Failed { page: 2, error: timeout }));
    }

    #[tokio::test]
    async fn skipped_cards_are_reported_but_not_kept() {
        let site = FakeSite::new().page(1, &["2024-03-20", "last Tuesday"], false);

        let (report, events) = crawl(&site, &request("2024-03-01", "2024-03-31")).await;

        assert_eq!(report.records.len(), 1);
        assert!(events.iter().any(|e| matches!(
            e,
            CrawlEvent::Skipped { page: 1, reason: SkipReason::UnparseableDate(_) }
        )));
        assert!(events.contains(&CrawlEvent::PageScanned { page: 1, located: 2, kept: 1, skipped: 1 }));
    }

    #[tokio::test]
    async fn records_carry_request_identity() {
        let site = FakeSite::new().page(1, &["2024-03-20"], false);

        let report = Crawler::new(&site, Duration::ZERO)
            .run(&request("2024-03-01", "2024-03-31"), SiteAdapter::for_source(Source::G2), &mut NullProgress)
            .await
            .unwrap();

        assert_eq!(report.records.len(), 1);
        assert!(report.records.iter().all(|r| r.company == "hubspot" && r.source == Source::G2));
    }

    #[test]
    fn unspecified_sort_order_never_crosses() {
        let date = |s: &str| crate::dates::parse_date(s).unwrap();
        let record = |d: &str| {
            Extraction::Found(ReviewRecord {
                title: "t".into(),
                body: "b".into(),
                date: date(d),
                rating: "N/A".into(),
                reviewer: "Anonymous".into(),
                source: Source::G2,
                company: "c".into(),
            })
        };
        let window = Window::new(date("2024-03-01"), date("2024-03-31"));
        let page = || vec![record("2024-02-01"), record("2024-03-05")];

        let mut kept = Vec::new();
        let tally = accumulate(page(), &mut kept, window, false, |_| {});
        assert_eq!(tally, PageTally { kept: 1, skipped: 0, crossed_start: false });

        let mut kept = Vec::new();
        let tally = accumulate(page(), &mut kept, window, true, |_| {});
        assert_eq!(tally, PageTally { kept: 0, skipped: 0, crossed_start: true });
        assert!(kept.is_empty());
    }
}
