//! Integration tests for `run_collection`.
//!
//! Uses an in-memory fake site instead of a live Chrome process: listing
//! pages advance on next-clicks, detail pages are served from a URL map, and
//! individual URLs can be marked broken to simulate render failures. Covers
//! the happy path, per-proposal failure isolation, and setup-stage aborts.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;

use pbharvest_core::AppConfig;
use pbharvest_scraper::{run_collection, Browser, PageSession, ScrapeError};

const BASE_URL: &str = "https://example.org/processes/pb/f/321/proposals";

fn test_config() -> AppConfig {
    AppConfig {
        base_url: BASE_URL.to_owned(),
        component_id: "321".to_owned(),
        process_slug: "citywide2023".to_owned(),
        output_path: PathBuf::from("data/proposals.csv"),
        failed_path: PathBuf::from("data/failed_proposals.txt"),
        failure_delay_ms: 0,
        max_pages: 200,
        nav_timeout_secs: 30,
        log_level: "info".to_owned(),
    }
}

fn listing_page(ids: &[&str], has_next: bool) -> String {
    let cards: String = ids
        .iter()
        .map(|id| format!("<div class=\"column\" id=\"proposal_{id}\"></div>"))
        .collect();
    let pagination = if has_next {
        r##"<ul class="pagination"><li class="pagination-next"><a rel="next" href="#">Next</a></li></ul>"##
    } else {
        ""
    };
    format!("<html><body>{cards}{pagination}</body></html>")
}

fn detail_page(title: &str, datetime: &str) -> String {
    format!(
        "<html><body>\
         <h2 class=\"heading3\">{title}</h2>\
         <div class=\"author-data__extra\"><span>{datetime}</span></div>\
         <dl><dt>Status</dt><dd><div>Accepted</div></dd></dl>\
         <ul class=\"tags--list\"><li><a href=\"#\">Parks</a></li></ul>\
         </body></html>"
    )
}

fn detail_url(id: &str) -> String {
    format!("{BASE_URL}/{id}")
}

// ---------------------------------------------------------------------------
// Fake site
// ---------------------------------------------------------------------------

struct SiteState {
    listing_pages: Vec<String>,
    listing_index: Cell<usize>,
    detail_pages: HashMap<String, String>,
    broken_urls: HashSet<String>,
    sessions_opened: Cell<usize>,
}

struct FakeBrowser {
    site: Rc<SiteState>,
}

impl FakeBrowser {
    fn new(listing_pages: Vec<String>, detail_pages: HashMap<String, String>) -> Self {
        Self::with_broken_urls(listing_pages, detail_pages, HashSet::new())
    }

    fn with_broken_urls(
        listing_pages: Vec<String>,
        detail_pages: HashMap<String, String>,
        broken_urls: HashSet<String>,
    ) -> Self {
        Self {
            site: Rc::new(SiteState {
                listing_pages,
                listing_index: Cell::new(0),
                detail_pages,
                broken_urls,
                sessions_opened: Cell::new(0),
            }),
        }
    }
}

impl Browser for FakeBrowser {
    fn open_session(&self) -> Result<Box<dyn PageSession>, ScrapeError> {
        self.site.sessions_opened.set(self.site.sessions_opened.get() + 1);
        Ok(Box::new(FakeSession {
            site: Rc::clone(&self.site),
            location: RefCell::new(Location::Blank),
        }))
    }
}

enum Location {
    Blank,
    Listing,
    Detail(String),
}

struct FakeSession {
    site: Rc<SiteState>,
    location: RefCell<Location>,
}

impl FakeSession {
    fn current_html(&self) -> Result<String, ScrapeError> {
        match &*self.location.borrow() {
            Location::Blank => Ok(String::new()),
            Location::Listing => Ok(self.site.listing_pages[self.site.listing_index.get()].clone()),
            Location::Detail(url) => {
                self.site
                    .detail_pages
                    .get(url)
                    .cloned()
                    .ok_or_else(|| ScrapeError::Render {
                        url: url.clone(),
                        reason: "404".to_owned(),
                    })
            }
        }
    }
}

impl PageSession for FakeSession {
    fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        if self.site.broken_urls.contains(url) {
            return Err(ScrapeError::Render {
                url: url.to_owned(),
                reason: "connection reset".to_owned(),
            });
        }
        if url.contains("component_id=") {
            self.site.listing_index.set(0);
            *self.location.borrow_mut() = Location::Listing;
        } else {
            *self.location.borrow_mut() = Location::Detail(url.to_owned());
        }
        Ok(())
    }

    fn content(&self) -> Result<String, ScrapeError> {
        self.current_html()
    }

    fn exists(&self, _selector: &str) -> bool {
        self.current_html()
            .map(|html| html.contains("pagination-next"))
            .unwrap_or(false)
    }

    fn click(&self, selector: &str) -> Result<(), ScrapeError> {
        if !self.exists(selector) {
            return Err(ScrapeError::Interaction {
                selector: selector.to_owned(),
                reason: "no such element".to_owned(),
            });
        }
        self.site.listing_index.set(self.site.listing_index.get() + 1);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn collects_every_proposal_across_paginated_listing() {
    let details = HashMap::from([
        (detail_url("1"), detail_page("First", "01/01/2024")),
        (detail_url("2"), detail_page("Second", "02/01/2024")),
        (detail_url("3"), detail_page("Third", "03/01/2024")),
    ]);
    let browser = FakeBrowser::new(
        vec![
            listing_page(&["1", "2"], true),
            listing_page(&["3"], false),
        ],
        details,
    );

    let result = run_collection(&browser, &test_config()).unwrap();

    assert!(result.failures.is_empty(), "failures: {:?}", result.failures);
    let ids: Vec<&str> = result.records.iter().map(|r| r.proposal_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(result.records[0].title, "First");
    assert_eq!(result.records[0].tags, vec!["Parks"]);
}

#[test]
fn opens_a_fresh_session_per_detail_page() {
    let details = HashMap::from([
        (detail_url("1"), detail_page("First", "01/01/2024")),
        (detail_url("2"), detail_page("Second", "02/01/2024")),
    ]);
    let browser = FakeBrowser::new(vec![listing_page(&["1", "2"], false)], details);

    run_collection(&browser, &test_config()).unwrap();

    // One session for the listing crawl plus one per proposal.
    assert_eq!(browser.site.sessions_opened.get(), 3);
}

#[test]
fn render_failure_lands_in_failures_without_dropping_successes() {
    let details = HashMap::from([(detail_url("2"), detail_page("Survivor", "02/01/2024"))]);
    let browser = FakeBrowser::with_broken_urls(
        vec![listing_page(&["1", "2"], false)],
        details,
        HashSet::from([detail_url("1")]),
    );

    let result = run_collection(&browser, &test_config()).unwrap();

    assert_eq!(result.failures, vec!["1"]);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].proposal_id, "2");
}

#[test]
fn parse_failure_lands_in_failures_and_run_continues() {
    let details = HashMap::from([
        // Missing the title heading: a parse error, not a render error.
        (
            detail_url("1"),
            "<html><body><p>not a proposal page</p></body></html>".to_owned(),
        ),
        (detail_url("2"), detail_page("Survivor", "02/01/2024")),
    ]);
    let browser = FakeBrowser::new(vec![listing_page(&["1", "2"], false)], details);

    let result = run_collection(&browser, &test_config()).unwrap();

    assert_eq!(result.failures, vec!["1"]);
    assert_eq!(result.records.len(), 1);
}

#[test]
fn no_partial_record_is_emitted_for_a_failing_id() {
    let browser = FakeBrowser::new(vec![listing_page(&["9"], false)], HashMap::new());

    let result = run_collection(&browser, &test_config()).unwrap();

    assert_eq!(result.failures, vec!["9"]);
    assert!(result.records.is_empty());
}

#[test]
fn listing_crawl_failure_aborts_the_run() {
    let page1 = format!(
        "{BASE_URL}?component_id=321&page=1&participatory_process_slug=citywide2023"
    );
    let browser = FakeBrowser::with_broken_urls(
        vec![listing_page(&["1"], false)],
        HashMap::new(),
        HashSet::from([page1]),
    );

    let result = run_collection(&browser, &test_config());
    assert!(
        matches!(result, Err(ScrapeError::Render { .. })),
        "expected Render, got: {result:?}"
    );
}

#[test]
fn duplicate_listing_ids_are_fetched_twice() {
    let details = HashMap::from([(detail_url("5"), detail_page("Twice", "01/01/2024"))]);
    let browser = FakeBrowser::new(vec![listing_page(&["5", "5"], false)], details);

    let result = run_collection(&browser, &test_config()).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0], result.records[1]);
}

#[test]
fn identical_inputs_produce_identical_records() {
    let details = HashMap::from([
        (detail_url("1"), detail_page("First", "01/01/2024")),
        (detail_url("2"), detail_page("Second", "02/01/2024")),
    ]);
    let pages = vec![listing_page(&["1", "2"], false)];

    let first = run_collection(
        &FakeBrowser::new(pages.clone(), details.clone()),
        &test_config(),
    )
    .unwrap();
    let second = run_collection(&FakeBrowser::new(pages, details), &test_config()).unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.failures, second.failures);
}
