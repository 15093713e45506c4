//! Browser automation behind a narrow capability interface.
//!
//! The extractors and the pipeline only ever see [`Browser`] and
//! [`PageSession`], so all parsing logic can be exercised against static
//! HTML fixtures without a live Chrome process or network access.
//! [`ChromeBrowser`] is the production implementation over `headless_chrome`.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser as HeadlessBrowser, Tab};

use crate::error::ScrapeError;

/// One rendered page context. Navigation and clicks block until the page's
/// client-side scripts have populated the DOM.
pub trait PageSession {
    /// Navigates to `url` and waits for the render to settle.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] on any navigation or driver failure.
    /// No retries are performed here.
    fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    /// Returns the fully rendered HTML markup of the current page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Render`] if the driver cannot serialize the DOM.
    fn content(&self) -> Result<String, ScrapeError>;

    /// Whether `selector` currently matches an element in the live DOM.
    fn exists(&self, selector: &str) -> bool;

    /// Clicks the first element matching `selector` and waits for the
    /// resulting render.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Interaction`] if the element is absent or the
    /// click fails.
    fn click(&self, selector: &str) -> Result<(), ScrapeError>;
}

/// Factory for page sessions. The pipeline opens one session for the whole
/// listing crawl and a fresh one per detail page.
pub trait Browser {
    /// Opens a new, blank page session.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Browser`] if the driver cannot allocate one.
    fn open_session(&self) -> Result<Box<dyn PageSession>, ScrapeError>;
}

/// Production [`Browser`] backed by a headless Chrome process.
pub struct ChromeBrowser {
    browser: HeadlessBrowser,
    nav_timeout: Duration,
}

impl ChromeBrowser {
    /// Launches a headless Chrome instance with default options.
    ///
    /// `nav_timeout_secs` bounds how long each session waits for navigations
    /// and element lookups before the driver gives up.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Browser`] if no Chrome binary can be located or
    /// the process fails to start. This is the setup failure that aborts a
    /// run before any crawling begins.
    pub fn launch(nav_timeout_secs: u64) -> Result<Self, ScrapeError> {
        let browser = HeadlessBrowser::default().map_err(|e| ScrapeError::Browser {
            reason: e.to_string(),
        })?;
        Ok(Self {
            browser,
            nav_timeout: Duration::from_secs(nav_timeout_secs),
        })
    }
}

impl Browser for ChromeBrowser {
    fn open_session(&self) -> Result<Box<dyn PageSession>, ScrapeError> {
        let tab = self.browser.new_tab().map_err(|e| ScrapeError::Browser {
            reason: e.to_string(),
        })?;
        tab.set_default_timeout(self.nav_timeout);
        Ok(Box::new(ChromeSession { tab }))
    }
}

/// One Chrome tab wrapped as a [`PageSession`].
struct ChromeSession {
    tab: Arc<Tab>,
}

impl PageSession for ChromeSession {
    fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ScrapeError::Render {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn content(&self) -> Result<String, ScrapeError> {
        self.tab.get_content().map_err(|e| ScrapeError::Render {
            url: self.tab.get_url(),
            reason: e.to_string(),
        })
    }

    fn exists(&self, selector: &str) -> bool {
        self.tab.find_element(selector).is_ok()
    }

    fn click(&self, selector: &str) -> Result<(), ScrapeError> {
        self.tab
            .find_element(selector)
            .and_then(|element| element.click().map(|_| ()))
            .map_err(|e| ScrapeError::Interaction {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;
        // The next-page control triggers a full navigation; wait for it so the
        // following content() call sees the new page.
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::Interaction {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
