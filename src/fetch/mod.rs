mod http;

#[cfg(feature = "browser")]
mod browser;

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use scraper::Html;
use url::Url;

use crate::{config::RendererKind, static_selector};

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

/// Selector of the region that only exists once the day's menu has been rendered.
pub const MARKER: &str = ".courses_wrapper";

#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    MarkerMissing { url: Url },
    Timeout { url: Url, after: Duration },
    Browser(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "Request error: {e}"),
            Self::MarkerMissing { url } => {
                write!(f, "Menu not found: {url} has no `{MARKER}` region")
            }
            Self::Timeout { url, after } => {
                write!(f, "Timed out after {after:?} waiting for the menu at {url}")
            }
            Self::Browser(msg) => write!(f, "Browser error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }
}

/// Source of a menu page whose marker region is known to be present.
///
/// Only the source is kept. [`Html`] is not `Send` and cannot live across the awaits between
/// fetching and extracting, so the page is parsed once here for the marker check and again by
/// [`RenderedPage::document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    url: Url,
    html: String,
}

impl RenderedPage {
    pub fn new(url: Url, html: String) -> Result<Self, Error> {
        if has_marker(&Html::parse_document(&html)) {
            Ok(Self { url, html })
        } else {
            Err(Error::MarkerMissing { url })
        }
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Parses the page into a queryable document. Hold it only between awaits.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

fn has_marker(document: &Html) -> bool {
    static_selector!(MARKER_SELECTOR <- ".courses_wrapper");
    document.select(&MARKER_SELECTOR).next().is_some()
}

/// Turns a menu url into a rendered page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<RenderedPage, Error>;
}

pub async fn connect(renderer: RendererKind, timeout: Duration) -> Result<Arc<dyn Fetcher>, Error> {
    match renderer {
        RendererKind::Http => Ok(Arc::new(HttpFetcher::new(timeout)?)),
        #[cfg(feature = "browser")]
        RendererKind::Chromium => Ok(Arc::new(BrowserFetcher::launch(timeout).await?)),
        #[cfg(not(feature = "browser"))]
        RendererKind::Chromium => Err(Error::Browser(
            "chromium renderer requested but this build lacks the `browser` feature".to_owned(),
        )),
    }
}
