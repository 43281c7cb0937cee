use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    error::CdpError,
    page::Page,
};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{instrument, Level};
use url::Url;

use super::{Error, Fetcher, RenderedPage, MARKER};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl From<CdpError> for Error {
    fn from(e: CdpError) -> Self {
        Self::Browser(e.to_string())
    }
}

/// Renders menu pages in one shared headless Chromium, a fresh tab per fetch.
pub struct BrowserFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    timeout: Duration,
}

impl BrowserFetcher {
    pub async fn launch(timeout: Duration) -> Result<Self, Error> {
        let config = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .build()
            .map_err(Error::Browser)?;
        let (browser, mut events) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    log::debug!("chromium event error: {e}");
                }
            }
        });
        log::info!("launched headless chromium");
        Ok(Self {
            browser,
            handler,
            timeout,
        })
    }

    async fn render(&self, url: &Url) -> Result<String, Error> {
        let page = tokio::time::timeout(self.timeout, self.browser.new_page(url.as_str()))
            .await
            .map_err(|_| Error::Timeout {
                url: url.clone(),
                after: self.timeout,
            })??;
        let html = tokio::time::timeout(self.timeout, wait_for_marker(&page)).await;
        if let Err(e) = page.close().await {
            log::debug!("failed to close tab for {url}: {e}");
        }
        match html {
            Ok(html) => Ok(html?),
            Err(_) => Err(Error::Timeout {
                url: url.clone(),
                after: self.timeout,
            }),
        }
    }
}

async fn wait_for_marker(page: &Page) -> Result<String, CdpError> {
    loop {
        if page.find_element(MARKER).await.is_ok() {
            return page.content().await;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    #[instrument(skip(self, url), fields(url = %url), level = Level::TRACE)]
    async fn fetch(&self, url: &Url) -> Result<RenderedPage, Error> {
        let start = std::time::Instant::now();
        let html = self.render(url).await?;
        log::trace!("Rendered menu page {url} in \t {:?}", start.elapsed());
        RenderedPage::new(url.clone(), html)
    }
}

impl Drop for BrowserFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
