use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Jitter, Quota, RateLimiter,
};
use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use super::{Error, Fetcher, RenderedPage};

const RATE_LIMIT: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => panic!("rate limit must be non-zero"),
};
const DELAY_JITTER: Duration = Duration::from_millis(500);

/// Fetches menu pages with plain GET requests. The dining site renders menus server side, so the
/// marker is either in the response or not coming at all.
pub struct HttpFetcher {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().gzip(true).timeout(timeout).build()?;
        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(Quota::per_second(RATE_LIMIT)),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, url), fields(url = %url), level = Level::TRACE)]
    async fn fetch(&self, url: &Url) -> Result<RenderedPage, Error> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(DELAY_JITTER))
            .await;
        let start = std::time::Instant::now();
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let html = response.text().await?;
        log::trace!("Got menu page {url} in \t {:?}", start.elapsed());
        RenderedPage::new(url.clone(), html)
    }
}
