//! HTTP page fetching with exponential backoff retry logic.
//!
//! The rest of the pipeline treats fetching as a black box that turns a URL
//! into raw HTML. This module is that box: a [`FetchPage`] trait, a
//! reqwest-backed [`HttpFetcher`], and a [`RetryFetch`] decorator that adds
//! retries to any implementation. All timeout and retry policy lives here —
//! extraction and rendering never block on the network.
//!
//! # Retry Strategy
//!
//! - Exponential backoff doubling from the base delay
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// Browser User-Agent sent with every request; the site serves the full
/// archive markup to desktop browsers.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Trait for fetching a page body by URL.
///
/// Implementors turn a URL into the page's text body. The abstraction exists
/// so decorators (retry, and in tests, canned responses) can wrap the real
/// HTTP client.
pub trait FetchPage {
    /// Fetch the body of `url`.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Plain HTTP fetcher over a shared [`reqwest::Client`].
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(StdDuration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        tracing::debug!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            bytes = body.len(),
            "Fetched page"
        );
        Ok(body)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchPage`]
/// implementation.
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchPage,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchPage for RetryFetch<T>
where
    T: FetchPage,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetch a page with the default client and retry policy: up to 3 retries,
/// backoff doubling from 1 second.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_with_backoff(url: &str) -> Result<String, Box<dyn Error>> {
    let fetcher = RetryFetch::new(HttpFetcher::new()?, 3, StdDuration::from_secs(1));
    fetcher.fetch(url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fails a configured number of times before succeeding.
    struct FlakyFetcher {
        failures_left: Mutex<usize>,
        calls: Mutex<usize>,
    }

    impl FlakyFetcher {
        fn new(failures: usize) -> Self {
            Self {
                failures_left: Mutex::new(failures),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    impl FetchPage for FlakyFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, Box<dyn Error>> {
            *self.calls.lock().unwrap() += 1;
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                Err("transient failure".into())
            } else {
                Ok("<html></html>".to_string())
            }
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let retry = RetryFetch::new(FlakyFetcher::new(2), 3, StdDuration::from_millis(1));
        let body = retry.fetch("https://example.com/").await.unwrap();
        assert_eq!(body, "<html></html>");
        assert_eq!(retry.inner.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let retry = RetryFetch::new(FlakyFetcher::new(10), 2, StdDuration::from_millis(1));
        assert!(retry.fetch("https://example.com/").await.is_err());
        // initial attempt + 2 retries
        assert_eq!(retry.inner.calls(), 3);
    }

    #[tokio::test]
    async fn first_try_success_makes_one_call() {
        let retry = RetryFetch::new(FlakyFetcher::new(0), 3, StdDuration::from_millis(1));
        retry.fetch("https://example.com/").await.unwrap();
        assert_eq!(retry.inner.calls(), 1);
    }
}
