//! Network source mapping a URL to the HTTP status it answers with

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::parser::classify_url;
use crate::source::ValueSource;

/// Value returned by [`WebProbeSource::fetch`] when no status could be obtained
pub const PROBE_FAILED: i32 = -1;

/// Default request timeout (10 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirect hops followed before the request fails
const MAX_REDIRECTS: usize = 10;

/// HTTP client settings for [`WebProbeSource`]
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Whole-request timeout, connect included
    pub timeout: Duration,
    /// Follow 3xx responses that keep the scheme (http to http, https to
    /// https), up to 10 hops. A redirect that switches scheme is not
    /// followed and its 3xx status is returned.
    pub follow_redirects: bool,
    /// `User-Agent` header sent with every probe
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            follow_redirects: true,
            user_agent: concat!("memosource/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Follow redirects only while the scheme stays the same
fn same_scheme_redirects() -> Policy {
    Policy::custom(|attempt| {
        let same_scheme = attempt
            .previous()
            .last()
            .map_or(true, |prev| prev.scheme() == attempt.url().scheme());

        if !same_scheme {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

/// Source that issues one blocking HTTP GET per key
///
/// Keys that are not absolute http/https URLs, unreachable hosts and
/// transport errors all come back as [`PROBE_FAILED`]. Every call is
/// counted, failed or not.
pub struct WebProbeSource {
    client: Client,
    config: ProbeConfig,
    queries: u64,
}

impl WebProbeSource {
    /// Create a probe with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ProbeConfig::default())
    }

    /// Create a probe with the given client settings
    ///
    /// # Returns
    /// * `Result<WebProbeSource>` - `SourceError::Client` if the HTTP client
    ///   cannot be built (for example, TLS backend initialization failed)
    pub fn with_config(config: ProbeConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            same_scheme_redirects()
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            config,
            queries: 0,
        })
    }

    /// Settings this probe was built with
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Request `url` and return the response status code
    ///
    /// Does not touch the invocation counter; only [`ValueSource::fetch`] does.
    pub fn probe(&self, url: &str) -> Result<u16> {
        let target = classify_url(url)?;

        debug!(scheme = ?target.scheme, authority = target.authority, "Probing {}", target.url);
        let response = self.client.get(target.url).send()?;

        Ok(response.status().as_u16())
    }
}

impl ValueSource<String, i32> for WebProbeSource {
    fn fetch(&mut self, key: &String) -> i32 {
        self.queries += 1;

        match self.probe(key) {
            Ok(status) => i32::from(status),
            Err(e) => {
                debug!("Probe of {:?} failed: {}", key, e);
                PROBE_FAILED
            }
        }
    }

    fn invocations(&self) -> u64 {
        self.queries
    }
}
