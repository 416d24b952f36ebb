// src/core/net.rs

// Blocking HTTP GET (reqwest). One request per run, no retries.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::options::ScrapeOptions;
use crate::error::FetchError;

/// Anything that can turn a URL into a UTF-8 document.
/// Non-2xx responses must come back as `FetchError::Status`.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    pub fn from_options(opts: &ScrapeOptions) -> Result<Self, FetchError> {
        Self::new(&opts.user_agent, opts.timeout)
    }

    /// Use a preconfigured client as is.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let request_failed = |source| FetchError::Request { url: s!(url), source };

        let resp = self.client.get(url).send().map_err(request_failed)?;
        let status = resp.status();
        debug!(%url, %status, "catalog response");
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        // Decode as UTF-8 regardless of the advertised charset.
        let body = resp.bytes().map_err(request_failed)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
