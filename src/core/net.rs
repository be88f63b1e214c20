// src/core/net.rs
use std::{fs, path::PathBuf, time::{Duration, Instant}};

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::config::consts;
use crate::error::{PollError, PollResult};

/// Where page HTML comes from. The pipeline only ever sees this trait, so
/// tests and offline runs can swap the network out.
pub trait Fetch {
    fn get(&self, url: &str) -> PollResult<String>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> PollResult<String> {
        (**self).get(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for Box<F> {
    fn get(&self, url: &str) -> PollResult<String> {
        (**self).get(url)
    }
}

/// Blocking HTTPS GET with a browser-looking header set.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> PollResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(consts::USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(consts::ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(consts::ACCEPT_LANGUAGE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(consts::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> PollResult<String> {
        let t = Instant::now();
        info!("GET {url}");

        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Status { status: status.as_u16(), url: s!(url) });
        }

        let body = resp.text()?;
        debug!("fetched {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}

/// Serves a saved copy of the page regardless of the URL asked for.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetch for FileFetcher {
    fn get(&self, url: &str) -> PollResult<String> {
        debug!("offline: {} instead of {url}", self.path.display());
        fs::read_to_string(&self.path).map_err(|e| PollError::Io {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}
