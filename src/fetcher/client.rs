use crate::fetcher::{decode::decode_body, errors::FetchError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, redirect::Policy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "JaundiceBot/0.1";
const MAX_REDIRECTS: usize = 10;

/// Where article HTML comes from. The pipeline only sees this trait so it can
/// be driven without a network in tests.
#[async_trait]
pub trait ArticleSource: Send + Sync + 'static {
    /// Retrieve the raw HTML for `url`. Implementations make a single attempt
    /// and never impose their own time budget.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher restricted to an allow-list of hosts.
///
/// Cloning is cheap: the reqwest client and the host list are both shared, so
/// one `Fetcher` serves every task of a batch through the same connection pool.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    allowed_hosts: Arc<[String]>,
}

impl Fetcher {
    /// Build a fetcher whose client follows at most `MAX_REDIRECTS` redirects,
    /// and only to hosts on the allow-list.
    pub fn new<S: AsRef<str>>(allowed_hosts: &[S]) -> Result<Self, FetchError> {
        let allowed_hosts = normalize_hosts(allowed_hosts);
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .redirect(allow_listed_redirects(allowed_hosts.clone()))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers
            })
            .build()
            .map_err(|e| FetchError::Unknown(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            allowed_hosts,
        })
    }

    /// Use a preconfigured client. Its redirect policy is left untouched.
    pub fn with_client<S: AsRef<str>>(client: Client, allowed_hosts: &[S]) -> Self {
        Self {
            client,
            allowed_hosts: normalize_hosts(allowed_hosts),
        }
    }

    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    /// Parse `url` and check its host against the allow-list. Hosts must match
    /// exactly; subdomains are separate sources.
    pub fn check_source(&self, url: &str) -> Result<Url, FetchError> {
        let parsed =
            Url::parse(url).map_err(|e| FetchError::UnsupportedSource(format!("{url}: {e}")))?;
        ensure_allowed(&self.allowed_hosts, &parsed)?;
        Ok(parsed)
    }
}

fn normalize_hosts<S: AsRef<str>>(hosts: &[S]) -> Arc<[String]> {
    hosts
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect::<Vec<_>>()
        .into()
}

fn ensure_allowed(allowed_hosts: &[String], url: &Url) -> Result<(), FetchError> {
    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| FetchError::UnsupportedSource(format!("{url}: no host")))?;

    if !allowed_hosts.iter().any(|allowed| *allowed == host) {
        return Err(FetchError::UnsupportedSource(host));
    }
    Ok(())
}

/// Every redirect hop must stay on the allow-list.
fn allow_listed_redirects(allowed_hosts: Arc<[String]>) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        match ensure_allowed(&allowed_hosts, attempt.url()) {
            Ok(()) => attempt.follow(),
            Err(rejected) => attempt.error(rejected),
        }
    })
}

#[async_trait]
impl ArticleSource for Fetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed_url = self.check_source(url)?;

        let mut response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        // Content-Length may be missing (chunked) or wrong, so count as we read.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(FetchError::from_reqwest_error)?
        {
            let read = (body.len() + chunk.len()) as u64;
            if read > MAX_BODY_SIZE {
                return Err(FetchError::BodyTooLarge(read));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(status = %status, bytes = body.len(), "fetched article body");
        decode_body(&content_type, &body)
    }
}
