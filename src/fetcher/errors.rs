use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL has no host or its host is not on the allow-list. Raised before
    /// any network traffic.
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("connect error: {0}")]
    Connect(String),

    #[error("request error: {0}")]
    Request(String),

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// True when the failure is about what the source is rather than how the
    /// transfer went. These are reported as parsing failures, not fetch failures.
    pub fn is_source_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSource(_) | Self::UnsupportedContentType(_)
        )
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_redirect() {
            // The redirect policy aborts off-list hops with our own error.
            let mut cause = std::error::Error::source(&err);
            while let Some(inner) = cause {
                if let Some(Self::UnsupportedSource(host)) = inner.downcast_ref::<FetchError>()
                {
                    return Self::UnsupportedSource(host.clone());
                }
                cause = inner.source();
            }
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() {
            // DNS failures surface here as well
            Self::Connect(err.to_string())
        } else if err.is_request() || err.is_timeout() {
            Self::Request(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
