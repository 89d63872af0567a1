//! Page sources and URL dereferencing.
//!
//! The pipeline consumes a [`PageSource`]: either inline HTML bytes or a URL.
//! URLs are resolved through a [`Fetcher`], so transports can supply their
//! own client; [`HttpFetcher`] is the default blocking HTTP client.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A page to dereference. Only `http` and `https` are accepted.
    Url(String),
    /// An inline HTML document.
    Html {
        bytes: Vec<u8>,
        /// Charset label or `Content-Type` value declared by the transport.
        encoding: Option<String>,
    },
}

impl PageSource {
    /// Inline HTML with no declared encoding.
    #[must_use]
    pub fn html(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Html {
            bytes: bytes.into(),
            encoding: None,
        }
    }

    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }
}

/// HTML bytes plus the encoding declared by whoever supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub encoding: Option<String>,
}

/// Parse and check a page URL.
///
/// # Errors
///
/// [`Error::MalformedInput`] if the string is not a URL or its scheme is not
/// `http`/`https`.
pub fn parse_page_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|err| Error::MalformedInput(format!("invalid URL '{raw}': {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::MalformedInput(format!(
            "unsupported URL scheme '{scheme}'"
        ))),
    }
}

/// Dereferences URLs into raw documents.
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url`.
    ///
    /// # Errors
    ///
    /// [`Error::SourceUnreachable`] when the document cannot be retrieved.
    fn fetch(&self, url: &Url) -> Result<RawDocument>;
}

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Overall request timeout.
    ///
    /// Default: `30s`
    pub timeout: Duration,

    /// `User-Agent` header value.
    ///
    /// Default: `rs-distiller/<version>`
    pub user_agent: String,

    /// Largest body accepted, in bytes.
    ///
    /// Default: `10 MiB`
    pub max_body_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("rs-distiller/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Blocking HTTP client.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    options: FetchOptions,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    #[must_use]
    pub fn new(options: FetchOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(options.timeout)
            .user_agent(&options.user_agent)
            .build();
        Self { agent, options }
    }
}

#[cfg(feature = "fetch")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(FetchOptions::default())
    }
}

#[cfg(feature = "fetch")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<RawDocument> {
        use std::io::Read;

        let response = self.agent.get(url.as_str()).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => {
                Error::SourceUnreachable(format!("HTTP {code} fetching {url}"))
            }
            ureq::Error::Transport(transport) => {
                Error::SourceUnreachable(format!("network error fetching {url}: {transport}"))
            }
        })?;

        if !(200..300).contains(&response.status()) {
            return Err(Error::SourceUnreachable(format!(
                "HTTP {} fetching {url}",
                response.status()
            )));
        }

        let encoding = response.header("content-type").map(str::to_string);

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(self.options.max_body_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|err| Error::SourceUnreachable(format!("failed to read {url}: {err}")))?;

        if bytes.len() as u64 > self.options.max_body_bytes {
            return Err(Error::SourceUnreachable(format!(
                "{url} exceeds {} bytes",
                self.options.max_body_bytes
            )));
        }

        tracing::debug!(%url, bytes = bytes.len(), encoding = ?encoding, "fetched page");

        Ok(RawDocument { bytes, encoding })
    }
}
