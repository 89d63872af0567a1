//! # rs-distiller
//!
//! Main-content extraction and named-entity annotation for web pages.
//!
//! A page (inline HTML or a URL) is reduced to its title and article text with
//! navigation, ads and other boilerplate removed. The text is then split into
//! sentences, tokenized, and scanned for persons, locations and organizations.
//! The result is a single JSON-serializable record.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_distiller::distill;
//!
//! let html = r#"<html><head><title>Trip Report</title></head>
//! <body><article><p>John Smith visited Paris. He works for Acme Corp.</p></article></body></html>"#;
//!
//! let record = distill(html)?;
//! assert_eq!(record.title(), Some("Trip Report"));
//! println!("{}", record.to_json().unwrap_or_default());
//! # Ok::<(), rs_distiller::Error>(())
//! ```
//!
//! ## Stages
//!
//! - **Content extraction** ([`extractor`]): block segmentation and
//!   content/boilerplate classification using link density, block length and
//!   tag context.
//! - **Sentence segmentation**, **tokenization** and **entity recognition**
//!   ([`nlp`]): each driven by a JSON model from [`models`].
//! - **Orchestration** ([`Distiller`]): runs the stages in order and fans
//!   recognition out across [`EntityCategory`] values.

mod category;
mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Main content extraction.
pub mod extractor;

/// Page sources and URL fetching.
pub mod fetch;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Model files and the model registry.
pub mod models;

/// Sentence detection, tokenization and named-entity recognition.
pub mod nlp;

/// Pipeline orchestration.
pub mod pipeline;

// Public API - re-exports
pub use category::{EntityCategory, CATEGORY_MODELS};
pub use error::{Error, ErrorKind, Result};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchOptions, Fetcher, PageSource, RawDocument};
pub use models::{ModelRegistry, ModelSource};
pub use nlp::Span;
pub use options::Options;
pub use pipeline::Distiller;
pub use result::{EntitySet, ExtractedDocument, ResultRecord};

/// Extracts title and main content from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_distiller::extract;
///
/// let html = "<html><body><nav><a href='/'>Home</a></nav>\
///             <article><p>The council met on Tuesday to discuss the budget.</p></article></body></html>";
/// let doc = extract(html)?;
/// assert_eq!(doc.body, "The council met on Tuesday to discuss the budget.");
/// # Ok::<(), rs_distiller::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<ExtractedDocument> {
    extractor::extract(html, &Options::default())
}

/// Extracts title and main content with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractedDocument> {
    extractor::extract(html, options)
}

/// Extracts from raw bytes, detecting the character encoding.
///
/// `declared_encoding` (a charset label or `Content-Type` value) takes
/// precedence over `<meta>` declarations.
#[allow(clippy::missing_errors_doc)]
pub fn extract_bytes(html: &[u8], declared_encoding: Option<&str>) -> Result<ExtractedDocument> {
    extractor::extract_bytes(html, declared_encoding, &Options::default())
}

/// Runs the full pipeline over an HTML string with the shared models.
///
/// Models come from `DISTILLER_MODEL_DIR` if set, otherwise the bundled
/// English models, and are loaded once per process.
#[allow(clippy::missing_errors_doc)]
pub fn distill(html: &str) -> Result<ResultRecord> {
    Distiller::from_env()?.run(&PageSource::html(html))
}

/// Runs the full pipeline over a URL with the shared models.
#[cfg(feature = "fetch")]
#[allow(clippy::missing_errors_doc)]
pub fn distill_url(url: &str) -> Result<ResultRecord> {
    Distiller::from_env()?.run(&PageSource::url(url))
}
