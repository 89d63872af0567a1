//! Pipeline orchestration.
//!
//! [`Distiller`] sequences the stages for one request: obtain the extracted
//! document, segment its body, tokenize every sentence, run one recognizer
//! per entity category over the shared tokens, and assemble the record. Any
//! failure aborts the request; no partial record is produced.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::category::EntityCategory;
use crate::error::{Error, Result};
use crate::extractor;
use crate::fetch::{parse_page_url, Fetcher, PageSource};
use crate::models::ModelRegistry;
use crate::nlp::{recognize, SentenceSequence, TokenizedSentence};
use crate::result::{EntitySet, ExtractedDocument, ResultRecord};
use crate::Options;

/// Runs the extraction and annotation pipeline.
///
/// Cheap to clone; models are shared through an [`Arc`].
#[derive(Clone)]
pub struct Distiller {
    registry: Arc<ModelRegistry>,
    options: Options,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl fmt::Debug for Distiller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distiller")
            .field("options", &self.options)
            .field("fetcher", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}

impl Distiller {
    /// Distiller over `registry` with default options.
    ///
    /// With the `fetch` feature a default [`crate::fetch::HttpFetcher`] is
    /// installed for URL sources.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self {
            registry,
            options: Options::default(),
            fetcher: default_fetcher(),
        }
    }

    /// Distiller over the process-wide registry.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] if the models cannot be loaded.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ModelRegistry::shared()?))
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Replace the URL fetcher.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Distill a page.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] for binary input or an unusable URL.
    /// - [`Error::SourceUnreachable`] if a URL cannot be fetched.
    /// - [`Error::Extraction`] if boilerplate removal fails.
    /// - [`Error::ModelUnavailable`] if a category has no model.
    pub fn run(&self, source: &PageSource) -> Result<ResultRecord> {
        self.run_inner(source, None)
    }

    /// Like [`Distiller::run`], checking `cancel` between steps.
    ///
    /// # Errors
    ///
    /// [`Error::Cancelled`] once `cancel` is observed set, otherwise as
    /// [`Distiller::run`].
    pub fn run_with_cancel(&self, source: &PageSource, cancel: &AtomicBool) -> Result<ResultRecord> {
        self.run_inner(source, Some(cancel))
    }

    /// Annotate a document that was already extracted.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] if a category has no model.
    pub fn run_extracted(&self, document: ExtractedDocument) -> Result<ResultRecord> {
        self.annotate(document, None)
    }

    /// Obtain the extracted document for a source.
    ///
    /// # Errors
    ///
    /// As [`Distiller::run`], minus model errors.
    pub fn extract(&self, source: &PageSource) -> Result<ExtractedDocument> {
        match source {
            PageSource::Html { bytes, encoding } => {
                extractor::extract_bytes(bytes, encoding.as_deref(), &self.options)
            }
            PageSource::Url(raw) => {
                let url = parse_page_url(raw)?;
                let fetcher = self.fetcher.as_ref().ok_or_else(|| {
                    Error::SourceUnreachable(format!("no fetcher configured for {url}"))
                })?;
                let raw_document = fetcher.fetch(&url)?;
                extractor::extract_bytes(
                    &raw_document.bytes,
                    raw_document.encoding.as_deref(),
                    &self.options,
                )
            }
        }
    }

    /// Split text into sentences.
    #[must_use]
    pub fn segment(&self, text: &str) -> SentenceSequence {
        self.registry.sentence_detector().segment(text)
    }

    /// Tokenize sentences, keeping their order.
    #[must_use]
    pub fn tokenize(&self, sentences: &[String]) -> Vec<TokenizedSentence> {
        let tokenizer = self.registry.tokenizer();
        sentences.iter().map(|s| tokenizer.tokenize(s)).collect()
    }

    /// Distinct entities of one category across all sentences.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] if the category has no model.
    pub fn recognize(
        &self,
        sentences: &[TokenizedSentence],
        category: EntityCategory,
    ) -> Result<EntitySet> {
        let finder = self.registry.name_finder(category)?;
        let entities = recognize(finder, sentences);
        tracing::debug!(category = %category, entities = entities.len(), "recognized entities");
        Ok(entities)
    }

    fn run_inner(&self, source: &PageSource, cancel: Option<&AtomicBool>) -> Result<ResultRecord> {
        checkpoint(cancel)?;
        let document = self.extract(source)?;
        self.annotate(document, cancel)
    }

    fn annotate(
        &self,
        document: ExtractedDocument,
        cancel: Option<&AtomicBool>,
    ) -> Result<ResultRecord> {
        let ExtractedDocument { title, body } = document;

        if body.is_empty() {
            tracing::debug!("empty body, skipping annotation");
            return Ok(ResultRecord::new(title, body));
        }

        checkpoint(cancel)?;
        let sentences = self.segment(&body);
        tracing::debug!(sentences = sentences.len(), "segmented body");

        checkpoint(cancel)?;
        let tokenized = self.tokenize(&sentences);
        tracing::debug!(
            tokens = tokenized.iter().map(Vec::len).sum::<usize>(),
            "tokenized sentences"
        );

        checkpoint(cancel)?;
        let found: Vec<(EntityCategory, EntitySet)> = if self.options.parallel_recognition {
            EntityCategory::ALL
                .as_slice()
                .par_iter()
                .map(|category| self.recognize(&tokenized, *category).map(|set| (*category, set)))
                .collect::<Result<_>>()?
        } else {
            EntityCategory::ALL
                .iter()
                .map(|category| self.recognize(&tokenized, *category).map(|set| (*category, set)))
                .collect::<Result<_>>()?
        };

        checkpoint(cancel)?;
        let record = found
            .into_iter()
            .fold(ResultRecord::new(title, body), |record, (category, entities)| {
                record.with_entities(category, entities)
            });

        tracing::info!(
            categories = record.categories().count(),
            content_chars = record.content().len(),
            "distilled document"
        );
        Ok(record)
    }
}

fn checkpoint(cancel: Option<&AtomicBool>) -> Result<()> {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Err(Error::Cancelled);
    }
    Ok(())
}

#[cfg(feature = "fetch")]
fn default_fetcher() -> Option<Arc<dyn Fetcher>> {
    Some(Arc::new(crate::fetch::HttpFetcher::default()))
}

#[cfg(not(feature = "fetch"))]
fn default_fetcher() -> Option<Arc<dyn Fetcher>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use url::Url;

    fn distiller() -> Distiller {
        match ModelRegistry::shared() {
            Ok(registry) => Distiller::new(registry),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    struct StaticFetcher(&'static str);

    impl Fetcher for StaticFetcher {
        fn fetch(&self, _url: &Url) -> Result<RawDocument> {
            Ok(RawDocument {
                bytes: self.0.as_bytes().to_vec(),
                encoding: Some("text/html; charset=utf-8".into()),
            })
        }
    }

    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        fn fetch(&self, url: &Url) -> Result<RawDocument> {
            Err(Error::SourceUnreachable(format!("HTTP 404 fetching {url}")))
        }
    }

    #[test]
    fn extracted_document_is_annotated() {
        let doc = ExtractedDocument::new(
            Some("Trip Report".into()),
            "John Smith visited Paris. He works for Acme Corp.",
        );
        let record = match distiller().run_extracted(doc) {
            Ok(record) => record,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        let names = |c| {
            record
                .entities(c)
                .map(|s| s.iter().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        };
        assert_eq!(names(EntityCategory::Person), vec!["John Smith"]);
        assert_eq!(names(EntityCategory::Location), vec!["Paris"]);
        assert_eq!(names(EntityCategory::Organization), vec!["Acme Corp."]);
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let doc = ExtractedDocument::new(None, "Jane Doe flew to London. She joined Google in May.");
        let parallel = distiller().run_extracted(doc.clone()).ok();
        let sequential = distiller()
            .with_options(Options {
                parallel_recognition: false,
                ..Options::default()
            })
            .run_extracted(doc)
            .ok();
        assert!(parallel.is_some());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn url_source_goes_through_fetcher() {
        let d = distiller().with_fetcher(Arc::new(StaticFetcher(
            "<html><head><title>Fetched</title></head><body><article>\
             <p>Tim Cook visited Berlin last week.</p></article></body></html>",
        )));
        let record = match d.run(&PageSource::url("https://example.com/a")) {
            Ok(record) => record,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        assert_eq!(record.title(), Some("Fetched"));
        assert_eq!(record.content(), "Tim Cook visited Berlin last week.");
    }

    #[test]
    fn fetch_failure_aborts() {
        let d = distiller().with_fetcher(Arc::new(FailingFetcher));
        let err = d.run(&PageSource::url("https://example.com/missing")).err();
        assert!(matches!(err, Some(Error::SourceUnreachable(_))));
    }

    #[test]
    fn non_http_url_is_malformed() {
        let err = distiller().run(&PageSource::url("mailto:someone@example.com")).err();
        assert!(matches!(err, Some(Error::MalformedInput(_))));
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        let err = distiller()
            .run_with_cancel(&PageSource::html("<p>Hello there.</p>"), &cancel)
            .err();
        assert!(matches!(err, Some(Error::Cancelled)));
    }

    #[test]
    fn missing_category_model_fails_the_request() {
        let full = distiller();
        let registry = ModelRegistry::from_parts(
            full.registry().sentence_detector().clone(),
            full.registry().tokenizer().clone(),
            Vec::new(),
        );
        let err = Distiller::new(Arc::new(registry))
            .run_extracted(ExtractedDocument::new(None, "Jane Doe spoke."))
            .err();
        assert!(matches!(err, Some(Error::ModelUnavailable { .. })));
    }
}
