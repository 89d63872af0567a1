//! Model loading and the shared model registry.
//!
//! Five models drive the language stages: a sentence detector, a tokenizer
//! and one name finder per [`EntityCategory`]. They are JSON documents, either
//! compiled into the crate or read from a directory, and are immutable once
//! loaded.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use serde::de::DeserializeOwned;

use crate::category::{EntityCategory, CATEGORY_MODELS};
use crate::error::{Error, Result};
use crate::nlp::{
    NameFinder, NameFinderModel, SentenceDetector, SentenceModel, Tokenizer, TokenizerModel,
};

/// File name of the sentence detector model.
pub const SENTENCE_MODEL_FILE: &str = "en-sent.json";

/// File name of the tokenizer model.
pub const TOKENIZER_MODEL_FILE: &str = "en-token.json";

/// Environment variable naming a model directory.
pub const MODEL_DIR_ENV: &str = "DISTILLER_MODEL_DIR";

const BUNDLED: &[(&str, &str)] = &[
    (SENTENCE_MODEL_FILE, include_str!("../models/en-sent.json")),
    (TOKENIZER_MODEL_FILE, include_str!("../models/en-token.json")),
    ("en-ner-person.json", include_str!("../models/en-ner-person.json")),
    ("en-ner-location.json", include_str!("../models/en-ner-location.json")),
    ("en-ner-organization.json", include_str!("../models/en-ner-organization.json")),
];

/// Where model files come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelSource {
    /// English models compiled into the crate.
    #[default]
    Bundled,
    /// A directory holding the five model files under their standard names.
    Directory(PathBuf),
}

impl ModelSource {
    /// `Directory` from `DISTILLER_MODEL_DIR` if set and non-empty, else `Bundled`.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os(MODEL_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::Directory(PathBuf::from(dir)),
            _ => Self::Bundled,
        }
    }

    /// Raw text of one model file.
    fn read(&self, file: &str) -> Result<String> {
        match self {
            Self::Bundled => BUNDLED
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, text)| (*text).to_string())
                .ok_or_else(|| Error::model(file, "no bundled model with this name")),
            Self::Directory(dir) => read_file(dir, file),
        }
    }
}

fn read_file(dir: &Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|err| Error::model(file, format!("{}: {err}", path.display())))
}

fn parse<T: DeserializeOwned>(file: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|err| Error::model(file, err))
}

/// Loaded, read-only models for every pipeline stage.
#[derive(Debug)]
pub struct ModelRegistry {
    sentence: SentenceDetector,
    tokenizer: Tokenizer,
    finders: Vec<(EntityCategory, NameFinder)>,
}

static SHARED: OnceLock<Arc<ModelRegistry>> = OnceLock::new();
static SHARED_INIT: Mutex<()> = Mutex::new(());

impl ModelRegistry {
    /// Load all models from `source`.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] naming the first model that is missing,
    /// fails to deserialize, fails validation, or is bound to the wrong
    /// category.
    pub fn load(source: &ModelSource) -> Result<Self> {
        let sentence_model: SentenceModel =
            parse(SENTENCE_MODEL_FILE, &source.read(SENTENCE_MODEL_FILE)?)?;
        sentence_model
            .validate()
            .map_err(|reason| Error::model(SENTENCE_MODEL_FILE, reason))?;

        let tokenizer_model: TokenizerModel =
            parse(TOKENIZER_MODEL_FILE, &source.read(TOKENIZER_MODEL_FILE)?)?;
        tokenizer_model
            .validate()
            .map_err(|reason| Error::model(TOKENIZER_MODEL_FILE, reason))?;

        let mut finders = Vec::with_capacity(CATEGORY_MODELS.len());
        for (category, file) in CATEGORY_MODELS {
            let model: NameFinderModel = parse(file, &source.read(file)?)?;
            model.validate().map_err(|reason| Error::model(*file, reason))?;
            if EntityCategory::from_name(&model.category) != Some(*category) {
                return Err(Error::model(
                    *file,
                    format!("model recognizes '{}', expected '{category}'", model.category),
                ));
            }
            finders.push((*category, NameFinder::new(model)));
        }

        tracing::info!(source = ?source, categories = finders.len(), "loaded models");

        Ok(Self::from_parts(
            SentenceDetector::new(sentence_model),
            Tokenizer::new(tokenizer_model),
            finders,
        ))
    }

    /// Load the bundled English models.
    ///
    /// # Errors
    ///
    /// Same as [`ModelRegistry::load`].
    pub fn bundled() -> Result<Self> {
        Self::load(&ModelSource::Bundled)
    }

    /// Assemble a registry from already-built stages.
    ///
    /// Categories without a finder fail at recognition time with
    /// [`Error::ModelUnavailable`].
    #[must_use]
    pub fn from_parts(
        sentence: SentenceDetector,
        tokenizer: Tokenizer,
        finders: Vec<(EntityCategory, NameFinder)>,
    ) -> Self {
        Self {
            sentence,
            tokenizer,
            finders,
        }
    }

    /// Process-wide registry for [`ModelSource::from_env`], loaded at most once.
    ///
    /// A failed load is not cached; the next call tries again.
    ///
    /// # Errors
    ///
    /// Same as [`ModelRegistry::load`].
    pub fn shared() -> Result<Arc<Self>> {
        if let Some(registry) = SHARED.get() {
            return Ok(Arc::clone(registry));
        }

        let _guard = SHARED_INIT
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(registry) = SHARED.get() {
            return Ok(Arc::clone(registry));
        }

        let registry = Arc::new(Self::load(&ModelSource::from_env())?);
        Ok(Arc::clone(SHARED.get_or_init(|| registry)))
    }

    #[must_use]
    pub fn sentence_detector(&self) -> &SentenceDetector {
        &self.sentence
    }

    #[must_use]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// The name finder bound to `category`.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] if no finder is bound.
    pub fn name_finder(&self, category: EntityCategory) -> Result<&NameFinder> {
        self.finders
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, finder)| finder)
            .ok_or_else(|| Error::model(category.model_file(), "no model loaded for category"))
    }
}
