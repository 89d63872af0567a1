//! Result types for distillation output.
//!
//! `ExtractedDocument` is what the content extractor hands to the annotation
//! stages; `ResultRecord` is the terminal artifact serialized for the caller.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::category::EntityCategory;

/// Distinct entity surface strings for one category.
///
/// Ordered so that serialization is byte-for-byte reproducible.
pub type EntitySet = BTreeSet<String>;

/// Main content of a page after boilerplate removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Page title, if the document declared a non-empty one.
    pub title: Option<String>,

    /// Content blocks in document order, one per line.
    pub body: String,
}

impl ExtractedDocument {
    #[must_use]
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }
}

/// Final output of the pipeline.
///
/// Serializes to `{"title": ..., "content": ..., "persons": [...], ...}` with
/// `title` omitted when absent and each category key present only when its
/// set is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    content: String,

    #[serde(flatten)]
    entities: BTreeMap<EntityCategory, EntitySet>,
}

impl ResultRecord {
    /// Record with title and content but no entities.
    #[must_use]
    pub fn new(title: Option<String>, content: impl Into<String>) -> Self {
        Self {
            title,
            content: content.into(),
            entities: BTreeMap::new(),
        }
    }

    /// Attach the entities found for `category`.
    ///
    /// Empty sets are dropped so that a present category always has at least
    /// one entity.
    #[must_use]
    pub fn with_entities(mut self, category: EntityCategory, entities: EntitySet) -> Self {
        if entities.is_empty() {
            self.entities.remove(&category);
        } else {
            self.entities.insert(category, entities);
        }
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Entities of one category, `None` if none were recognized.
    #[must_use]
    pub fn entities(&self, category: EntityCategory) -> Option<&EntitySet> {
        self.entities.get(&category)
    }

    /// Categories that have entities, in category order.
    pub fn categories(&self) -> impl Iterator<Item = EntityCategory> + '_ {
        self.entities.keys().copied()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
