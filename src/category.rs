//! Entity categories and their model bindings.

use std::fmt;

use serde::Serialize;

/// Kind of named entity recognized in page text.
///
/// Variant order is the order categories are processed and serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityCategory {
    #[serde(rename = "persons")]
    Person,
    #[serde(rename = "locations")]
    Location,
    #[serde(rename = "organizations")]
    Organization,
}

/// Category → model file binding.
///
/// Adding a category means adding a variant, a row here and a model file.
pub const CATEGORY_MODELS: &[(EntityCategory, &str)] = &[
    (EntityCategory::Person, "en-ner-person.json"),
    (EntityCategory::Location, "en-ner-location.json"),
    (EntityCategory::Organization, "en-ner-organization.json"),
];

impl EntityCategory {
    /// All categories in processing order.
    pub const ALL: [EntityCategory; 3] = [Self::Person, Self::Location, Self::Organization];

    /// Singular name, as written in model files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Location => "location",
            Self::Organization => "organization",
        }
    }

    /// Key of this category in the JSON result.
    #[must_use]
    pub fn result_key(self) -> &'static str {
        match self {
            Self::Person => "persons",
            Self::Location => "locations",
            Self::Organization => "organizations",
        }
    }

    /// File name of the recognition model bound to this category.
    #[must_use]
    pub fn model_file(self) -> &'static str {
        CATEGORY_MODELS
            .iter()
            .find(|(category, _)| *category == self)
            .map_or("", |(_, file)| file)
    }

    /// Parse a singular category name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_model() {
        for category in EntityCategory::ALL {
            assert!(!category.model_file().is_empty(), "{category} has no model");
        }
        assert_eq!(CATEGORY_MODELS.len(), EntityCategory::ALL.len());
    }

    #[test]
    fn names_round_trip() {
        for category in EntityCategory::ALL {
            assert_eq!(EntityCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(EntityCategory::from_name("date"), None);
    }

    #[test]
    fn serializes_as_result_key() {
        let json = serde_json::to_string(&EntityCategory::Organization).unwrap_or_default();
        assert_eq!(json, "\"organizations\"");
    }
}
