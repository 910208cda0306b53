//! Sorting [`Config`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};

use super::{filter, Label};

/// Query parameter name the search API expects the sort order in.
pub const QUERY_PARAM: &str = "sort";

/// Configuration of the search results sorting control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Indicator whether the sorting control is enabled.
    pub active: bool,

    /// Query parameter the selected [`Key`] is sent in.
    ///
    /// Always [`QUERY_PARAM`].
    pub query_param_name: filter::QueryParamName,

    /// [`Key`] of the [`Choice`] standing for relevance ordering.
    ///
    /// It's never sent to the search API.
    pub relevance_key: Key,

    /// Query parameter whose presence orders the results by relevance.
    pub relevance_filter: filter::QueryParamName,

    /// [`filter::Id`]s of filters that disable sorting while selected.
    pub conflicting_filters: Vec<filter::Id>,

    /// Selectable [`Choice`]s, in display order.
    pub options: Vec<Choice>,
}

impl Config {
    /// Returns the [`Choice`] with the provided `key`, if any.
    #[must_use]
    pub fn choice(&self, key: &str) -> Option<&Choice> {
        self.options.iter().find(|c| c.key.0 == key)
    }

    /// Indicates whether the provided [`Key`] is the relevance sentinel.
    #[must_use]
    pub fn is_relevance(&self, key: &Key) -> bool {
        *key == self.relevance_key
    }

    /// Indicates whether the provided filter disables sorting.
    #[must_use]
    pub fn conflicts_with(&self, filter: &filter::Id) -> bool {
        self.conflicting_filters.contains(filter)
    }
}

/// Option of the sorting control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// [`Key`] sent to the search API.
    pub key: Key,

    /// Short [`Label`] of this [`Choice`].
    pub label: Label,

    /// Long [`Label`] of this [`Choice`], if it differs from the short one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_label: Option<Label>,
}

/// Sort key understood by the search API.
///
/// A leading `-` reverses the order of the attribute.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[derive(Deserialize, Serialize)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Key(String);

impl Key {
    /// Creates a new [`Key`] if the given `key` is valid.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        Self::check(&key).then_some(Self(key))
    }

    /// Checks whether the given `key` is a valid [`Key`].
    fn check(key: impl AsRef<str>) -> bool {
        let key = key.as_ref();
        let attr = key.strip_prefix('-').unwrap_or(key);
        !attr.is_empty()
            && attr.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Returns this [`Key`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Key {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `sort::Key`")
    }
}

impl TryFrom<String> for Key {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `sort::Key`")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Config, Key};

    #[test]
    fn parses_keys() {
        assert_eq!(Key::from_str("createdAt").unwrap().as_str(), "createdAt");
        assert_eq!(Key::from_str("-price").unwrap().as_str(), "-price");

        assert!(Key::from_str("").is_err());
        assert!(Key::from_str("-").is_err());
        assert!(Key::from_str("created at").is_err());
    }

    #[test]
    fn deserializes_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "active": true,
                "queryParamName": "sort",
                "relevanceKey": "relevance",
                "relevanceFilter": "keywords",
                "conflictingFilters": ["keyword"],
                "options": [
                    { "key": "createdAt", "label": "Newest" },
                    {
                        "key": "relevance",
                        "label": "Relevance",
                        "longLabel": "Relevance (Keyword search)"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert!(config.choice("createdAt").unwrap().long_label.is_none());
        assert!(config.choice("price").is_none());
        assert_eq!(
            config
                .choice("relevance")
                .and_then(|c| c.long_label.as_ref())
                .unwrap()
                .as_str(),
            "Relevance (Keyword search)",
        );
        assert!(config.is_relevance(&Key::from_str("relevance").unwrap()));
        assert!(config.conflicts_with(&"keyword".parse().unwrap()));
        assert!(!config.conflicts_with(&"price".parse().unwrap()));
    }
}
