//! [`Filter`] definitions.

use std::str::FromStr;

use common::define_kind;
use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};

use crate::component::FilterComponent;
#[cfg(doc)]
use crate::domain::Catalog;

use super::Label;

/// Search filter narrowing listings by a single attribute.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// ID of this [`Filter`], unique within a [`Catalog`].
    pub id: Id,

    /// Default [`Label`] of this [`Filter`].
    pub label: Label,

    /// [`Group`] this [`Filter`] is rendered in.
    pub group: Group,

    /// Names of query parameters this [`Filter`] is encoded into.
    pub query_param_names: Vec<QueryParamName>,

    /// Type-specific [`Config`] of this [`Filter`].
    #[serde(flatten)]
    pub config: Config,
}

impl Filter {
    /// Returns [`Kind`] of this [`Filter`].
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.config.kind()
    }

    /// Returns the [`QueryParamName`] the selected values of this [`Filter`]
    /// are encoded into.
    #[must_use]
    pub fn query_param(&self) -> Option<&QueryParamName> {
        self.query_param_names.first()
    }

    /// Returns the [`SelectConfig`] of this [`Filter`], if it's a select
    /// one.
    #[must_use]
    pub const fn select_config(&self) -> Option<&SelectConfig> {
        match &self.config {
            Config::SelectSingle(c) | Config::SelectMultiple(c) => Some(c),
            Config::DateRange(_) | Config::Keyword(_) | Config::Price(_) => {
                None
            }
        }
    }

    /// Dispatches this [`Filter`] to the method of the provided
    /// [`FilterComponent`] matching its [`Kind`].
    pub fn render_with<C>(&self, component: &mut C) -> C::Output
    where
        C: FilterComponent + ?Sized,
    {
        match &self.config {
            Config::DateRange(c) => component.date_range(self, c),
            Config::Keyword(c) => component.keyword(self, c),
            Config::Price(c) => component.price(self, c),
            Config::SelectSingle(c) => component.select_single(self, c),
            Config::SelectMultiple(c) => component.select_multiple(self, c),
        }
    }
}

/// ID of a [`Filter`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[derive(Deserialize, Serialize)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty() && !id.contains(char::is_whitespace)
    }

    /// Returns this [`Id`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `filter::Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `filter::Id`")
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Name of a query parameter sent to the search API.
///
/// Extended data attributes are prefixed with `pub_` or `meta_`, while
/// built-in attributes (`dates`, `keywords`, `price`, `sort`) are fixed.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq)]
#[derive(Deserialize, PartialOrd, Serialize)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct QueryParamName(String);

impl QueryParamName {
    /// Creates a new [`QueryParamName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`QueryParamName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    /// Returns this [`QueryParamName`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QueryParamName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `QueryParamName`")
    }
}

impl TryFrom<String> for QueryParamName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `QueryParamName`")
    }
}

impl PartialEq<str> for QueryParamName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

define_kind! {
    #[doc = "Visibility tier of a [`Filter`]."]
    enum Group {
        #[doc = "Rendered inline on the search page."]
        Primary = "primary",

        #[doc = "Rendered behind the \"More filters\" disclosure control."]
        Secondary = "secondary",
    }
}

define_kind! {
    #[doc = "Type of a [`Filter`], naming the component rendering it."]
    enum Kind {
        #[doc = "Booking dates range."]
        DateRange = "BookingDateRangeFilter",

        #[doc = "Full-text keyword search."]
        Keyword = "KeywordFilter",

        #[doc = "Price range."]
        Price = "PriceFilter",

        #[doc = "Selection of a single enum option."]
        SelectSingle = "SelectSingleFilter",

        #[doc = "Selection of multiple enum options."]
        SelectMultiple = "SelectMultipleFilter",
    }
}

impl Kind {
    /// Returns the query parameter name the search API expects for this
    /// [`Kind`], if it's bound to a built-in attribute.
    #[must_use]
    pub const fn fixed_query_param(self) -> Option<&'static str> {
        match self {
            Self::DateRange => Some("dates"),
            Self::Keyword => Some("keywords"),
            Self::Price => Some("price"),
            Self::SelectSingle | Self::SelectMultiple => None,
        }
    }
}

/// [`Kind`]-specific configuration of a [`Filter`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", content = "config")]
pub enum Config {
    /// [`Kind::DateRange`] configuration.
    #[serde(rename = "BookingDateRangeFilter")]
    DateRange(DateRangeConfig),

    /// [`Kind::Keyword`] configuration.
    #[serde(rename = "KeywordFilter")]
    Keyword(KeywordConfig),

    /// [`Kind::Price`] configuration.
    #[serde(rename = "PriceFilter")]
    Price(PriceConfig),

    /// [`Kind::SelectSingle`] configuration.
    #[serde(rename = "SelectSingleFilter")]
    SelectSingle(SelectConfig),

    /// [`Kind::SelectMultiple`] configuration.
    #[serde(rename = "SelectMultipleFilter")]
    SelectMultiple(SelectConfig),
}

impl Config {
    /// Returns [`Kind`] this [`Config`] belongs to.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::DateRange(_) => Kind::DateRange,
            Self::Keyword(_) => Kind::Keyword,
            Self::Price(_) => Kind::Price,
            Self::SelectSingle(_) => Kind::SelectSingle,
            Self::SelectMultiple(_) => Kind::SelectMultiple,
        }
    }
}

/// [`Kind::DateRange`] configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DateRangeConfig {}

/// [`Kind::Keyword`] configuration.
///
/// Keyword search semantics are fixed by the search API.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeywordConfig {}

/// [`Kind::Price`] configuration.
///
/// Bounds are whole currency units, not subunits.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PriceConfig {
    /// Lowest selectable price.
    pub min: u64,

    /// Highest selectable price.
    pub max: u64,

    /// Step of the price slider.
    pub step: u64,
}

impl PriceConfig {
    /// Indicates whether the provided `price` lies within the bounds of
    /// this [`PriceConfig`].
    #[must_use]
    pub const fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// [`Kind::SelectSingle`] and [`Kind::SelectMultiple`] configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectConfig {
    /// [`SchemaType`] of the extended data attribute.
    pub schema_type: SchemaType,

    /// [`SearchMode`] for [`SchemaType::MultiEnum`] attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<SearchMode>,

    /// Selectable [`SelectOption`]s.
    pub options: Vec<SelectOption>,
}

impl SelectConfig {
    /// Returns the [`SelectOption`] with the provided `key`, if any.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.key == *key)
    }

    /// Returns the [`SearchMode`] the selected values are combined with.
    ///
    /// [`SchemaType::Enum`] attributes hold a single value, so the
    /// selected values are always `OR`-ed and no mode applies.
    #[must_use]
    pub const fn effective_search_mode(&self) -> Option<SearchMode> {
        match self.schema_type {
            SchemaType::Enum => None,
            SchemaType::MultiEnum => self.search_mode,
        }
    }
}

define_kind! {
    #[doc = "Schema type of an extended data attribute."]
    enum SchemaType {
        #[doc = "Single value; multiple selections are `OR`-ed."]
        Enum = "enum",

        #[doc = "Multiple values; selections combine per [`SearchMode`]."]
        MultiEnum = "multi-enum",
    }
}

define_kind! {
    #[doc = "Combination mode of values selected on a multi-enum attribute."]
    enum SearchMode {
        #[doc = "Listing must have all the selected values."]
        HasAll = "has_all",

        #[doc = "Listing must have any of the selected values."]
        HasAny = "has_any",
    }
}

/// Option of a select [`Filter`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectOption {
    /// [`OptionKey`] recognized by the search API.
    pub key: OptionKey,

    /// [`Label`] shown in the UI.
    pub label: Label,
}

/// Key of a [`SelectOption`], as stored in the listing's extended data.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq)]
#[derive(Deserialize, PartialOrd, Serialize)]
#[as_ref(forward)]
#[serde(into = "String", try_from = "String")]
pub struct OptionKey(String);

impl OptionKey {
    /// Creates a new [`OptionKey`] if the given `key` is valid.
    ///
    /// Keys can't contain whitespace or the `,` and `:` characters used as
    /// delimiters in query parameter values.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        Self::check(&key).then_some(Self(key))
    }

    /// Checks whether the given `key` is a valid [`OptionKey`].
    fn check(key: impl AsRef<str>) -> bool {
        let key = key.as_ref();
        !key.is_empty()
            && !key.contains(|c: char| c.is_whitespace() || c == ',' || c == ':')
    }

    /// Returns this [`OptionKey`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OptionKey {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `OptionKey`")
    }
}

impl TryFrom<String> for OptionKey {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `OptionKey`")
    }
}

impl PartialEq<str> for OptionKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{
        Config, Filter, Group, Kind, OptionKey, PriceConfig, QueryParamName,
        SchemaType, SearchMode, SelectConfig,
    };

    fn filter(json: &str) -> Filter {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_select_filter() {
        let f = filter(
            r#"{
                "id": "amenities",
                "label": "Amenities",
                "type": "SelectMultipleFilter",
                "group": "secondary",
                "queryParamNames": ["pub_amenities"],
                "config": {
                    "schemaType": "multi-enum",
                    "searchMode": "has_all",
                    "options": [
                        { "key": "towels", "label": "Towels" },
                        { "key": "swimming_pool", "label": "Swimming pool" }
                    ]
                }
            }"#,
        );

        assert_eq!(f.id.as_str(), "amenities");
        assert_eq!(f.group, Group::Secondary);
        assert_eq!(f.kind(), Kind::SelectMultiple);
        assert_eq!(f.query_param().unwrap().as_str(), "pub_amenities");

        let config = f.select_config().unwrap();
        assert_eq!(config.schema_type, SchemaType::MultiEnum);
        assert_eq!(config.effective_search_mode(), Some(SearchMode::HasAll));
        assert_eq!(config.option("towels").unwrap().label.as_str(), "Towels");
        assert!(config.option("barbeque").is_none());
    }

    #[test]
    fn deserializes_fixed_filters() {
        let price = filter(
            r#"{
                "id": "price",
                "label": "Price",
                "type": "PriceFilter",
                "group": "primary",
                "queryParamNames": ["price"],
                "config": { "min": 0, "max": 999999, "step": 3 }
            }"#,
        );
        assert_eq!(
            price.config,
            Config::Price(PriceConfig {
                min: 0,
                max: 999_999,
                step: 3,
            }),
        );

        let keyword = filter(
            r#"{
                "id": "keyword",
                "label": "Keyword",
                "type": "KeywordFilter",
                "group": "primary",
                "queryParamNames": ["keywords"],
                "config": {}
            }"#,
        );
        assert_eq!(keyword.kind(), Kind::Keyword);
        assert!(keyword.select_config().is_none());
    }

    #[test]
    fn serializes_with_wire_names() {
        let f = filter(
            r#"{
                "id": "category",
                "label": "Category",
                "type": "SelectSingleFilter",
                "group": "primary",
                "queryParamNames": ["pub_category"],
                "config": {
                    "schemaType": "enum",
                    "options": [{ "key": "figurines", "label": "Figurines" }]
                }
            }"#,
        );
        let json = serde_json::to_value(&f).unwrap();

        assert_eq!(json["type"], "SelectSingleFilter");
        assert_eq!(json["group"], "primary");
        assert_eq!(json["queryParamNames"][0], "pub_category");
        assert_eq!(json["config"]["schemaType"], "enum");
        assert!(json["config"].get("searchMode").is_none());
    }

    #[test]
    fn rejects_unknown_kinds_and_invalid_names() {
        assert!(serde_json::from_str::<Filter>(
            r#"{
                "id": "size",
                "label": "Size",
                "type": "SliderFilter",
                "group": "primary",
                "queryParamNames": ["pub_size"],
                "config": {}
            }"#,
        )
        .is_err());

        assert!(serde_json::from_str::<Filter>(
            r#"{
                "id": "size",
                "label": "Size",
                "type": "KeywordFilter",
                "group": "tertiary",
                "queryParamNames": ["keywords"],
                "config": {}
            }"#,
        )
        .is_err());

        assert!(QueryParamName::from_str("pub category").is_err());
        assert!(OptionKey::from_str("a,b").is_err());
        assert!(OptionKey::from_str("has_all:a").is_err());
        assert!(OptionKey::from_str("x-men").is_ok());
    }

    #[test]
    fn enum_schema_ignores_search_mode() {
        let config = SelectConfig {
            schema_type: SchemaType::Enum,
            search_mode: Some(SearchMode::HasAny),
            options: vec![],
        };

        assert_eq!(config.effective_search_mode(), None);
    }

    #[test]
    fn fixed_query_params() {
        assert_eq!(Kind::Price.fixed_query_param(), Some("price"));
        assert_eq!(Kind::Keyword.fixed_query_param(), Some("keywords"));
        assert_eq!(Kind::DateRange.fixed_query_param(), Some("dates"));
        assert_eq!(Kind::SelectSingle.fixed_query_param(), None);
        assert_eq!(Kind::SelectMultiple.fixed_query_param(), None);
    }
}
