//! Search request read model definitions.

use std::{borrow::Cow, fmt, str::FromStr, string::FromUtf8Error};

use common::DateRange;
use derive_more::{Display, Error};
use serde::{Serialize, Serializer};

use tracing as log;

use crate::domain::{filter, sort};

/// Search state selected by a user: what each filter narrows results to and
/// how the results are ordered.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Request {
    /// [`Selection`]s of filters, keyed by their [`filter::Id`]s.
    pub selections: Vec<(filter::Id, Selection)>,

    /// [`sort::Key`] to order the results by, if any.
    pub sort: Option<sort::Key>,
}

impl Request {
    /// Returns the [`Selection`] of the filter with the provided `id`, if
    /// any.
    #[must_use]
    pub fn selection(&self, id: &str) -> Option<&Selection> {
        self.selections
            .iter()
            .find_map(|(f, s)| (*f == *id).then_some(s))
    }
}

/// Value selected on a single filter.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    /// Booking dates.
    Dates(DateRange),

    /// Full-text search terms.
    Keywords(String),

    /// Price range.
    Price(PriceRange),

    /// Keys of the selected options.
    Options(Vec<filter::OptionKey>),
}

impl Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dates(range) => write!(f, "dates {range}"),
            Self::Keywords(text) => write!(f, "keywords \"{text}\""),
            Self::Price(range) => write!(f, "price {range}"),
            Self::Options(keys) => {
                f.write_str("options ")?;
                for (n, key) in keys.iter().enumerate() {
                    if n > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}")?;
                }
                Ok(())
            }
        }
    }
}

/// Inclusive price range in whole currency units.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PriceRange {
    /// Lowest price.
    min: u64,

    /// Highest price.
    max: u64,
}

impl PriceRange {
    /// Creates a new [`PriceRange`] if `min` doesn't exceed `max`.
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Option<Self> {
        if min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Returns the lowest price of this [`PriceRange`].
    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    /// Returns the highest price of this [`PriceRange`].
    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) =
            s.split_once(',').ok_or("price range must be `min,max`")?;
        let min = min.trim().parse().map_err(|_| "invalid lowest price")?;
        let max = max.trim().parse().map_err(|_| "invalid highest price")?;
        Self::new(min, max).ok_or("lowest price exceeds the highest one")
    }
}

impl Serialize for PriceRange {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Query parameters of a search API request, in the order they're sent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(Vec<(filter::QueryParamName, String)>);

impl Params {
    /// Appends a parameter with the provided `name` and `value`.
    pub fn push(&mut self, name: filter::QueryParamName, value: String) {
        self.0.push((name, value));
    }

    /// Returns the value of the first parameter with the provided `name`,
    /// if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(n, v)| (*n == *name).then_some(v.as_str()))
    }

    /// Iterates over the `(name, value)` pairs of these [`Params`].
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(filter::QueryParamName, String)> for Params {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (filter::QueryParamName, String)>,
    {
        Self(iter.into_iter().collect())
    }
}

/// Formats these [`Params`] as a URL query string (without the leading
/// `?`).
///
/// Values are percent-encoded, except for the `,` and `:` delimiters of
/// multi-value parameters.
impl Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (name, value)) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}=", urlencoding::encode(name.as_str()))?;
            for piece in value.split_inclusive(is_delimiter) {
                let body = piece.strip_suffix(is_delimiter).unwrap_or(piece);
                f.write_str(&urlencoding::encode(body))?;
                f.write_str(&piece[body.len()..])?;
            }
        }
        Ok(())
    }
}

/// Parses [`Params`] out of a URL query string (with or without the leading
/// `?`).
///
/// Parameters whose names can't be sent to the search API (like
/// `utm.source` or `filter[x]`) are skipped, as they can't belong to any
/// filter.
impl FromStr for Params {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut params = Self::default();
        for pair in s.strip_prefix('?').unwrap_or(s).split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode(name)?;
            let Some(name) = filter::QueryParamName::new(name.as_ref()) else {
                log::debug!("skipping `{name}` query parameter");
                continue;
            };
            params.push(name, decode(value)?.into_owned());
        }
        Ok(params)
    }
}

/// Indicates whether the provided character delimits values of a
/// multi-value parameter.
fn is_delimiter(c: char) -> bool {
    c == ',' || c == ':'
}

/// Decodes a form-urlencoded query string component.
fn decode(component: &str) -> Result<Cow<'_, str>, ParseError> {
    if component.contains('+') {
        urlencoding::decode(&component.replace('+', " "))
            .map(|s| Cow::Owned(s.into_owned()))
            .map_err(ParseError::Encoding)
    } else {
        urlencoding::decode(component).map_err(ParseError::Encoding)
    }
}

/// Error of parsing [`Params`] from a URL query string.
#[derive(Clone, Debug, Display, Error)]
pub enum ParseError {
    /// Percent-encoded bytes don't form a valid UTF-8 string.
    #[display("query string is not valid UTF-8: {_0}")]
    Encoding(FromUtf8Error),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Params, ParseError, PriceRange};

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|&(n, v)| (n.parse().unwrap(), v.to_owned()))
            .collect()
    }

    #[test]
    fn price_range() {
        let range = PriceRange::from_str("100,500").unwrap();
        assert_eq!((range.min(), range.max()), (100, 500));
        assert_eq!(range.to_string(), "100,500");
        assert_eq!(PriceRange::from_str(" 7 , 7 ").unwrap().to_string(), "7,7");

        assert!(PriceRange::new(500, 100).is_none());
        assert!(PriceRange::from_str("500,100").is_err());
        assert!(PriceRange::from_str("100").is_err());
        assert!(PriceRange::from_str("-1,5").is_err());
    }

    #[test]
    fn formats_query_string() {
        let p = params(&[
            ("pub_category", "figurines,t-shirts"),
            ("pub_amenities", "has_all:towels,swimming_pool"),
            ("keywords", "star wars & co"),
            ("price", "100,500"),
        ]);

        assert_eq!(
            p.to_string(),
            "pub_category=figurines,t-shirts\
             &pub_amenities=has_all:towels,swimming_pool\
             &keywords=star%20wars%20%26%20co\
             &price=100,500",
        );
        assert_eq!(Params::default().to_string(), "");
    }

    #[test]
    fn parses_query_string() {
        let p = Params::from_str(
            "?keywords=star+wars%20%26%20co&price=100%2C500&&bounds=&sort=-price",
        )
        .unwrap();

        assert_eq!(p.len(), 4);
        assert_eq!(p.get("keywords"), Some("star wars & co"));
        assert_eq!(p.get("price"), Some("100,500"));
        assert_eq!(p.get("bounds"), Some(""));
        assert_eq!(p.get("sort"), Some("-price"));
        assert_eq!(p.get("dates"), None);

        assert!(Params::from_str("").unwrap().is_empty());
        assert!(matches!(
            Params::from_str("keywords=%FF"),
            Err(ParseError::Encoding(_)),
        ));
    }

    #[test]
    fn skips_foreign_params() {
        let p = Params::from_str(
            "price=100,500&utm.source=mail&filter[x]=1&pub%20category=x",
        )
        .unwrap();

        assert_eq!(p, params(&[("price", "100,500")]));
    }

    #[test]
    fn query_string_round_trip() {
        let p = params(&[
            ("keywords", "naïve, 100% \"real\""),
            ("pub_anime", "re_zero,steins_gate"),
        ]);

        assert_eq!(Params::from_str(&p.to_string()).unwrap(), p);
    }
}
