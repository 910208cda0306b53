//! Calendar date utilities.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use time::macros::format_description;

/// Expands into the [ISO 8601] calendar date format (`YYYY-MM-DD`).
///
/// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
macro_rules! iso_date {
    () => {
        format_description!("[year]-[month]-[day]")
    };
}

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(iso_date!()).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, iso_date!())
            .map(Self)
            .map_err(ParseError::Date)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Range of [`Date`]s where the `end` is strictly after the `start`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    /// First [`Date`] of this [`DateRange`].
    start: Date,

    /// [`Date`] this [`DateRange`] ends on (exclusive).
    end: Date,
}

impl DateRange {
    /// Creates a new [`DateRange`] if `end` is strictly after `start`.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Returns the first [`Date`] of this [`DateRange`].
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the (exclusive) last [`Date`] of this [`DateRange`].
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

impl FromStr for DateRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(',').ok_or(ParseError::Format)?;
        Self::new(start.trim().parse()?, end.trim().parse()?)
            .ok_or(ParseError::Inverted)
    }
}

/// Error of parsing a [`Date`] or a [`DateRange`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse a [`Date`] in `YYYY-MM-DD` format.
    #[display("invalid date: {_0}")]
    Date(time::error::Parse),

    /// [`DateRange`] is not formatted as `start,end`.
    #[display("date range must be formatted as `start,end`")]
    Format,

    /// [`DateRange`] doesn't end after it starts.
    #[display("date range must end after it starts")]
    Inverted,
}

mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Date, DateRange};

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_str(&raw).map_err(D::Error::custom)
        }
    }

    impl Serialize for DateRange {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for DateRange {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_str(&raw).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Date, DateRange, ParseError};

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_calendar(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(Date::from_str("2024-02-29").unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 5).to_string(), "2024-01-05");

        assert!(Date::from_str("2023-02-29").is_err());
        assert!(Date::from_str("05.01.2024").is_err());
        assert!(Date::from_calendar(2024, 13, 1).is_none());
    }

    #[test]
    fn parses_ranges() {
        let range = DateRange::from_str("2024-01-05,2024-01-09").unwrap();
        assert_eq!(range.start(), date(2024, 1, 5));
        assert_eq!(range.end(), date(2024, 1, 9));
        assert_eq!(range.to_string(), "2024-01-05,2024-01-09");

        assert!(matches!(
            DateRange::from_str("2024-01-05"),
            Err(ParseError::Format),
        ));
        assert!(matches!(
            DateRange::from_str("2024-01-09,2024-01-05"),
            Err(ParseError::Inverted),
        ));
        assert!(matches!(
            DateRange::from_str("2024-01-05,2024-01-05"),
            Err(ParseError::Inverted),
        ));
    }
}
