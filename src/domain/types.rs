//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! calendar days without a time component) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided date is not a valid `YYYY-MM-DD` calendar day.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Provided month is outside `1..=12` or the year is out of range.
    #[error("invalid month: {0}")]
    InvalidMonth(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| TypeConstraintError::InvalidValue(s.to_string()))?;
                Self::new(value)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(CreativeTemplateId, "Unique identifier for a creative template.");
id_newtype!(ProposalId, "Unique identifier for a sales proposal.");
id_newtype!(WorkEntryId, "Unique identifier for a stored work entry.");

/// A calendar day with no time component.
///
/// The canonical string form (`YYYY-MM-DD`) is the key of the work entry
/// store. Parsing only looks at the date components, so a value such as
/// `2025-03-05T23:30:00-05:00` still resolves to the 5th.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Builds a key from explicit year, month and day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, TypeConstraintError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| TypeConstraintError::InvalidDate(format!("{year}-{month}-{day}")))
    }

    /// Parses the leading `YYYY-MM-DD` components of a raw date string.
    pub fn parse(raw: &str) -> Result<Self, TypeConstraintError> {
        let trimmed = raw.trim();
        let head = trimmed
            .get(..10)
            .ok_or_else(|| TypeConstraintError::InvalidDate(raw.to_string()))?;
        NaiveDate::parse_from_str(head, Self::FORMAT)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidDate(raw.to_string()))
    }

    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The month this day belongs to.
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<DayKey> for NaiveDate {
    fn from(value: DayKey) -> Self {
        value.0
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A single calendar month.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, TypeConstraintError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(TypeConstraintError::InvalidMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns `true` when the day falls inside this month.
    pub fn contains(self, day: DayKey) -> bool {
        day.date().year() == self.year && day.date().month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A JSON scalar that upstream storage may send either as a number or as text.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LooseScalar {
    Number(serde_json::Number),
    Text(String),
}

impl LooseScalar {
    /// Reads the scalar as an integer, rejecting fractions and non-numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LooseScalar::Number(n) => n.as_i64(),
            LooseScalar::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

/// Parses an item quantity once at the ingestion boundary.
///
/// A missing quantity means a single unit. Anything that is not a
/// non-negative integer counts as zero.
pub fn parse_quantity(raw: Option<&LooseScalar>) -> u32 {
    match raw {
        None => 1,
        Some(value) => value
            .as_i64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
    }
}

/// Deserializes an optional identifier sent as a number, a numeric string or `null`.
pub fn deserialize_loose_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i32>,
{
    let raw = Option::<LooseScalar>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(LooseScalar::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .and_then(|n| T::try_from(n).ok()))
}
