use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category of an incident report.
///
/// The set is open: categories other than the three built-in ones survive a
/// load/save cycle verbatim as [`ReportKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum ReportKind {
    /// No water comes out.
    #[default]
    Outage,
    /// Hygiene problem around the water point.
    Cleanliness,
    /// Anything else.
    Other,
    /// A category this version has no name for.
    Custom(String),
}

impl ReportKind {
    /// Wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Outage => "outage",
            Self::Cleanliness => "cleanliness",
            Self::Other => "other",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ReportKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "outage" => Self::Outage,
            "cleanliness" => Self::Cleanliness,
            "other" => Self::Other,
            _ => Self::Custom(value),
        }
    }
}

impl From<ReportKind> for String {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Custom(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for ReportKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.trim().to_ascii_lowercase()))
    }
}

/// A report as submitted, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    /// Category.
    pub kind: ReportKind,
    /// What the reporter saw.
    pub description: String,
}

impl NewReport {
    /// Stamp the report with the time the store accepted it.
    #[must_use]
    pub fn into_report(self, date: DateTime<Utc>) -> Report {
        Report {
            kind: self.kind,
            description: self.description,
            date,
        }
    }
}

/// An incident report attached to a water point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    /// Category, stored under `type`.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: ReportKind,
    /// What the reporter saw.
    pub description: String,
    /// When the store accepted the report.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp"))]
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("outage", ReportKind::Outage)]
    #[case("Cleanliness", ReportKind::Cleanliness)]
    #[case("other", ReportKind::Other)]
    #[case("vandalism", ReportKind::Custom("vandalism".to_owned()))]
    fn parses_report_kinds(#[case] text: &str, #[case] expected: ReportKind) {
        assert_eq!(text.parse::<ReportKind>(), Ok(expected));
    }

    #[rstest]
    fn custom_kind_keeps_its_name() {
        let kind = ReportKind::from("vandalism".to_owned());
        assert_eq!(String::from(kind), "vandalism");
    }
}
