//! CSL-JSON export.
//!
//! Maps a resolved submission onto a Citation Style Language JSON book
//! record, suitable for feeding a citeproc implementation.
//!
//! See: <https://github.com/citation-style-language/schema#csl-json-schema>

use chrono::{Datelike, NaiveDate};
use omp_core::{Entity, Locale, Settings};
use serde::Serialize;

/// A CSL date: either structured `date-parts` or a raw string for dates the
/// host could not parse. The issued value being anything else is
/// unrepresentable; constructing it from a [`NaiveDate`] or a string is the
/// whole input contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CslDate {
    DateParts {
        #[serde(rename = "date-parts")]
        date_parts: Vec<Vec<i32>>,
    },
    Raw { raw: String },
}

impl CslDate {
    pub fn year_only(year: i32) -> Self {
        CslDate::DateParts {
            date_parts: vec![vec![year]],
        }
    }

    /// The year of the first date-parts entry, if structured.
    fn year(&self) -> Option<i32> {
        match self {
            CslDate::DateParts { date_parts } => {
                date_parts.first().and_then(|parts| parts.first()).copied()
            }
            CslDate::Raw { .. } => None,
        }
    }
}

impl From<NaiveDate> for CslDate {
    fn from(date: NaiveDate) -> Self {
        CslDate::DateParts {
            date_parts: vec![vec![date.year(), date.month() as i32, date.day() as i32]],
        }
    }
}

impl From<String> for CslDate {
    fn from(raw: String) -> Self {
        CslDate::Raw { raw }
    }
}

impl From<&str> for CslDate {
    fn from(raw: &str) -> Self {
        CslDate::Raw {
            raw: raw.to_string(),
        }
    }
}

/// A CSL name with family/given parts and an optional suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CslName {
    pub family: String,
    pub given: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Build a CSL name from a contributor entity's localized settings.
pub fn csl_name(contributor: &Entity, locale: &Locale) -> CslName {
    let settings = &contributor.settings;
    let suffix = settings.localized("suffix", &locale.tag);
    CslName {
        family: settings.localized("familyName", &locale.tag).to_string(),
        given: settings.localized("givenName", &locale.tag).to_string(),
        suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
    }
}

/// A CSL-JSON book record. Optional fields are skipped when absent, never
/// serialized empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CslRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub title: String,
    #[serde(rename = "publisher-place")]
    pub publisher_place: String,
    pub publisher: String,
    pub issued: CslDate,
    pub author: Vec<CslName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Vec<CslName>>,
    #[serde(rename = "collection-title", skip_serializing_if = "Option::is_none")]
    pub collection_title: Option<String>,
    #[serde(rename = "collection-number", skip_serializing_if = "Option::is_none")]
    pub collection_number: Option<String>,
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "original-date", skip_serializing_if = "Option::is_none")]
    pub original_date: Option<CslDate>,
}

/// Join non-empty parts with a single space; OMP title prefixes are often
/// absent and must not leave a stray leading space.
fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a resolved submission onto a CSL-JSON book record.
///
/// The subtitle is folded into `title` (CSL-JSON defines no subtitle field);
/// the series becomes `collection-title`/`collection-number`; a first
/// publication date whose year differs from the issued year becomes
/// `original-date`.
#[allow(clippy::too_many_arguments)]
pub fn build_csl_data(
    submission: &Entity,
    authors: &[Entity],
    editors: &[Entity],
    issued: CslDate,
    doi: Option<&str>,
    press_settings: &Settings,
    locale: &Locale,
    series: Option<&Entity>,
    date_first_published: Option<NaiveDate>,
) -> CslRecord {
    let tag = &locale.tag;
    let submission_settings = &submission.settings;

    let mut title = join_nonempty(&[
        submission_settings.localized("prefix", tag),
        submission_settings.localized("title", tag),
    ]);
    let subtitle = submission_settings.localized("subtitle", tag);
    if !subtitle.is_empty() {
        title = format!("{title}: {subtitle}");
    }

    let collection_title = series.map(|series| {
        let mut collection = join_nonempty(&[
            series.settings.localized("prefix", tag),
            series.settings.localized("title", tag),
        ]);
        let series_subtitle = series.settings.localized("subtitle", tag);
        if !series_subtitle.is_empty() {
            collection = format!("{collection} – {series_subtitle}");
        }
        collection
    });

    let collection_number = submission
        .attr_str("series_position")
        .filter(|position| !position.is_empty())
        .map(str::to_string);

    let original_date = date_first_published
        .filter(|first| issued.year() != Some(first.year()))
        .map(|first| CslDate::year_only(first.year()));

    CslRecord {
        id: submission.attr_i64("submission_id").unwrap_or_default(),
        record_type: "book",
        title,
        publisher_place: press_settings.localized("location", tag).to_string(),
        publisher: press_settings.localized("publisher", tag).to_string(),
        issued,
        author: authors.iter().map(|a| csl_name(a, locale)).collect(),
        editor: (!editors.is_empty())
            .then(|| editors.iter().map(|e| csl_name(e, locale)).collect()),
        collection_title,
        collection_number,
        doi: doi.filter(|d| !d.is_empty()).map(str::to_string),
        original_date,
    }
}
