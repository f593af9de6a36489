//! Locale definitions for catalog formatting.
//!
//! The original implementation switched the process-global `LC_TIME` locale
//! around every `strftime` call and restored it afterwards. Here the locale
//! is an explicit value passed into each formatting call: the terms, month
//! names and the day-precision date pattern travel together, and no global
//! state is touched.

use std::collections::HashMap;

/// A list of month names (12 elements for Jan-Dec).
pub type MonthList = Vec<String>;

/// Language-specific terms used in citations and publication-date phrases.
///
/// The phrase templates contain a `{date}` placeholder that is substituted
/// with the formatted date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terms {
    /// Conjunction between the last two contributor names ("and").
    pub and: String,
    /// Suffix for a single editor ("(Ed.)").
    pub editor_abbrev: String,
    /// Suffix for several editors ("(Eds.)").
    pub editors_abbrev: String,
    /// Suffix for translators ("(Transl.)").
    pub translators_abbrev: String,
    /// Lead-in for the editors of an authored monograph ("edited by").
    pub edited_by: String,
    /// Label for numeric series positions ("Vol.").
    pub volume_abbrev: String,
    /// Page abbreviation in chapter citations ("p.").
    pub pages_abbrev: String,
    /// Phrase for a past publication date ("Published {date}.").
    pub published: String,
    /// Phrase for a future publication date ("To be published {date}.").
    pub forthcoming: String,
}

/// A locale: the OMP locale tag it serves, its terms, month names, the
/// day-precision date pattern and translations for textual series-position
/// prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    /// The OMP locale tag (e.g. "en_US", "de_DE"), also used as the key for
    /// settings lookups.
    pub tag: String,
    pub terms: Terms,
    /// Long month names, January first.
    pub months: MonthList,
    /// strftime-style pattern for day-precision dates, standing in for the
    /// C library's locale-dependent `%x`.
    pub date_pattern: String,
    /// Translations for textual series-position prefixes ("Beiheft").
    pub series_labels: HashMap<String, String>,
    /// Labels for ONIX date-role codes ("01" → "Publication date").
    pub date_roles: HashMap<String, String>,
}

fn role_table(labels: &[(&str, &str)]) -> HashMap<String, String> {
    labels
        .iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}

impl Locale {
    /// English (US) locale.
    pub fn en_us() -> Self {
        let mut series_labels = HashMap::new();
        series_labels.insert("Beiheft".into(), "Supplement".into());

        Self {
            tag: "en_US".into(),
            terms: Terms {
                and: "and".into(),
                editor_abbrev: "(Ed.)".into(),
                editors_abbrev: "(Eds.)".into(),
                translators_abbrev: "(Transl.)".into(),
                edited_by: "edited by".into(),
                volume_abbrev: "Vol.".into(),
                pages_abbrev: "p.".into(),
                published: "Published {date}.".into(),
                forthcoming: "To be published {date}.".into(),
            },
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from)
            .to_vec(),
            date_pattern: "%m/%d/%Y".into(),
            series_labels,
            date_roles: role_table(&[
                ("01", "Publication date"),
                ("02", "Embargo date"),
                ("09", "Public announcement date"),
                ("10", "Trade announcement date"),
                ("11", "Date of first publication"),
                ("12", "Last reprint date"),
                ("13", "Out-of-print / deletion date"),
                ("16", "Last reissue date"),
                ("19", "Publication date of print counterpart"),
                ("20", "Date of first publication in original language"),
                ("21", "Forthcoming reissue date"),
                ("22", "Expected availability date after temporary withdrawal"),
                ("23", "Review embargo date"),
                ("25", "Publisher's reservation order deadline"),
                ("26", "Forthcoming reprint date"),
                ("27", "Preorder embargo date"),
            ]),
        }
    }

    /// German locale.
    pub fn de_de() -> Self {
        Self {
            tag: "de_DE".into(),
            terms: Terms {
                and: "und".into(),
                editor_abbrev: "(Hrsg.)".into(),
                editors_abbrev: "(Hrsg.)".into(),
                translators_abbrev: "(Übers.)".into(),
                edited_by: "herausgegeben von".into(),
                volume_abbrev: "Bd.".into(),
                pages_abbrev: "S.".into(),
                published: "Erschienen {date}.".into(),
                forthcoming: "Erscheint {date}.".into(),
            },
            months: [
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ]
            .map(String::from)
            .to_vec(),
            date_pattern: "%d.%m.%Y".into(),
            series_labels: HashMap::new(),
            date_roles: role_table(&[
                ("01", "Erscheinungsdatum"),
                ("02", "Sperrfrist"),
                ("09", "Datum der öffentlichen Ankündigung"),
                ("10", "Datum der Handelsankündigung"),
                ("11", "Datum der Erstveröffentlichung"),
                ("12", "Datum des letzten Nachdrucks"),
                ("13", "Vergriffen-/Löschdatum"),
                ("16", "Datum der letzten Neuauflage"),
                ("19", "Erscheinungsdatum der Druckausgabe"),
                ("20", "Datum der Erstveröffentlichung in der Originalsprache"),
                ("21", "Datum der kommenden Neuauflage"),
                ("22", "Voraussichtliche Verfügbarkeit nach vorübergehender Rücknahme"),
                ("23", "Sperrfrist für Rezensionen"),
                ("25", "Bestellschluss des Verlags"),
                ("26", "Datum des kommenden Nachdrucks"),
                ("27", "Sperrfrist für Vorbestellungen"),
            ]),
        }
    }

    /// Resolve a locale from an OMP tag or bare language code. Unknown tags
    /// fall back to en_US.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['_', '-']).next().unwrap_or(tag);
        match language {
            "de" => Self::de_de(),
            _ => Self::en_us(),
        }
    }

    /// Long name for a 1-based month number; empty for out-of-range values.
    pub fn month_name(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Translate a textual series-position prefix, falling through to the
    /// untranslated prefix.
    pub fn series_label<'a>(&'a self, prefix: &'a str) -> &'a str {
        self.series_labels
            .get(prefix)
            .map(String::as_str)
            .unwrap_or(prefix)
    }

    /// Label for an ONIX date-role code; `None` for codes outside the
    /// catalog's role table.
    pub fn date_role(&self, code: &str) -> Option<&str> {
        self.date_roles.get(code).map(String::as_str)
    }

    /// Fill the published/forthcoming phrase template with a date string.
    pub fn published_phrase(&self, date_str: &str, forthcoming: bool) -> String {
        let template = if forthcoming {
            &self.terms.forthcoming
        } else {
            &self.terms.published
        };
        template.replace("{date}", date_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_resolves_language() {
        assert_eq!(Locale::from_tag("de_DE").tag, "de_DE");
        assert_eq!(Locale::from_tag("de").tag, "de_DE");
        assert_eq!(Locale::from_tag("en_US").tag, "en_US");
        assert_eq!(Locale::from_tag("fr_FR").tag, "en_US");
    }

    #[test]
    fn month_name_bounds() {
        let locale = Locale::en_us();
        assert_eq!(locale.month_name(1), "January");
        assert_eq!(locale.month_name(12), "December");
        assert_eq!(locale.month_name(0), "");
        assert_eq!(locale.month_name(13), "");
    }

    #[test]
    fn series_label_falls_through() {
        let locale = Locale::en_us();
        assert_eq!(locale.series_label("Beiheft"), "Supplement");
        assert_eq!(locale.series_label("Sonderband"), "Sonderband");
    }

    #[test]
    fn date_role_lookup_is_localized() {
        assert_eq!(Locale::en_us().date_role("01"), Some("Publication date"));
        assert_eq!(Locale::de_de().date_role("01"), Some("Erscheinungsdatum"));
        assert_eq!(Locale::en_us().date_role("99"), None);
    }

    #[test]
    fn published_phrase_substitutes_date() {
        let locale = Locale::en_us();
        assert_eq!(
            locale.published_phrase("06/15/2023", false),
            "Published 06/15/2023."
        );
        assert_eq!(
            locale.published_phrase("2030", true),
            "To be published 2030."
        );
    }
}
