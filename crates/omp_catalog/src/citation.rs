//! Citation composition.
//!
//! Builds the recommended-citation string for a monograph from its resolved
//! metadata. The clause order is fixed; clauses whose source data is absent
//! are omitted entirely rather than rendered empty.

use crate::contributor::{format_contributors, DEFAULT_MAX_CONTRIBUTORS};
use chrono::{Datelike, NaiveDate};
use omp_core::{Entity, Locale};

/// The resolved inputs of one citation.
///
/// Contributor slices borrow the request-scoped entities; authors and
/// editors decide the attribution shape (see [`Citation::format`]),
/// translators are additive.
#[derive(Debug, Clone)]
pub struct Citation<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub authors: &'a [Entity],
    pub editors: &'a [Entity],
    pub translators: &'a [Entity],
    pub date_published: NaiveDate,
    pub date_first_published: Option<NaiveDate>,
    pub location: &'a str,
    pub press_name: &'a str,
    pub series_name: &'a str,
    pub series_position: &'a str,
    pub max_contributors: usize,
}

impl<'a> Citation<'a> {
    pub fn new(
        title: &'a str,
        date_published: NaiveDate,
        location: &'a str,
        press_name: &'a str,
    ) -> Self {
        Self {
            title,
            subtitle: "",
            authors: &[],
            editors: &[],
            translators: &[],
            date_published,
            date_first_published: None,
            location,
            press_name,
            series_name: "",
            series_position: "",
            max_contributors: DEFAULT_MAX_CONTRIBUTORS,
        }
    }

    pub fn subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn authors(mut self, authors: &'a [Entity]) -> Self {
        self.authors = authors;
        self
    }

    pub fn editors(mut self, editors: &'a [Entity]) -> Self {
        self.editors = editors;
        self
    }

    pub fn translators(mut self, translators: &'a [Entity]) -> Self {
        self.translators = translators;
        self
    }

    pub fn first_published(mut self, date: NaiveDate) -> Self {
        self.date_first_published = Some(date);
        self
    }

    pub fn series(mut self, name: &'a str, position: &'a str) -> Self {
        self.series_name = name;
        self.series_position = position;
        self
    }

    pub fn max_contributors(mut self, max: usize) -> Self {
        self.max_contributors = max;
        self
    }

    /// Compose the citation string.
    ///
    /// Attribution shape: editors alone carry the "(Ed.)"/"(Eds.)" suffix
    /// (an edited collection); authors plus editors put the authors first
    /// and the editors into an "edited by …" clause after the title (a
    /// monograph with editors); otherwise the authors stand alone.
    /// Example output:
    /// `Doe, Jane: A Study, Berlin: Acme Press, 2020.`
    pub fn format(&self, locale: &Locale) -> String {
        let title = if self.subtitle.is_empty() {
            self.title.to_string()
        } else {
            format!("{}: {}", self.title, self.subtitle)
        };

        let year_first_published = match self.date_first_published {
            Some(first) if first.year() != self.date_published.year() => {
                format!(" ({})", first.year())
            }
            _ => String::new(),
        };

        let series = if !self.series_name.is_empty() && !self.series_position.is_empty() {
            format!(
                " ({}, {})",
                self.series_name,
                format_series_position(self.series_position, locale)
            )
        } else {
            String::new()
        };

        let (attribution, editors_attribution) = if !self.editors.is_empty()
            && self.authors.is_empty()
        {
            // edited collection
            let suffix = if self.editors.len() == 1 {
                &locale.terms.editor_abbrev
            } else {
                &locale.terms.editors_abbrev
            };
            (
                format!(
                    "{} {}",
                    format_contributors(self.editors, self.max_contributors, locale, true, true),
                    suffix
                ),
                String::new(),
            )
        } else if !self.editors.is_empty() {
            // monograph with editors
            (
                format_contributors(self.authors, self.max_contributors, locale, true, true),
                format!(
                    "{} {}, ",
                    locale.terms.edited_by,
                    format_contributors(
                        self.editors,
                        DEFAULT_MAX_CONTRIBUTORS,
                        locale,
                        false,
                        true
                    )
                ),
            )
        } else {
            (
                format_contributors(self.authors, self.max_contributors, locale, true, true),
                String::new(),
            )
        };

        let translators_attribution = if self.translators.is_empty() {
            String::new()
        } else {
            format!(
                ", {} {}",
                format_contributors(
                    self.translators,
                    DEFAULT_MAX_CONTRIBUTORS,
                    locale,
                    true,
                    true
                ),
                locale.terms.translators_abbrev
            )
        };

        format!(
            "{attribution}{translators_attribution}: {title}, {editors_attribution}{location}: \
             {press_name}, {year_published}{year_first_published}{series}.",
            location = self.location,
            press_name = self.press_name,
            year_published = self.date_published.year(),
        )
    }
}

/// Format a series position for display.
///
/// Numeric positions gain the localized volume label ("Vol. 12"); textual
/// positions have their prefix translated and the remainder carried over
/// ("Beiheft 3" → "Supplement 3").
pub fn format_series_position(position: &str, locale: &Locale) -> String {
    if position.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return format!("{} {}", locale.terms.volume_abbrev, position);
    }
    match position.split_once(' ') {
        Some((prefix, rest)) => format!("{} {}", locale.series_label(prefix), rest),
        None => locale.series_label(position).to_string(),
    }
}

/// Compose a chapter citation from the volume citation, with the volume's
/// terminal period dropped and an optional page clause appended.
pub fn format_chapter_citation(volume_citation: &str, chapter: &Entity, locale: &Locale) -> String {
    let attribution = format_contributors(
        chapter.many("authors"),
        DEFAULT_MAX_CONTRIBUTORS,
        locale,
        true,
        true,
    );
    let title = chapter.settings.localized("title", &locale.tag);
    let pages = chapter.settings.localized("pages", &locale.tag);
    let volume = volume_citation
        .strip_suffix('.')
        .unwrap_or(volume_citation);
    let pages_clause = if pages.is_empty() {
        String::new()
    } else {
        format!(", {} {}", locale.terms.pages_abbrev, pages)
    };
    format!("{attribution}: {title}, in: {volume}{pages_clause}.")
}

/// Expand a DOI like `10.1234/abc123` into its resolver URL.
pub fn doi_url(doi: &str) -> String {
    format!("https://doi.org/{doi}")
}
