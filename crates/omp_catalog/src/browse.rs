//! Catalog browsing: filtering, sorting and pagination of submission
//! collections.
//!
//! Stateless across requests: a [`Browser`] is built per request from the
//! query parameters and applied to an already-resolved submission
//! collection.

use crate::error::{CatalogError, Result};
use crate::onix::{decode_date, DateRow, PubDate};
use chrono::NaiveDateTime;
use omp_core::{Entity, Locale};
use regex::Regex;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

/// Textual series-position prefixes that sort before numeric entries.
const SUPPLEMENT_PREFIXES: &[&str] = &["beiheft", "supplement"];

/// The fixed sort preset enumeration. Unrecognized preset names are
/// rejected, never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Category,
    DatePublishedAscending,
    DatePublishedDescending,
    Author,
    TitleAscending,
    TitleDescending,
    SeriesPositionAscending,
    SeriesPositionDescending,
}

impl SortKey {
    pub const PRESETS: &'static [&'static str] = &[
        "category",
        "datePublished-ascending",
        "datePublished-descending",
        "author",
        "title-ascending",
        "title-descending",
        "seriesPosition-ascending",
        "seriesPosition-descending",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Category => "category",
            SortKey::DatePublishedAscending => "datePublished-ascending",
            SortKey::DatePublishedDescending => "datePublished-descending",
            SortKey::Author => "author",
            SortKey::TitleAscending => "title-ascending",
            SortKey::TitleDescending => "title-descending",
            SortKey::SeriesPositionAscending => "seriesPosition-ascending",
            SortKey::SeriesPositionDescending => "seriesPosition-descending",
        }
    }

    fn descending(self) -> bool {
        matches!(
            self,
            SortKey::DatePublishedDescending
                | SortKey::TitleDescending
                | SortKey::SeriesPositionDescending
        )
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "category" => Ok(SortKey::Category),
            "datePublished-ascending" => Ok(SortKey::DatePublishedAscending),
            "datePublished-descending" => Ok(SortKey::DatePublishedDescending),
            "author" => Ok(SortKey::Author),
            "title-ascending" => Ok(SortKey::TitleAscending),
            "title-descending" => Ok(SortKey::TitleDescending),
            "seriesPosition-ascending" => Ok(SortKey::SeriesPositionAscending),
            "seriesPosition-descending" => Ok(SortKey::SeriesPositionDescending),
            _ => Err(CatalogError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Keep submissions whose category's localized title equals `value`
/// (case-sensitive). Submissions without a category are dropped while a
/// filter is active.
pub fn filter_by_category<'b, 'c>(
    submissions: impl Iterator<Item = &'b Entity> + 'c,
    value: &'c str,
    locale: &'c Locale,
) -> impl Iterator<Item = &'b Entity> + 'c
where
    'b: 'c,
{
    submissions.filter(move |submission| {
        submission
            .one("category")
            .is_some_and(|category| category.settings.localized("title", &locale.tag) == value)
    })
}

/// Ordering key for series positions.
///
/// Supplement-prefixed positions sort first; the remaining positions compare
/// by their digit runs as integer tuples ("1.5" before "2" before "10");
/// positions without digits compare by raw string after all numeric ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPositionKey {
    supplement: bool,
    digits: Vec<u64>,
    raw: String,
}

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[0-9]+").unwrap())
}

impl SeriesPositionKey {
    pub fn parse(position: &str) -> Self {
        let trimmed = position.trim();
        let lowered = trimmed.to_lowercase();
        let supplement = SUPPLEMENT_PREFIXES
            .iter()
            .any(|prefix| lowered.starts_with(prefix));
        let digits = digit_runs()
            .find_iter(trimmed)
            // leading zeros make very long runs unparseable as u64 only past
            // 20 digits; positions are short labels, saturate instead of drop
            .map(|run| run.as_str().parse().unwrap_or(u64::MAX))
            .collect();
        Self {
            supplement,
            digits,
            raw: trimmed.to_string(),
        }
    }
}

impl Ord for SeriesPositionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // supplements first, then digit-bearing entries, then digit tuples,
        // raw string as the final tiebreaker
        (!self.supplement)
            .cmp(&!other.supplement)
            .then(self.digits.is_empty().cmp(&other.digits.is_empty()))
            .then_with(|| self.digits.cmp(&other.digits))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for SeriesPositionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum decoded publication date of a submission; submissions without any
/// decodable date get the minimal sentinel and sort first.
fn min_publication_date(submission: &Entity) -> NaiveDateTime {
    submission
        .many("publication_dates")
        .iter()
        .filter_map(DateRow::from_entity)
        .filter_map(|row| match decode_date(&row) {
            Ok(PubDate::Resolved(date)) => Some(date),
            _ => None,
        })
        .min()
        .unwrap_or(NaiveDateTime::MIN)
}

fn category_key(submission: &Entity, locale: &Locale) -> String {
    submission
        .one("category")
        .map(|category| category.settings.localized("title", &locale.tag).to_string())
        .unwrap_or_default()
}

/// Lowercased family name of the first contributor, with author → editor →
/// chapter-author priority and a given-name fallback.
fn author_key(submission: &Entity, locale: &Locale) -> String {
    for relation in ["authors", "editors", "chapter_authors"] {
        if let Some(first) = submission.many(relation).first() {
            let family = first.settings.localized("familyName", &locale.tag).trim();
            let name = if family.is_empty() {
                first.settings.localized("givenName", &locale.tag).trim()
            } else {
                family
            };
            return name.to_lowercase();
        }
    }
    String::new()
}

fn title_key(submission: &Entity, locale: &Locale) -> String {
    submission
        .settings
        .localized("title", &locale.tag)
        .to_lowercase()
}

fn series_position_key(submission: &Entity) -> SeriesPositionKey {
    SeriesPositionKey::parse(submission.attr_str("series_position").unwrap_or(""))
}

/// Zero-based pagination; out-of-range pages and a zero page size yield an
/// empty slice, never an error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Total page count by integer ceiling.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total / page_size + usize::from(total % page_size != 0)
}

/// Request-scoped browse configuration: page, page size, sort preset and an
/// optional category filter.
#[derive(Debug, Clone)]
pub struct Browser<'a> {
    locale: &'a Locale,
    page: usize,
    page_size: usize,
    sort: SortKey,
    category: Option<String>,
}

impl<'a> Browser<'a> {
    pub fn new(locale: &'a Locale, page: usize, page_size: usize, sort: SortKey) -> Self {
        Self {
            locale,
            page,
            page_size,
            sort,
            category: None,
        }
    }

    pub fn with_category_filter(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Filter, sort and paginate a submission collection.
    pub fn process<'b>(&self, submissions: &'b [Entity]) -> Vec<&'b Entity> {
        let mut selected: Vec<&Entity> = match &self.category {
            Some(value) => filter_by_category(submissions.iter(), value, self.locale).collect(),
            None => submissions.iter().collect(),
        };
        self.sort_submissions(&mut selected);
        paginate(&selected, self.page, self.page_size).to_vec()
    }

    fn sort_submissions(&self, submissions: &mut [&Entity]) {
        let locale = self.locale;
        match self.sort {
            SortKey::Category => {
                submissions.sort_by(|a, b| category_key(a, locale).cmp(&category_key(b, locale)));
            }
            SortKey::DatePublishedAscending | SortKey::DatePublishedDescending => {
                submissions
                    .sort_by(|a, b| self.directed(min_publication_date(a).cmp(&min_publication_date(b))));
            }
            SortKey::Author => {
                submissions.sort_by(|a, b| author_key(a, locale).cmp(&author_key(b, locale)));
            }
            SortKey::TitleAscending | SortKey::TitleDescending => {
                submissions
                    .sort_by(|a, b| self.directed(title_key(a, locale).cmp(&title_key(b, locale))));
            }
            SortKey::SeriesPositionAscending | SortKey::SeriesPositionDescending => {
                submissions.sort_by(|a, b| {
                    self.directed(series_position_key(a).cmp(&series_position_key(b)))
                });
            }
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        if self.sort.descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Total page count for a collection of `total` submissions.
    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omp_core::Settings;

    fn en() -> Locale {
        Locale::en_us()
    }

    fn titled(title: &str) -> Entity {
        Entity::new().with_settings(Settings::new().with("title", "en_US", title))
    }

    fn with_category(entity: Entity, category_title: &str) -> Entity {
        entity.with_one(
            "category",
            Entity::new().with_settings(Settings::new().with("title", "en_US", category_title)),
        )
    }

    fn with_series_position(position: &str) -> Entity {
        titled(position).with_attr("series_position", position)
    }

    fn with_publication_date(title: &str, date: &str) -> Entity {
        titled(title).with_many(
            "publication_dates",
            vec![Entity::new()
                .with_attr("date", date)
                .with_attr("date_format", "00")],
        )
    }

    fn with_author(title: &str, family: &str) -> Entity {
        titled(title).with_many(
            "authors",
            vec![Entity::new()
                .with_settings(Settings::new().with("familyName", "en_US", family))],
        )
    }

    #[test]
    fn preset_parsing_round_trips() {
        for preset in SortKey::PRESETS {
            let key: SortKey = preset.parse().unwrap();
            assert_eq!(key.as_str(), *preset);
        }
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let err = "alphabetical".parse::<SortKey>().unwrap_err();
        assert!(err.to_string().contains("alphabetical"));
    }

    #[test]
    fn category_filter_is_case_sensitive_and_drops_uncategorized() {
        let submissions = vec![
            with_category(titled("a"), "Science"),
            with_category(titled("b"), "science"),
            titled("c"),
        ];
        let kept: Vec<_> = filter_by_category(submissions.iter(), "Science", &en()).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].settings.localized("title", "en_US"), "a");
    }

    #[test]
    fn series_position_ordering() {
        let mut positions = vec!["10", "2", "Beiheft 1", "1.5"];
        positions.sort_by_key(|p| SeriesPositionKey::parse(p));
        assert_eq!(positions, vec!["Beiheft 1", "1.5", "2", "10"]);
    }

    #[test]
    fn digitless_positions_fall_back_to_string_order() {
        let mut positions = vec!["var. b", "7", "var. a"];
        positions.sort_by_key(|p| SeriesPositionKey::parse(p));
        assert_eq!(positions, vec!["7", "var. a", "var. b"]);
    }

    #[test]
    fn pagination_slices() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 0, 10).len(), 10);
        assert_eq!(paginate(&items, 2, 10).len(), 5);
        assert!(paginate(&items, 3, 10).is_empty());
        assert!(paginate(&items, 0, 0).is_empty());
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn sort_by_title_and_direction() {
        let submissions = vec![titled("Beta"), titled("alpha"), titled("Gamma")];
        let locale = en();
        let browser = Browser::new(&locale, 0, 10, SortKey::TitleAscending);
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        assert_eq!(titles, vec!["alpha", "Beta", "Gamma"]);

        let browser = Browser::new(&locale, 0, 10, SortKey::TitleDescending);
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        assert_eq!(titles, vec!["Gamma", "Beta", "alpha"]);
    }

    #[test]
    fn sort_by_publication_date_with_sentinel_first() {
        let submissions = vec![
            with_publication_date("new", "20230101"),
            with_publication_date("old", "19990101"),
            titled("undated"),
        ];
        let locale = en();
        let browser = Browser::new(&locale, 0, 10, SortKey::DatePublishedAscending);
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        assert_eq!(titles, vec!["undated", "old", "new"]);
    }

    #[test]
    fn sort_by_author_priority_and_fallback() {
        let by_author = with_author("authored", "Zimmer");
        let by_editor = titled("edited").with_many(
            "editors",
            vec![Entity::new()
                .with_settings(Settings::new().with("familyName", "en_US", "Abel"))],
        );
        let mononym = titled("mononym").with_many(
            "authors",
            vec![Entity::new()
                .with_settings(Settings::new().with("givenName", "en_US", "Novalis"))],
        );
        let submissions = vec![by_author, by_editor, mononym];
        let locale = en();
        let browser = Browser::new(&locale, 0, 10, SortKey::Author);
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        assert_eq!(titles, vec!["edited", "mononym", "authored"]);
    }

    #[test]
    fn sort_by_category_with_missing_category_first() {
        let submissions = vec![
            with_category(titled("b"), "Zoology"),
            titled("none"),
            with_category(titled("a"), "Anthropology"),
        ];
        let locale = en();
        let browser = Browser::new(&locale, 0, 10, SortKey::Category);
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        assert_eq!(titles, vec!["none", "a", "b"]);
    }

    #[test]
    fn sort_by_series_position_descending() {
        let submissions = vec![
            with_series_position("2"),
            with_series_position("Beiheft 1"),
            with_series_position("10"),
        ];
        let locale = en();
        let browser = Browser::new(&locale, 0, 10, SortKey::SeriesPositionDescending);
        let positions: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.attr_str("series_position").unwrap().to_string())
            .collect();
        assert_eq!(positions, vec!["10", "2", "Beiheft 1"]);
    }

    #[test]
    fn process_combines_filter_sort_and_pagination() {
        let mut submissions = Vec::new();
        for (title, category) in [
            ("delta", "Science"),
            ("alpha", "Science"),
            ("charlie", "Science"),
            ("bravo", "Arts"),
            ("echo", "Science"),
        ] {
            submissions.push(with_category(titled(title), category));
        }
        let locale = en();
        let browser = Browser::new(&locale, 1, 2, SortKey::TitleAscending)
            .with_category_filter("Science");
        let titles: Vec<_> = browser
            .process(&submissions)
            .iter()
            .map(|s| s.settings.localized("title", "en_US").to_string())
            .collect();
        // filtered to four Science titles, sorted, second page of two
        assert_eq!(titles, vec!["delta", "echo"]);
        assert_eq!(browser.total_pages(4), 2);
    }
}
