//! Contributor name formatting.
//!
//! Contributors are entities whose localized `familyName` / `givenName`
//! settings hold the name parts. Ordering is significant and preserved as
//! delivered by the repository.

use omp_core::{Entity, Locale, Settings};
use std::collections::HashSet;

/// Default truncation threshold for contributor lists.
pub const DEFAULT_MAX_CONTRIBUTORS: usize = 3;

/// Contributor count shown in catalog-heading attributions.
const ATTRIBUTION_MAX_CONTRIBUTORS: usize = 4;

/// Format one contributor name from its settings.
///
/// The family name is optional in the source schema; when it is absent the
/// given name stands alone. `reverse` puts the family name first
/// ("Doe, Jane").
pub fn format_name(settings: &Settings, locale: &Locale, reverse: bool) -> String {
    let family = settings.localized("familyName", &locale.tag).trim();
    let given = settings.localized("givenName", &locale.tag).trim();
    match (family.is_empty(), given.is_empty()) {
        (true, _) => given.to_string(),
        (false, true) => family.to_string(),
        (false, false) if reverse => format!("{family}, {given}"),
        (false, false) => format!("{given} {family}"),
    }
}

/// Format a list of contributors.
///
/// Strictly more than `max_contributors` entries shows only the first name
/// plus a literal " et al."; exactly `max_contributors` are listed in full.
/// With `with_and`, the last two names are joined by the localized
/// conjunction instead of a comma. An empty list yields an empty string.
pub fn format_contributors(
    contributors: &[Entity],
    max_contributors: usize,
    locale: &Locale,
    reverse: bool,
    with_and: bool,
) -> String {
    if contributors.is_empty() {
        return String::new();
    }
    if contributors.len() > max_contributors {
        return format!(
            "{} et al.",
            format_name(&contributors[0].settings, locale, reverse)
        );
    }
    if with_and && contributors.len() > 1 {
        if let Some((last, rest)) = contributors.split_last() {
            let head = rest
                .iter()
                .map(|c| format_name(&c.settings, locale, reverse))
                .collect::<Vec<_>>()
                .join(", ");
            return format!(
                "{} {} {}",
                head,
                locale.terms.and,
                format_name(&last.settings, locale, reverse)
            );
        }
    }
    contributors
        .iter()
        .map(|c| format_name(&c.settings, locale, reverse))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format the contributor attribution shown in catalog page headings.
///
/// Editors come first with their "(Ed.)"/"(Eds.)" suffix, then authors.
/// When neither is assigned the chapter authors stand in. Translators are
/// always appended with their suffix.
pub fn format_attribution(
    editors: &[Entity],
    authors: &[Entity],
    translators: &[Entity],
    chapter_authors: &[Entity],
    locale: &Locale,
) -> String {
    let mut parts = Vec::new();
    if !editors.is_empty() {
        let suffix = if editors.len() > 1 {
            &locale.terms.editors_abbrev
        } else {
            &locale.terms.editor_abbrev
        };
        parts.push(format!(
            "{} {}",
            format_contributors(editors, ATTRIBUTION_MAX_CONTRIBUTORS, locale, false, false),
            suffix
        ));
    }
    if !authors.is_empty() {
        parts.push(format_contributors(
            authors,
            ATTRIBUTION_MAX_CONTRIBUTORS,
            locale,
            false,
            false,
        ));
    }
    if parts.is_empty() && !chapter_authors.is_empty() {
        parts.push(format_contributors(
            chapter_authors,
            ATTRIBUTION_MAX_CONTRIBUTORS,
            locale,
            false,
            false,
        ));
    }
    if !translators.is_empty() {
        parts.push(format!(
            "{} {}",
            format_contributors(translators, ATTRIBUTION_MAX_CONTRIBUTORS, locale, false, false),
            locale.terms.translators_abbrev
        ));
    }
    parts.join(", ")
}

/// Whether a list of chapters features differing author sets. Used to decide
/// whether chapter author names are displayed per chapter.
pub fn have_multiple_authors(chapters: &[Entity]) -> bool {
    let author_sets: HashSet<Vec<i64>> = chapters
        .iter()
        .map(|chapter| {
            chapter
                .many("authors")
                .iter()
                .filter_map(|a| a.attr_i64("author_id"))
                .collect()
        })
        .collect();
    author_sets.len() != 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use omp_core::Settings;

    fn contributor(given: &str, family: &str) -> Entity {
        Entity::new().with_settings(
            Settings::new()
                .with("givenName", "en_US", given)
                .with("familyName", "en_US", family),
        )
    }

    fn en() -> Locale {
        Locale::en_us()
    }

    #[test]
    fn name_order_and_reversal() {
        let jane = contributor("Jane", "Doe");
        assert_eq!(format_name(&jane.settings, &en(), false), "Jane Doe");
        assert_eq!(format_name(&jane.settings, &en(), true), "Doe, Jane");
    }

    #[test]
    fn missing_family_name_uses_given_alone() {
        let mononym = contributor("Voltaire", "");
        assert_eq!(format_name(&mononym.settings, &en(), true), "Voltaire");
    }

    #[test]
    fn names_are_trimmed() {
        let padded = Entity::new().with_settings(
            Settings::new()
                .with("givenName", "en_US", " Jane ")
                .with("familyName", "en_US", " Doe "),
        );
        assert_eq!(format_name(&padded.settings, &en(), false), "Jane Doe");
    }

    #[test]
    fn empty_list_formats_to_empty_string() {
        assert_eq!(format_contributors(&[], 3, &en(), false, false), "");
    }

    #[test]
    fn truncation_boundary_is_strict() {
        let three = vec![
            contributor("A", "Ann"),
            contributor("B", "Bell"),
            contributor("C", "Cole"),
        ];
        // exactly max_contributors: all listed
        assert_eq!(
            format_contributors(&three, 3, &en(), false, false),
            "A Ann, B Bell, C Cole"
        );
        // one over: first name plus et al.
        let four = [
            three.clone(),
            vec![contributor("D", "Dean")],
        ]
        .concat();
        assert_eq!(format_contributors(&four, 3, &en(), false, false), "A Ann et al.");
    }

    #[test]
    fn with_and_joins_last_pair() {
        let pair = vec![contributor("Jane", "Doe"), contributor("John", "Roe")];
        assert_eq!(
            format_contributors(&pair, 3, &en(), true, true),
            "Doe, Jane and Roe, John"
        );
        let trio = vec![
            contributor("Jane", "Doe"),
            contributor("John", "Roe"),
            contributor("Max", "Poe"),
        ];
        assert_eq!(
            format_contributors(&trio, 3, &en(), false, true),
            "Jane Doe, John Roe and Max Poe"
        );
    }

    #[test]
    fn localized_conjunction() {
        let pair = vec![contributor("Jane", "Doe"), contributor("John", "Roe")];
        assert_eq!(
            format_contributors(&pair, 3, &Locale::de_de(), false, true),
            "Jane Doe und John Roe"
        );
    }

    #[test]
    fn attribution_editors_then_translators() {
        let editors = vec![contributor("Erin", "Edit")];
        let translators = vec![contributor("Tom", "Trans")];
        assert_eq!(
            format_attribution(&editors, &[], &translators, &[], &en()),
            "Erin Edit (Ed.), Tom Trans (Transl.)"
        );
    }

    #[test]
    fn attribution_plural_editor_suffix() {
        let editors = vec![contributor("Erin", "Edit"), contributor("Eva", "More")];
        assert_eq!(
            format_attribution(&editors, &[], &[], &[], &en()),
            "Erin Edit, Eva More (Eds.)"
        );
    }

    #[test]
    fn attribution_falls_back_to_chapter_authors() {
        let chapter_authors = vec![contributor("Carl", "Chap")];
        assert_eq!(
            format_attribution(&[], &[], &[], &chapter_authors, &en()),
            "Carl Chap"
        );
    }

    fn chapter(author_ids: &[i64]) -> Entity {
        let authors = author_ids
            .iter()
            .map(|id| Entity::new().with_attr("author_id", *id))
            .collect();
        Entity::new().with_many("authors", authors)
    }

    #[test]
    fn multiple_authors_detection() {
        assert!(!have_multiple_authors(&[chapter(&[1, 2]), chapter(&[1, 2])]));
        assert!(have_multiple_authors(&[chapter(&[1]), chapter(&[2])]));
    }
}
