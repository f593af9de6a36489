//! Catalog formatting for an Open Monograph Press portal.
//!
//! This crate turns resolved OMP entities (see [`omp_core`]) into the
//! strings and records the catalog frontend displays: contributor
//! attributions, recommended citations, CSL-JSON book records, localized
//! publication-date strings, and the filtered/sorted/paginated submission
//! lists of the catalog browser.
//!
//! Everything here is a pure function over in-memory data: no I/O, no shared
//! mutable state, no retries. Contract violations (a malformed date string
//! for a known format code, an unknown sort preset) fail fast with a
//! [`CatalogError`]; absent-but-optional data degrades to empty strings or
//! omitted clauses.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use omp_catalog::citation::Citation;
//! use omp_core::{Entity, Locale, Settings};
//!
//! let authors = vec![Entity::new().with_settings(
//!     Settings::new()
//!         .with("givenName", "en_US", "Jane")
//!         .with("familyName", "en_US", "Doe"),
//! )];
//! let citation = Citation::new(
//!     "A Study",
//!     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     "Berlin",
//!     "Acme Press",
//! )
//! .authors(&authors)
//! .format(&Locale::en_us());
//! assert_eq!(citation, "Doe, Jane: A Study, Berlin: Acme Press, 2020.");
//! ```

pub mod browse;
pub mod citation;
pub mod contributor;
pub mod csl;
pub mod error;
pub mod onix;

pub use browse::{filter_by_category, paginate, total_pages, Browser, SeriesPositionKey, SortKey};
pub use citation::{doi_url, format_chapter_citation, format_series_position, Citation};
pub use contributor::{
    format_attribution, format_contributors, format_name, have_multiple_authors,
    DEFAULT_MAX_CONTRIBUTORS,
};
pub use csl::{build_csl_data, csl_name, CslDate, CslName, CslRecord};
pub use error::{CatalogError, Result};
pub use onix::{
    decode_date, format_date, format_date_with_phrase, format_date_with_phrase_at, DateCode,
    DateRow, PubDate,
};

// Re-export the data model for convenience
pub use omp_core::{Entity, Locale, Settings};
