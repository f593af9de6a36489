//! Core data model for the OMP catalog formatting layer.
//!
//! This crate defines the read-only contract between the repository layer
//! (which fetches rows from an Open Monograph Press database) and the
//! formatting code in `omp_catalog`: a generic [`Entity`] carrying scalar
//! attributes, locale-keyed [`Settings`] and named associated items, plus a
//! [`Locale`] value holding the language-specific terms used when rendering
//! citations and dates.
//!
//! Entities are built fresh per request from query results and never mutated
//! afterwards; nothing in this crate performs I/O or holds shared state, so
//! every type here is safe to use from concurrent requests.

pub mod entity;
pub mod locale;
pub mod settings;

pub use entity::{Associated, Attribute, Entity};
pub use locale::{Locale, MonthList, Terms};
pub use settings::{SettingRow, Settings, DEFAULT_FALLBACK_LOCALE};
