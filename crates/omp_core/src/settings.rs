//! Locale-keyed settings resolution.
//!
//! OMP stores entity metadata as `(setting_name, locale, setting_value)`
//! rows. [`Settings`] indexes those rows for lookup by name and locale with
//! fallback-locale resolution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The locale used when a value is missing for the requested locale.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en_US";

/// One raw settings row as returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SettingRow {
    pub name: String,
    pub locale: String,
    pub value: String,
}

impl SettingRow {
    pub fn new(
        name: impl Into<String>,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
            value: value.into(),
        }
    }
}

/// An indexed view over settings rows: setting name → locale → value.
///
/// Duplicate `(name, locale)` pairs follow a last-wins policy: the value of
/// the most recently added row silently replaces the earlier one. This
/// mirrors how the upstream schema is queried in practice and is intentional,
/// not a defect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    map: IndexMap<String, IndexMap<String, String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a settings view from raw rows. Row order is irrelevant except
    /// for the last-wins duplicate policy.
    pub fn from_rows(rows: impl IntoIterator<Item = SettingRow>) -> Self {
        let mut settings = Self::default();
        for row in rows {
            settings.set(row.name, row.locale, row.value);
        }
        settings
    }

    /// Insert a single value, replacing any existing value for the pair.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) {
        let name = name.into();
        let by_locale = self.map.entry(name.clone()).or_insert_with(IndexMap::new);
        if by_locale.insert(locale.into(), value.into()).is_some() {
            tracing::debug!(setting = %name, "duplicate setting row overwritten");
        }
    }

    /// Builder-style variant of [`Settings::set`] for fixture assembly.
    pub fn with(
        mut self,
        name: impl Into<String>,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(name, locale, value);
        self
    }

    /// Look up `name` for `locale`, falling back to
    /// [`DEFAULT_FALLBACK_LOCALE`] when the localized value is missing or
    /// empty, and to `""` when the setting is unknown. Never errors.
    pub fn localized(&self, name: &str, locale: &str) -> &str {
        self.localized_or(name, locale, DEFAULT_FALLBACK_LOCALE)
    }

    /// As [`Settings::localized`] with an explicit fallback locale.
    pub fn localized_or(&self, name: &str, locale: &str, fallback: &str) -> &str {
        let Some(by_locale) = self.map.get(name) else {
            return "";
        };
        match by_locale.get(locale) {
            Some(value) if !value.is_empty() => value,
            _ => by_locale.get(fallback).map(String::as_str).unwrap_or(""),
        }
    }

    /// All locale→value pairs for a setting; empty map for unknown names.
    pub fn all_values(&self, name: &str) -> &IndexMap<String, String> {
        static EMPTY: OnceLock<IndexMap<String, String>> = OnceLock::new();
        self.map
            .get(name)
            .unwrap_or_else(|| EMPTY.get_or_init(IndexMap::new))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
