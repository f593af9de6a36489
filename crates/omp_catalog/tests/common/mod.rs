#![allow(dead_code)]

use omp_core::{Entity, SettingRow, Settings};

// --- Helper functions for test data construction ---

/// A contributor entity with localized name settings.
pub fn contributor(given: &str, family: &str) -> Entity {
    Entity::new().with_settings(
        Settings::new()
            .with("givenName", "en_US", given)
            .with("familyName", "en_US", family),
    )
}

/// A minimal submission with a title and id.
pub fn submission(id: i64, title: &str) -> Entity {
    Entity::new()
        .with_attr("submission_id", id)
        .with_settings(Settings::new().with("title", "en_US", title))
}

/// Attach a category with a localized title.
pub fn categorized(entity: Entity, category_title: &str) -> Entity {
    entity.with_one(
        "category",
        Entity::new().with_settings(Settings::new().with("title", "en_US", category_title)),
    )
}

/// Attach a single day-precision publication date.
pub fn published_on(entity: Entity, date: &str) -> Entity {
    entity.with_many(
        "publication_dates",
        vec![Entity::new()
            .with_attr("date", date)
            .with_attr("date_format", "00")],
    )
}

/// Press settings as delivered by the repository.
pub fn press_settings() -> Settings {
    Settings::from_rows(vec![
        SettingRow::new("location", "en_US", "Heidelberg"),
        SettingRow::new("publisher", "en_US", "Heidelberg University Publishing"),
    ])
}
