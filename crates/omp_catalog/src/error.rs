use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The raw date string does not match the pattern its format code
    /// implies. Unknown format codes are not errors; they degrade to
    /// verbatim raw-string display instead.
    #[error("date {date:?} does not match expected pattern {pattern} for format code {code:?}")]
    DateFormat {
        date: String,
        pattern: &'static str,
        code: String,
    },

    /// A sort/filter preset name outside the fixed enumeration.
    #[error("unknown sort key: {0:?}")]
    UnknownSortKey(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
