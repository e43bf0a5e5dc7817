//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Product lookup failed: {0}")]
    ProductLookup(String),

    #[error("Product not found in database: {0}")]
    ProductNotFound(String),

    #[error("Recipe search failed: {0}")]
    RecipeSearch(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Year outside the Julian-to-Gregorian offset table (1800..=2099).
    #[error("Year {0} is outside the supported calendar range (1800-2099)")]
    UnsupportedYear(i32),

    #[error("Keyword table error: {0}")]
    Keywords(String),

    #[error("UI error: {0}")]
    Ui(String),
}
