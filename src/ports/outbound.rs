//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    DomainError, Product, RecipeCategory, RecipeDetail, RecipeQuery, RecipeSummary,
    ScanHistoryEntry,
};

/// Product database keyed by barcode (e.g. Open Food Facts).
#[async_trait::async_trait]
pub trait ProductCatalogPort: Send + Sync {
    /// Look up a product. `Ok(None)` when the database has no such barcode.
    async fn get_product(&self, barcode: &str) -> Result<Option<Product>, DomainError>;
}

/// Recipe search service (e.g. Spoonacular). All results are vegan-filtered.
#[async_trait::async_trait]
pub trait RecipePort: Send + Sync {
    /// Search by ingredients with optional filters. `query.ingredients` is non-empty.
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<RecipeSummary>, DomainError>;

    /// Popular recipes for the first page.
    async fn popular(&self) -> Result<Vec<RecipeSummary>, DomainError>;

    /// Recipes for a browse category.
    async fn by_category(
        &self,
        category: &RecipeCategory,
    ) -> Result<Vec<RecipeSummary>, DomainError>;

    /// Full recipe with ingredient lines and instructions.
    async fn detail(&self, recipe_id: u64) -> Result<RecipeDetail, DomainError>;
}

/// Scan history store. Newest entry first.
#[async_trait::async_trait]
pub trait HistoryPort: Send + Sync {
    /// Prepend an entry; the store truncates to its limit.
    async fn record(&self, entry: ScanHistoryEntry) -> Result<(), DomainError>;

    /// All entries, newest first.
    async fn list(&self) -> Result<Vec<ScanHistoryEntry>, DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;
}
