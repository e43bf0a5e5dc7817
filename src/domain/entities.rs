//! Domain entities. Pure data structures for products, recipes and scan history.
//!
//! No HTTP/storage types here; adapters map into these.

use crate::domain::ingredients::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Packaged product resolved from a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub ingredients_text: Option<String>,
}

impl Product {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Unknown Product")
    }
}

/// One scan, newest first in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistoryEntry {
    pub barcode: String,
    pub product_name: String,
    pub verdict: Verdict,
    pub scanned_at: DateTime<Utc>,
}

/// Ingredient-driven recipe search with optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub ingredients: Vec<String>,
    pub high_protein: bool,
    pub meal_type: Option<String>,
    pub max_ready_time: Option<u32>,
}

/// Browse categories for the recipe tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeCategory {
    HighProtein,
    Quick,
    MealType(String),
}

impl RecipeCategory {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high-protein" => RecipeCategory::HighProtein,
            "quick" => RecipeCategory::Quick,
            other => RecipeCategory::MealType(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub protein_grams: Option<f64>,
    pub calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub protein_grams: Option<f64>,
    pub carbs_grams: Option<f64>,
    pub fat_grams: Option<f64>,
    pub calories: Option<f64>,
    /// Original ingredient lines, e.g. "2 cups chickpeas".
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut p = Product {
            barcode: "123".into(),
            name: None,
            image_url: None,
            ingredients_text: None,
        };
        assert_eq!(p.display_name(), "Unknown Product");
        p.name = Some("  ".into());
        assert_eq!(p.display_name(), "Unknown Product");
        p.name = Some("Oat Crackers".into());
        assert_eq!(p.display_name(), "Oat Crackers");
    }

    #[test]
    fn test_recipe_category_parse() {
        assert_eq!(RecipeCategory::parse("High-Protein"), RecipeCategory::HighProtein);
        assert_eq!(RecipeCategory::parse("quick"), RecipeCategory::Quick);
        assert_eq!(
            RecipeCategory::parse("soup"),
            RecipeCategory::MealType("soup".into())
        );
    }
}
