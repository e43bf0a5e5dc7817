//! Core domain layer. No external I/O dependencies.
//!
//! The fasting calendar and the ingredient classifier live here, along with
//! the entities the adapters map into. Dependencies flow inward.

pub mod countdown;
pub mod entities;
pub mod errors;
pub mod fasting;
pub mod ingredients;
pub mod keywords;
pub mod pascha;
pub mod rules;

pub use countdown::{LentStatus, daily_tip, lent_status, next_pascha};
pub use entities::{
    Product, RecipeCategory, RecipeDetail, RecipeQuery, RecipeSummary, ScanHistoryEntry,
};
pub use errors::DomainError;
pub use fasting::{
    ActiveFastingPeriod, FastLevel, FastingPeriod, FastingRuleResult, LiturgicalYear,
    SpecialDay, UpcomingFastingPeriod,
};
pub use ingredients::{
    ClassificationResult, FlaggedIngredient, IngredientCategory, IngredientClassifier,
    KeywordDictionary, Verdict, contains_keyword,
};
pub use keywords::KeywordTables;
pub use pascha::{SUPPORTED_YEARS, compute_pascha, ensure_supported_year};
pub use rules::{FastingRuleEngine, RuleId};
