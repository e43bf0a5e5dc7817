//! Application use cases. Orchestrate domain logic via ports.

pub mod calendar_service;
pub mod recipe_service;
pub mod scan_service;

pub use calendar_service::{CalendarService, DaySummary};
pub use recipe_service::{RecipeCheck, RecipeService};
pub use scan_service::{ScanOutcome, ScanService};
