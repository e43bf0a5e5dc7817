//! Recipe search adapters. Implement RecipePort.

pub mod spoonacular;

pub use spoonacular::{SpoonacularAdapter, SpoonacularAuth};
