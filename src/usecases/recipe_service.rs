//! Recipe search and fasting check for a single recipe.

use crate::domain::{
    ClassificationResult, DomainError, IngredientClassifier, RecipeCategory, RecipeDetail,
    RecipeQuery, RecipeSummary,
};
use crate::ports::RecipePort;
use std::sync::Arc;
use tracing::info;

/// Recipe detail plus the classification of its ingredient lines.
#[derive(Debug, Clone)]
pub struct RecipeCheck {
    pub detail: RecipeDetail,
    pub classification: ClassificationResult,
}

pub struct RecipeService {
    recipes: Arc<dyn RecipePort>,
    classifier: Arc<IngredientClassifier>,
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipePort>, classifier: Arc<IngredientClassifier>) -> Self {
        Self {
            recipes,
            classifier,
        }
    }

    /// Search by ingredients. Ingredients are normalized first; an empty list is rejected.
    pub async fn search(&self, query: RecipeQuery) -> Result<Vec<RecipeSummary>, DomainError> {
        let query = RecipeQuery {
            ingredients: normalize_ingredients(&query.ingredients),
            ..query
        };
        if query.ingredients.is_empty() {
            return Err(DomainError::InvalidInput(
                "Add at least one ingredient".into(),
            ));
        }
        let results = self.recipes.search(&query).await?;
        info!(
            ingredients = query.ingredients.len(),
            high_protein = query.high_protein,
            results = results.len(),
            "recipe search complete"
        );
        Ok(results)
    }

    pub async fn popular(&self) -> Result<Vec<RecipeSummary>, DomainError> {
        self.recipes.popular().await
    }

    pub async fn by_category(
        &self,
        category: &RecipeCategory,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        self.recipes.by_category(category).await
    }

    /// Fetch a recipe and classify its ingredient lines.
    pub async fn check_recipe(&self, recipe_id: u64) -> Result<RecipeCheck, DomainError> {
        let detail = self.recipes.detail(recipe_id).await?;
        let classification = self.classifier.classify(&detail.ingredients.join(", "));
        info!(
            recipe_id,
            title = %detail.title,
            verdict = ?classification.verdict,
            "checked recipe"
        );
        Ok(RecipeCheck {
            detail,
            classification,
        })
    }
}

/// Trim, lowercase, drop empties and duplicates (first occurrence wins).
pub fn normalize_ingredients(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for item in raw {
        let item = item.trim().to_lowercase();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KeywordDictionary, Verdict};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct FakeRecipes {
        last_query: Mutex<Option<RecipeQuery>>,
    }

    fn summary(id: u64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id,
            title: title.into(),
            image_url: None,
            ready_in_minutes: Some(20),
            protein_grams: Some(12.0),
            calories: Some(350.0),
        }
    }

    #[async_trait::async_trait]
    impl RecipePort for FakeRecipes {
        async fn search(&self, query: &RecipeQuery) -> Result<Vec<RecipeSummary>, DomainError> {
            *self.last_query.lock().await = Some(query.clone());
            Ok(vec![summary(1, "Lentil Soup")])
        }

        async fn popular(&self) -> Result<Vec<RecipeSummary>, DomainError> {
            Ok(vec![summary(2, "Bean Chili"), summary(3, "Hummus")])
        }

        async fn by_category(
            &self,
            _category: &RecipeCategory,
        ) -> Result<Vec<RecipeSummary>, DomainError> {
            Ok(vec![summary(4, "Quick Salad")])
        }

        async fn detail(&self, recipe_id: u64) -> Result<RecipeDetail, DomainError> {
            let ingredients = if recipe_id == 7 {
                vec!["2 tbsp honey".to_string(), "1 cup oats".to_string()]
            } else {
                vec!["1 cup lentils".to_string(), "1 onion".to_string()]
            };
            Ok(RecipeDetail {
                id: recipe_id,
                title: "Test".into(),
                image_url: None,
                ready_in_minutes: None,
                servings: Some(2),
                protein_grams: None,
                carbs_grams: None,
                fat_grams: None,
                calories: None,
                ingredients,
                instructions: vec!["Cook.".into()],
            })
        }
    }

    fn service(fake: Arc<FakeRecipes>) -> RecipeService {
        let classifier = IngredientClassifier::new(Arc::new(KeywordDictionary::builtin().unwrap()));
        RecipeService::new(fake, Arc::new(classifier))
    }

    #[test]
    fn test_normalize_ingredients() {
        let raw = vec![
            " Chickpeas ".to_string(),
            "".to_string(),
            "chickpeas".to_string(),
            "Tahini".to_string(),
        ];
        assert_eq!(normalize_ingredients(&raw), vec!["chickpeas", "tahini"]);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_ingredients() {
        let svc = service(Arc::new(FakeRecipes::default()));
        let query = RecipeQuery {
            ingredients: vec!["  ".into()],
            ..Default::default()
        };
        assert!(matches!(
            svc.search(query).await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_search_passes_normalized_query() {
        let fake = Arc::new(FakeRecipes::default());
        let svc = service(Arc::clone(&fake));
        let query = RecipeQuery {
            ingredients: vec!["Lentils".into(), "lentils".into()],
            high_protein: true,
            meal_type: Some("soup".into()),
            max_ready_time: Some(30),
        };
        let results = svc.search(query).await.unwrap();
        assert_eq!(results.len(), 1);

        let sent = fake.last_query.lock().await.clone().unwrap();
        assert_eq!(sent.ingredients, vec!["lentils"]);
        assert!(sent.high_protein);
        assert_eq!(sent.max_ready_time, Some(30));
    }

    #[tokio::test]
    async fn test_check_recipe_classifies_ingredient_lines() {
        let svc = service(Arc::new(FakeRecipes::default()));

        let safe = svc.check_recipe(1).await.unwrap();
        assert_eq!(safe.classification.verdict, Verdict::Safe);

        let honey = svc.check_recipe(7).await.unwrap();
        assert_eq!(honey.classification.verdict, Verdict::NotSafe);
        assert_eq!(honey.classification.flagged_ingredients[0].keyword, "honey");
    }
}
