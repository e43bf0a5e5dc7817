//! Spoonacular adapter. Implements RecipePort.
//!
//! Two modes: direct (API key as `apiKey` query param) or proxy (a server that
//! holds the key and forwards `endpoint` plus the remaining params).

use crate::domain::{DomainError, RecipeCategory, RecipeDetail, RecipeQuery, RecipeSummary};
use crate::ports::RecipePort;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const SEARCH_ENDPOINT: &str = "/recipes/complexSearch";
const SEARCH_LIMIT: u32 = 10;
const BROWSE_LIMIT: u32 = 8;
const HIGH_PROTEIN_MIN_GRAMS: u32 = 20;
const QUICK_MAX_MINUTES: u32 = 20;

/// How requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpoonacularAuth {
    /// Call `base_url` directly with the key.
    ApiKey(String),
    /// Call a proxy; the endpoint travels as a query param.
    Proxy(String),
}

pub struct SpoonacularAdapter {
    client: Client,
    base_url: String,
    auth: SpoonacularAuth,
}

type Params = Vec<(&'static str, String)>;

impl SpoonacularAdapter {
    /// # Arguments
    /// * `base_url` - API root for direct mode (e.g. "https://api.spoonacular.com")
    /// * `auth` - API key or proxy URL
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: String,
        auth: SpoonacularAuth,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::RecipeSearch(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<T, DomainError> {
        let request = match &self.auth {
            SpoonacularAuth::ApiKey(key) => self
                .client
                .get(format!("{}{}", self.base_url, endpoint))
                .query(&params)
                .query(&[("apiKey", key.as_str())]),
            SpoonacularAuth::Proxy(url) => self
                .client
                .get(url)
                .query(&[("endpoint", endpoint)])
                .query(&params),
        };
        debug!(endpoint, params = params.len(), "spoonacular request");

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::RecipeSearch(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, endpoint, "Spoonacular returned error");
            return Err(DomainError::RecipeSearch(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::RecipeSearch(format!("Failed to parse response: {}", e)))
    }

    async fn complex_search(&self, params: Params) -> Result<Vec<RecipeSummary>, DomainError> {
        let body: SearchResponse = self.get(SEARCH_ENDPOINT, params).await?;
        let results: Vec<RecipeSummary> = body.results.into_iter().map(ApiRecipe::into_summary).collect();
        info!(count = results.len(), "recipes fetched");
        Ok(results)
    }
}

fn base_params(number: u32) -> Params {
    vec![
        ("diet", "vegan".to_string()),
        ("addRecipeNutrition", "true".to_string()),
        ("number", number.to_string()),
    ]
}

fn search_params(query: &RecipeQuery) -> Params {
    let mut params = vec![("includeIngredients", query.ingredients.join(","))];
    params.extend(base_params(SEARCH_LIMIT));
    if query.high_protein {
        params.push(("minProtein", HIGH_PROTEIN_MIN_GRAMS.to_string()));
    }
    if let Some(meal_type) = &query.meal_type {
        params.push(("type", meal_type.clone()));
    }
    if let Some(max) = query.max_ready_time {
        params.push(("maxReadyTime", max.to_string()));
    }
    params
}

fn popular_params() -> Params {
    let mut params = base_params(BROWSE_LIMIT);
    params.push(("sort", "popularity".to_string()));
    params
}

fn category_params(category: &RecipeCategory) -> Params {
    let mut params = base_params(BROWSE_LIMIT);
    match category {
        RecipeCategory::HighProtein => {
            params.push(("minProtein", HIGH_PROTEIN_MIN_GRAMS.to_string()));
            params.push(("sort", "protein".to_string()));
            params.push(("sortDirection", "desc".to_string()));
        }
        RecipeCategory::Quick => {
            params.push(("maxReadyTime", QUICK_MAX_MINUTES.to_string()));
            params.push(("sort", "time".to_string()));
        }
        RecipeCategory::MealType(meal_type) => {
            params.push(("type", meal_type.clone()));
            params.push(("sort", "popularity".to_string()));
        }
    }
    params
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ApiRecipe>,
}

#[derive(Debug, Default, Deserialize)]
struct Nutrition {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    amount: f64,
}

impl Nutrition {
    fn amount(&self, name: &str) -> Option<f64> {
        self.nutrients.iter().find(|n| n.name == name).map(|n| n.amount)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecipe {
    id: u64,
    title: String,
    image: Option<String>,
    ready_in_minutes: Option<u32>,
    #[serde(default)]
    nutrition: Option<Nutrition>,
}

impl ApiRecipe {
    fn into_summary(self) -> RecipeSummary {
        let nutrition = self.nutrition.unwrap_or_default();
        RecipeSummary {
            id: self.id,
            title: self.title,
            image_url: self.image.filter(|s| !s.is_empty()),
            ready_in_minutes: self.ready_in_minutes.filter(|m| *m > 0),
            protein_grams: nutrition.amount("Protein"),
            calories: nutrition.amount("Calories"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecipeInformation {
    id: u64,
    title: String,
    image: Option<String>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    #[serde(default)]
    nutrition: Option<Nutrition>,
    #[serde(default)]
    extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionGroup>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    original: String,
}

#[derive(Debug, Deserialize)]
struct InstructionGroup {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: String,
}

impl ApiRecipeInformation {
    fn into_detail(self) -> RecipeDetail {
        let nutrition = self.nutrition.unwrap_or_default();
        RecipeDetail {
            id: self.id,
            title: self.title,
            image_url: self.image.filter(|s| !s.is_empty()),
            ready_in_minutes: self.ready_in_minutes.filter(|m| *m > 0),
            servings: self.servings.filter(|s| *s > 0),
            protein_grams: nutrition.amount("Protein"),
            carbs_grams: nutrition.amount("Carbohydrates"),
            fat_grams: nutrition.amount("Fat"),
            calories: nutrition.amount("Calories"),
            ingredients: self
                .extended_ingredients
                .into_iter()
                .map(|i| i.original)
                .collect(),
            instructions: self
                .analyzed_instructions
                .into_iter()
                .flat_map(|g| g.steps)
                .map(|s| s.step)
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl RecipePort for SpoonacularAdapter {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<RecipeSummary>, DomainError> {
        self.complex_search(search_params(query)).await
    }

    async fn popular(&self) -> Result<Vec<RecipeSummary>, DomainError> {
        self.complex_search(popular_params()).await
    }

    async fn by_category(
        &self,
        category: &RecipeCategory,
    ) -> Result<Vec<RecipeSummary>, DomainError> {
        self.complex_search(category_params(category)).await
    }

    async fn detail(&self, recipe_id: u64) -> Result<RecipeDetail, DomainError> {
        let endpoint = format!("/recipes/{}/information", recipe_id);
        let info: ApiRecipeInformation = self
            .get(&endpoint, vec![("includeNutrition", "true".to_string())])
            .await?;
        Ok(info.into_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(params: &Params, key: &str, value: &str) -> bool {
        params.iter().any(|(k, v)| *k == key && v == value)
    }

    #[test]
    fn test_search_params_with_filters() {
        let query = RecipeQuery {
            ingredients: vec!["lentils".into(), "rice".into()],
            high_protein: true,
            meal_type: Some("main course".into()),
            max_ready_time: Some(30),
        };
        let p = search_params(&query);
        assert!(has(&p, "includeIngredients", "lentils,rice"));
        assert!(has(&p, "diet", "vegan"));
        assert!(has(&p, "number", "10"));
        assert!(has(&p, "minProtein", "20"));
        assert!(has(&p, "type", "main course"));
        assert!(has(&p, "maxReadyTime", "30"));
    }

    #[test]
    fn test_search_params_without_filters() {
        let query = RecipeQuery {
            ingredients: vec!["tofu".into()],
            ..Default::default()
        };
        let p = search_params(&query);
        assert!(!p.iter().any(|(k, _)| *k == "minProtein" || *k == "type"));
    }

    #[test]
    fn test_category_params() {
        let p = category_params(&RecipeCategory::HighProtein);
        assert!(has(&p, "sort", "protein") && has(&p, "sortDirection", "desc"));

        let p = category_params(&RecipeCategory::Quick);
        assert!(has(&p, "maxReadyTime", "20") && has(&p, "sort", "time"));

        let p = category_params(&RecipeCategory::MealType("soup".into()));
        assert!(has(&p, "type", "soup") && has(&p, "number", "8"));

        assert!(has(&popular_params(), "sort", "popularity"));
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{"results": [{
            "id": 716429,
            "title": "Chickpea Curry",
            "image": "https://img.example/716429.jpg",
            "readyInMinutes": 45,
            "nutrition": {"nutrients": [
                {"name": "Calories", "amount": 420.5, "unit": "kcal"},
                {"name": "Protein", "amount": 18.2, "unit": "g"}
            ]}
        }, {"id": 2, "title": "Plain", "readyInMinutes": 0}]}"#;
        let body: SearchResponse = serde_json::from_str(json).unwrap();
        let recipes: Vec<RecipeSummary> = body.results.into_iter().map(ApiRecipe::into_summary).collect();
        assert_eq!(recipes[0].protein_grams, Some(18.2));
        assert_eq!(recipes[0].calories, Some(420.5));
        assert_eq!(recipes[0].ready_in_minutes, Some(45));
        assert_eq!(recipes[1].ready_in_minutes, None);
        assert_eq!(recipes[1].calories, None);
    }

    #[test]
    fn test_parse_information() {
        let json = r#"{
            "id": 7, "title": "Lentil Soup", "servings": 4,
            "extendedIngredients": [{"original": "1 cup red lentils"}, {"original": "1 onion"}],
            "analyzedInstructions": [{"steps": [{"step": "Chop."}, {"step": "Simmer."}]}],
            "nutrition": {"nutrients": [{"name": "Fat", "amount": 3.0}]}
        }"#;
        let info: ApiRecipeInformation = serde_json::from_str(json).unwrap();
        let d = info.into_detail();
        assert_eq!(d.ingredients, vec!["1 cup red lentils", "1 onion"]);
        assert_eq!(d.instructions, vec!["Chop.", "Simmer."]);
        assert_eq!(d.fat_grams, Some(3.0));
        assert_eq!(d.servings, Some(4));
        assert!(d.image_url.is_none());
    }
}
