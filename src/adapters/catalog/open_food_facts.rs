//! Open Food Facts adapter. Implements ProductCatalogPort via the v2 product API.

use crate::domain::{DomainError, Product};
use crate::ports::ProductCatalogPort;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Open Food Facts API client.
///
/// One request per lookup, no retries. The API asks clients to identify
/// themselves, so every request carries `user_agent`.
pub struct OpenFoodFactsAdapter {
    client: Client,
    base_url: String,
}

impl OpenFoodFactsAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://world.openfoodfacts.org/api/v2")
    /// * `user_agent` - Identifying User-Agent, e.g. "LentScanner/1.0 (contact)"
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: String, user_agent: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ProductLookup(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// `GET /product/{barcode}` response. `status == 1` means found.
#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    product: Option<ProductFields>,
}

#[derive(Debug, Deserialize)]
struct ProductFields {
    product_name: Option<String>,
    image_url: Option<String>,
    ingredients_text: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

fn to_domain(response: ProductResponse, requested: &str) -> Option<Product> {
    if response.status != 1 {
        return None;
    }
    let fields = response.product;
    let (name, image_url, ingredients_text) = match fields {
        Some(p) => (p.product_name, p.image_url, p.ingredients_text),
        None => (None, None, None),
    };
    Some(Product {
        barcode: non_empty(response.code).unwrap_or_else(|| requested.to_string()),
        name: non_empty(name),
        image_url: non_empty(image_url),
        ingredients_text: non_empty(ingredients_text),
    })
}

#[async_trait::async_trait]
impl ProductCatalogPort for OpenFoodFactsAdapter {
    async fn get_product(&self, barcode: &str) -> Result<Option<Product>, DomainError> {
        let url = format!("{}/product/{}", self.base_url, barcode);
        debug!(url = %url, "looking up product");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::ProductLookup(format!("Request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, barcode, "Open Food Facts returned error");
            return Err(DomainError::ProductLookup(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: ProductResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ProductLookup(format!("Failed to parse response: {}", e)))?;

        Ok(to_domain(body, barcode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_product_maps_fields() {
        let json = r#"{
            "code": "5449000000996",
            "status": 1,
            "product": {
                "product_name": "Oat Crackers",
                "image_url": "https://images.example/oat.jpg",
                "ingredients_text": "Oats, sunflower oil, salt"
            }
        }"#;
        let body: ProductResponse = serde_json::from_str(json).unwrap();
        let p = to_domain(body, "5449000000996").unwrap();
        assert_eq!(p.barcode, "5449000000996");
        assert_eq!(p.name.as_deref(), Some("Oat Crackers"));
        assert_eq!(p.ingredients_text.as_deref(), Some("Oats, sunflower oil, salt"));
    }

    #[test]
    fn test_not_found_status() {
        let json = r#"{"code": "000", "status": 0, "status_verbose": "product not found"}"#;
        let body: ProductResponse = serde_json::from_str(json).unwrap();
        assert!(to_domain(body, "000").is_none());
    }

    #[test]
    fn test_blank_fields_become_none() {
        let json = r#"{"status": 1, "product": {"product_name": "", "ingredients_text": "  "}}"#;
        let body: ProductResponse = serde_json::from_str(json).unwrap();
        let p = to_domain(body, "42").unwrap();
        assert_eq!(p.barcode, "42");
        assert!(p.name.is_none());
        assert!(p.ingredients_text.is_none());
    }
}
