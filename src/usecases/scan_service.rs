//! Product scan: barcode -> product lookup -> classify ingredients -> record history.
//!
//! - Missing products surface as `ProductNotFound`
//! - Missing ingredient text classifies as `caution`, never `safe`
//! - History failures are logged, not fatal to the scan

use crate::domain::{
    ClassificationResult, DomainError, IngredientClassifier, Product, ScanHistoryEntry,
};
use crate::ports::{HistoryPort, ProductCatalogPort};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Product plus its fasting verdict.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub product: Product,
    pub classification: ClassificationResult,
}

/// Scan service. Coordinates product lookup, classification and history.
pub struct ScanService {
    catalog: Arc<dyn ProductCatalogPort>,
    history: Arc<dyn HistoryPort>,
    classifier: Arc<IngredientClassifier>,
}

impl ScanService {
    pub fn new(
        catalog: Arc<dyn ProductCatalogPort>,
        history: Arc<dyn HistoryPort>,
        classifier: Arc<IngredientClassifier>,
    ) -> Self {
        Self {
            catalog,
            history,
            classifier,
        }
    }

    /// Look up and classify a product by barcode.
    pub async fn scan_barcode(&self, barcode: &str) -> Result<ScanOutcome, DomainError> {
        let barcode = normalize_barcode(barcode)?;

        let product = self
            .catalog
            .get_product(&barcode)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(barcode.clone()))?;

        let classification = self
            .classifier
            .classify_optional(product.ingredients_text.as_deref());

        info!(
            barcode = %barcode,
            product = product.display_name(),
            verdict = ?classification.verdict,
            flagged = classification.flagged_ingredients.len(),
            "scanned product"
        );

        let entry = ScanHistoryEntry {
            barcode: product.barcode.clone(),
            product_name: product.display_name().to_string(),
            verdict: classification.verdict,
            scanned_at: Utc::now(),
        };
        if let Err(e) = self.history.record(entry).await {
            warn!(barcode = %barcode, error = %e, "failed to record scan history");
        }

        Ok(ScanOutcome {
            product,
            classification,
        })
    }

    /// Classify pasted ingredient text without any lookup.
    pub fn check_text(&self, ingredients_text: &str) -> ClassificationResult {
        self.classifier.classify(ingredients_text)
    }

    pub async fn history(&self) -> Result<Vec<ScanHistoryEntry>, DomainError> {
        self.history.list().await
    }

    pub async fn clear_history(&self) -> Result<(), DomainError> {
        self.history.clear().await?;
        info!("scan history cleared");
        Ok(())
    }
}

/// Trimmed barcode; digits only.
fn normalize_barcode(raw: &str) -> Result<String, DomainError> {
    let barcode = raw.trim();
    if barcode.is_empty() {
        return Err(DomainError::InvalidInput("barcode is empty".into()));
    }
    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidInput(format!(
            "barcode must contain only digits: {}",
            barcode
        )));
    }
    Ok(barcode.to_string())
}
