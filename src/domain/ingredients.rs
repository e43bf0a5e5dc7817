//! Ingredient classifier. Scans free-text ingredient lists for animal-derived
//! or ambiguous substances and derives a fasting verdict.
//!
//! Matching is whole-word/phrase and case-insensitive: "butter" flags
//! "sugar, butter, flour" but not "butternut squash".

use crate::domain::DomainError;
use crate::domain::keywords::KeywordTables;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientCategory {
    Meat,
    Dairy,
    Eggs,
    Fish,
    OtherAnimal,
    Ambiguous,
}

impl IngredientCategory {
    pub fn label(self) -> &'static str {
        match self {
            IngredientCategory::Meat => "meat",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Eggs => "eggs",
            IngredientCategory::Fish => "fish",
            IngredientCategory::OtherAnimal => "other animal",
            IngredientCategory::Ambiguous => "ambiguous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Safe,
    NotSafe,
    Caution,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Safe => "Fasting Safe",
            Verdict::NotSafe => "Not Fasting Safe",
            Verdict::Caution => "Use Caution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedIngredient {
    pub keyword: String,
    pub category: IngredientCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub verdict: Verdict,
    pub flagged_ingredients: Vec<FlaggedIngredient>,
    pub ambiguous_ingredients: Vec<String>,
}

impl ClassificationResult {
    fn unknown() -> Self {
        Self {
            verdict: Verdict::Caution,
            flagged_ingredients: Vec::new(),
            ambiguous_ingredients: Vec::new(),
        }
    }
}

fn boundary_pattern(keyword: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
}

/// Case-insensitive whole-word/phrase match of `keyword` in `text`.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    boundary_pattern(keyword)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// One keyword with its pre-compiled boundary matcher.
#[derive(Debug, Clone)]
struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    fn new(keyword: String) -> Result<Self, DomainError> {
        let pattern = boundary_pattern(&keyword)
            .map_err(|e| DomainError::Keywords(format!("keyword {:?}: {}", keyword, e)))?;
        Ok(Self { keyword, pattern })
    }

    fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Immutable keyword dictionary. Build once, share via `Arc`.
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    definite: Vec<(KeywordMatcher, IngredientCategory)>,
    ambiguous: Vec<KeywordMatcher>,
}

impl KeywordDictionary {
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_tables(&KeywordTables::builtin())
    }

    /// Compile tables into matchers. Keywords are trimmed and lowercased; a
    /// repeated keyword keeps its first position and takes the last category.
    pub fn from_tables(tables: &KeywordTables) -> Result<Self, DomainError> {
        let groups = [
            (&tables.meat, IngredientCategory::Meat),
            (&tables.dairy, IngredientCategory::Dairy),
            (&tables.eggs, IngredientCategory::Eggs),
            (&tables.fish, IngredientCategory::Fish),
            (&tables.other_animal, IngredientCategory::OtherAnimal),
        ];

        let mut order: Vec<(String, IngredientCategory)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (list, category) in groups {
            for raw in list {
                let keyword = raw.trim().to_lowercase();
                if keyword.is_empty() {
                    continue;
                }
                match index.get(&keyword) {
                    Some(&i) => order[i].1 = category,
                    None => {
                        index.insert(keyword.clone(), order.len());
                        order.push((keyword, category));
                    }
                }
            }
        }

        let definite = order
            .into_iter()
            .map(|(k, c)| KeywordMatcher::new(k).map(|m| (m, c)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = std::collections::HashSet::new();
        let ambiguous = tables
            .ambiguous
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .map(KeywordMatcher::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            definite,
            ambiguous,
        })
    }

    pub fn definite_len(&self) -> usize {
        self.definite.len()
    }

    pub fn ambiguous_len(&self) -> usize {
        self.ambiguous.len()
    }

    /// Category of a definite keyword, if present.
    pub fn category_of(&self, keyword: &str) -> Option<IngredientCategory> {
        let keyword = keyword.trim().to_lowercase();
        self.definite
            .iter()
            .find(|(m, _)| m.keyword == keyword)
            .map(|(_, c)| *c)
    }
}

/// Classifies ingredient text against a shared `KeywordDictionary`.
#[derive(Debug, Clone)]
pub struct IngredientClassifier {
    dictionary: Arc<KeywordDictionary>,
}

impl IngredientClassifier {
    pub fn new(dictionary: Arc<KeywordDictionary>) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    /// Missing ingredient data is unknown, not safe.
    pub fn classify_optional(&self, ingredients_text: Option<&str>) -> ClassificationResult {
        match ingredients_text {
            Some(text) => self.classify(text),
            None => ClassificationResult::unknown(),
        }
    }

    pub fn classify(&self, ingredients_text: &str) -> ClassificationResult {
        if ingredients_text.trim().is_empty() {
            return ClassificationResult::unknown();
        }

        let normalized = ingredients_text.to_lowercase();

        let flagged: Vec<FlaggedIngredient> = self
            .dictionary
            .definite
            .iter()
            .filter(|(m, _)| m.is_match(&normalized))
            .map(|(m, category)| FlaggedIngredient {
                keyword: m.keyword.clone(),
                category: *category,
            })
            .collect();

        let ambiguous: Vec<String> = self
            .dictionary
            .ambiguous
            .iter()
            .filter(|m| m.is_match(&normalized))
            .map(|m| m.keyword.clone())
            .collect();

        let verdict = if !flagged.is_empty() {
            Verdict::NotSafe
        } else if !ambiguous.is_empty() {
            Verdict::Caution
        } else {
            Verdict::Safe
        };

        debug!(
            verdict = ?verdict,
            flagged = flagged.len(),
            ambiguous = ambiguous.len(),
            "classified ingredients"
        );

        ClassificationResult {
            verdict,
            flagged_ingredients: flagged,
            ambiguous_ingredients: ambiguous,
        }
    }
}
