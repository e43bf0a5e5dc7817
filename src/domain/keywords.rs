//! Keyword tables for ingredient classification.
//!
//! Built-in lists ship with the binary; a JSON file with the same shape can
//! replace them at startup (see `AppConfig::keywords_path`).

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};

const MEAT: &[&str] = &[
    "beef", "chicken", "pork", "lamb", "turkey", "veal", "bacon", "sausage", "pepperoni",
    "salami", "prosciutto", "ham", "venison", "bison", "duck", "goose", "rabbit", "meat",
    "poultry", "steak", "ground beef", "ground turkey", "ground pork", "hot dog", "jerky",
    "deli meat", "chorizo", "bratwurst", "pastrami", "corned beef",
];

const DAIRY: &[&str] = &[
    "milk", "cheese", "butter", "cream", "whey", "casein", "caseinate", "lactose", "yogurt",
    "yoghurt", "ghee", "curds", "sour cream", "cream cheese", "cottage cheese", "ricotta",
    "mozzarella", "parmesan", "cheddar", "gouda", "brie", "buttermilk", "half and half",
    "heavy cream", "whipping cream", "condensed milk", "evaporated milk", "milk powder",
    "skim milk", "whole milk", "milk solids", "milk protein", "lactalbumin", "lactoglobulin",
];

const EGGS: &[&str] = &[
    "egg", "eggs", "egg white", "egg yolk", "albumin", "ovum", "ovalbumin", "lysozyme",
    "meringue", "mayonnaise", "mayo", "egg powder", "dried egg", "egg solids",
];

const FISH: &[&str] = &[
    "fish", "salmon", "tuna", "cod", "tilapia", "halibut", "haddock", "sardine", "sardines",
    "anchovy", "anchovies", "herring", "mackerel", "trout", "bass", "catfish", "swordfish",
    "shrimp", "prawn", "prawns", "crab", "lobster", "oyster", "oysters", "clam", "clams",
    "mussel", "mussels", "scallop", "scallops", "squid", "calamari", "octopus", "caviar",
    "fish sauce", "fish oil", "omega-3 fish", "surimi", "imitation crab",
];

const OTHER_ANIMAL: &[&str] = &[
    "gelatin", "gelatine", "honey", "lard", "tallow", "suet", "beeswax", "carmine",
    "cochineal", "shellac", "lanolin", "collagen", "bone char", "bone broth", "animal fat",
    "animal shortening", "rennet", "isinglass", "pepsin", "vitamin d3",
];

const AMBIGUOUS: &[&str] = &[
    "natural flavors", "natural flavor", "natural flavoring", "natural flavouring",
    "mono and diglycerides", "monoglycerides", "diglycerides", "enzyme", "enzymes",
    "lecithin", "stearic acid", "glycerin", "glycerine", "glycerol", "l-cysteine",
    "confectioner's glaze", "magnesium stearate",
];

/// Raw keyword lists per category. Serialized shape of the keywords file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTables {
    #[serde(default)]
    pub meat: Vec<String>,
    #[serde(default)]
    pub dairy: Vec<String>,
    #[serde(default)]
    pub eggs: Vec<String>,
    #[serde(default)]
    pub fish: Vec<String>,
    #[serde(default)]
    pub other_animal: Vec<String>,
    #[serde(default)]
    pub ambiguous: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl KeywordTables {
    pub fn builtin() -> Self {
        Self {
            meat: owned(MEAT),
            dairy: owned(DAIRY),
            eggs: owned(EGGS),
            fish: owned(FISH),
            other_animal: owned(OTHER_ANIMAL),
            ambiguous: owned(AMBIGUOUS),
        }
    }

    /// Parse a keywords file. Missing categories are empty.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::Keywords(e.to_string()))
    }
}
