//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use lent_scanner::adapters::catalog::OpenFoodFactsAdapter;
use lent_scanner::adapters::persistence::HistoryJson;
use lent_scanner::adapters::recipes::SpoonacularAdapter;
use lent_scanner::adapters::ui::tui::TuiInputPort;
use lent_scanner::domain::{IngredientClassifier, KeywordDictionary, KeywordTables};
use lent_scanner::ports::{HistoryPort, InputPort, ProductCatalogPort, RecipePort};
use lent_scanner::shared::config::AppConfig;
use lent_scanner::usecases::{CalendarService, RecipeService, ScanService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Keyword dictionary: built once, shared read-only ---
    let dictionary = load_dictionary(&cfg)?;
    info!(
        definite = dictionary.definite_len(),
        ambiguous = dictionary.ambiguous_len(),
        "keyword dictionary ready"
    );
    let classifier = Arc::new(IngredientClassifier::new(Arc::new(dictionary)));

    // --- Outbound adapters ---
    let timeout = cfg.request_timeout();
    let catalog: Arc<dyn ProductCatalogPort> = Arc::new(
        OpenFoodFactsAdapter::new(
            cfg.off_base_url_or_default(),
            &cfg.off_user_agent_or_default(),
            timeout,
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    let history_path = cfg.history_path();
    info!(path = %history_path.display(), "scan history file");
    let history_impl = HistoryJson::new(&history_path, cfg.history_limit_or_default());
    history_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let history: Arc<dyn HistoryPort> = Arc::new(history_impl);

    let recipe_service = match cfg.spoonacular_auth() {
        Some(auth) => {
            info!(base_url = %cfg.spoonacular_base_url_or_default(), "recipe search enabled");
            let adapter: Arc<dyn RecipePort> = Arc::new(
                SpoonacularAdapter::new(cfg.spoonacular_base_url_or_default(), auth, timeout)
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            Some(Arc::new(RecipeService::new(adapter, Arc::clone(&classifier))))
        }
        None => {
            warn!("SPOONACULAR_API_KEY / SPOONACULAR_PROXY_URL not set, recipe search disabled");
            None
        }
    };

    // --- Services ---
    let calendar = Arc::new(CalendarService::default());
    let scan = Arc::new(ScanService::new(catalog, history, Arc::clone(&classifier)));

    lent_scanner::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(calendar, scan, recipe_service));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// Built-in tables, or the JSON file at `keywords_path` when configured.
fn load_dictionary(cfg: &AppConfig) -> anyhow::Result<KeywordDictionary> {
    let tables = match cfg.keywords_path() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("read keywords file {}: {}", path.display(), e))?;
            info!(path = %path.display(), "using custom keyword tables");
            KeywordTables::from_json(&json).map_err(|e| anyhow::anyhow!("{}", e))?
        }
        None => KeywordTables::builtin(),
    };
    KeywordDictionary::from_tables(&tables).map_err(|e| anyhow::anyhow!("{}", e))
}
