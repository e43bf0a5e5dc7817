//! Implements InputPort. Inquire-based main menu.

use crate::adapters::ui::{progress, render};
use crate::domain::{DomainError, RecipeCategory, RecipeQuery};
use crate::ports::InputPort;
use crate::usecases::{CalendarService, RecipeService, ScanService};
use async_trait::async_trait;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const MEAL_TYPES: [&str; 6] = [
    "main course",
    "breakfast",
    "soup",
    "salad",
    "side dish",
    "snack",
];

/// Purple prompts, gold highlights. Applied once for every inquire prompt.
pub fn apply_theme() {
    let purple = Color::Rgb {
        r: 0xab,
        g: 0x47,
        b: 0xbc,
    };
    let gold = Color::Rgb {
        r: 0xd4,
        g: 0xa8,
        b: 0x43,
    };
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("✝").with_fg(purple))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(gold))
        .with_selected_option(Some(StyleSheet::new().with_fg(gold)))
        .with_answer(StyleSheet::new().with_fg(gold).with_attr(Attributes::BOLD))
        .with_help_message(StyleSheet::new().with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Today,
    CheckDate,
    ScanBarcode,
    CheckText,
    SearchRecipes,
    PopularRecipes,
    RecipesByCategory,
    CheckRecipe,
    History,
    ClearHistory,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MenuItem::Today => "Today's fast rule",
            MenuItem::CheckDate => "Check a date",
            MenuItem::ScanBarcode => "Scan a barcode",
            MenuItem::CheckText => "Check ingredient text",
            MenuItem::SearchRecipes => "Search recipes",
            MenuItem::PopularRecipes => "Popular recipes",
            MenuItem::RecipesByCategory => "Recipes by category",
            MenuItem::CheckRecipe => "Check a recipe by id",
            MenuItem::History => "Scan history",
            MenuItem::ClearHistory => "Clear history",
            MenuItem::Quit => "Quit",
        };
        f.write_str(s)
    }
}

fn menu_items(recipes_enabled: bool) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::Today,
        MenuItem::CheckDate,
        MenuItem::ScanBarcode,
        MenuItem::CheckText,
    ];
    if recipes_enabled {
        items.extend([
            MenuItem::SearchRecipes,
            MenuItem::PopularRecipes,
            MenuItem::RecipesByCategory,
            MenuItem::CheckRecipe,
        ]);
    }
    items.extend([MenuItem::History, MenuItem::ClearHistory, MenuItem::Quit]);
    items
}

/// Comma-separated ingredient input to a list. Normalization happens in the service.
fn split_ingredients(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

/// Empty input means no limit.
fn parse_max_minutes(input: &str) -> Result<Option<u32>, DomainError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(DomainError::InvalidInput(format!(
            "max ready time must be a positive number of minutes: {}",
            input
        ))),
    }
}

/// Outcome of a sub-prompt: a value, or the user backed out with Esc.
fn prompt_result<T>(res: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

/// TUI adapter. Recipe items only appear when a recipe backend is configured.
pub struct TuiInputPort {
    calendar: Arc<CalendarService>,
    scan: Arc<ScanService>,
    recipes: Option<Arc<RecipeService>>,
}

impl TuiInputPort {
    pub fn new(
        calendar: Arc<CalendarService>,
        scan: Arc<ScanService>,
        recipes: Option<Arc<RecipeService>>,
    ) -> Self {
        Self {
            calendar,
            scan,
            recipes,
        }
    }

    fn recipes(&self) -> Result<&RecipeService, DomainError> {
        self.recipes.as_deref().ok_or_else(|| {
            DomainError::RecipeSearch(
                "recipe search is not configured (set SPOONACULAR_API_KEY or SPOONACULAR_PROXY_URL)"
                    .into(),
            )
        })
    }

    async fn handle(&self, item: MenuItem) -> Result<(), DomainError> {
        match item {
            MenuItem::Today => {
                let summary = self.calendar.today()?;
                render::print_day_summary(&summary);
            }
            MenuItem::CheckDate => {
                let Some(input) = prompt_result(
                    Text::new("Date (YYYY-MM-DD):")
                        .with_help_message("Years 1800 to 2099")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                let summary = self.calendar.summary_for_input(&input)?;
                render::print_day_summary(&summary);
            }
            MenuItem::ScanBarcode => {
                let Some(barcode) = prompt_result(Text::new("Barcode:").prompt())? else {
                    return Ok(());
                };
                let outcome =
                    progress::with_spinner("Looking up product...", self.scan.scan_barcode(&barcode))
                        .await?;
                render::print_scan(&outcome);
            }
            MenuItem::CheckText => {
                let Some(text) = prompt_result(Text::new("Ingredients:").prompt())? else {
                    return Ok(());
                };
                render::print_classification(&self.scan.check_text(&text));
            }
            MenuItem::SearchRecipes => {
                let recipes = self.recipes()?;
                let Some(input) = prompt_result(
                    Text::new("Ingredients you have:")
                        .with_help_message("Comma separated, e.g. lentils, onion, garlic")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                let Some(high_protein) = prompt_result(
                    Confirm::new("High protein only?")
                        .with_default(false)
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                let mut meal_options = vec!["any"];
                meal_options.extend(MEAL_TYPES);
                let Some(meal) = prompt_result(Select::new("Meal type:", meal_options).prompt())?
                else {
                    return Ok(());
                };
                let Some(max_input) = prompt_result(
                    Text::new("Max ready time (minutes):")
                        .with_help_message("Leave empty for no limit")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                let query = RecipeQuery {
                    ingredients: split_ingredients(&input),
                    high_protein,
                    meal_type: (meal != "any").then(|| meal.to_string()),
                    max_ready_time: parse_max_minutes(&max_input)?,
                };
                let results =
                    progress::with_spinner("Searching recipes...", recipes.search(query)).await?;
                render::print_recipes(&results);
            }
            MenuItem::PopularRecipes => {
                let results =
                    progress::with_spinner("Loading recipes...", self.recipes()?.popular())
                        .await?;
                render::print_recipes(&results);
            }
            MenuItem::RecipesByCategory => {
                let recipes = self.recipes()?;
                let mut options = vec!["high-protein", "quick"];
                options.extend(MEAL_TYPES);
                let Some(choice) =
                    prompt_result(Select::new("Category:", options).prompt())?
                else {
                    return Ok(());
                };
                let category = RecipeCategory::parse(choice);
                let results =
                    progress::with_spinner("Loading recipes...", recipes.by_category(&category))
                        .await?;
                render::print_recipes(&results);
            }
            MenuItem::CheckRecipe => {
                let recipes = self.recipes()?;
                let Some(input) = prompt_result(Text::new("Recipe id:").prompt())? else {
                    return Ok(());
                };
                let id: u64 = input
                    .trim()
                    .parse()
                    .map_err(|_| DomainError::InvalidInput(format!("not a recipe id: {}", input)))?;
                let check =
                    progress::with_spinner("Checking recipe...", recipes.check_recipe(id)).await?;
                render::print_recipe_check(&check);
            }
            MenuItem::History => {
                render::print_history(&self.scan.history().await?);
            }
            MenuItem::ClearHistory => {
                let confirmed = prompt_result(
                    Confirm::new("Clear all scan history?")
                        .with_default(false)
                        .prompt(),
                )?
                .unwrap_or(false);
                if confirmed {
                    self.scan.clear_history().await?;
                }
            }
            MenuItem::Quit => {}
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let items = menu_items(self.recipes.is_some());
        loop {
            let choice = match Select::new("What would you like to do?", items.clone())
                .with_page_size(items.len())
                .prompt()
            {
                Ok(item) => item,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };
            if choice == MenuItem::Quit {
                break;
            }
            debug!(item = %choice, "menu action");
            if let Err(e) = self.handle(choice).await {
                warn!(item = %choice, error = %e, "menu action failed");
                render::print_error(&e.to_string());
            }
            println!();
        }
        Ok(())
    }
}
