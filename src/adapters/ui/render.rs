//! Terminal rendering of fasting rules, verdicts, recipes and history.
//!
//! Text is built by pure `*_lines` functions; `print_*` adds color.

use crate::domain::countdown::LENT_COUNTDOWN_DAYS;
use crate::domain::{
    ClassificationResult, FastingRuleResult, LentStatus, RecipeSummary, ScanHistoryEntry, Verdict,
};
use crate::usecases::{DaySummary, RecipeCheck, ScanOutcome};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{Write, stdout};

const ERROR_RED: (u8, u8, u8) = (0xe5, 0x39, 0x35);
const DIM_GREY: (u8, u8, u8) = (0x9e, 0x9e, 0x9e);

/// Parse `#RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn verdict_color(verdict: Verdict) -> (u8, u8, u8) {
    match verdict {
        Verdict::Safe => (0x66, 0xbb, 0x6a),
        Verdict::NotSafe => ERROR_RED,
        Verdict::Caution => (0xff, 0xa7, 0x26),
    }
}

fn print_line(text: &str, color: Option<(u8, u8, u8)>, bold: bool) {
    let mut out = stdout();
    if let Some((r, g, b)) = color {
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
    }
    if bold {
        let _ = out.execute(SetAttribute(Attribute::Bold));
    }
    let _ = out.execute(Print(text));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print("\r\n"));
    let _ = out.flush();
}

pub fn rule_lines(rule: &FastingRuleResult) -> Vec<String> {
    let mut lines = vec![
        rule.label.to_string(),
        rule.description.to_string(),
        format!("Reason: {}", rule.reason),
    ];
    if let Some(period) = rule.period {
        lines.push(format!("Period: {}", period));
    }
    lines
}

pub fn day_summary_lines(summary: &DaySummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(active) = &summary.active {
        lines.push(format!(
            "{}: day {} of {}",
            active.name, active.day, active.total_days
        ));
    }
    if let Some(next) = &summary.next {
        lines.push(format!(
            "Next fast: {} in {} days ({})",
            next.name,
            next.days_until,
            next.start.format("%b %-d, %Y")
        ));
    }
    match summary.lent {
        Some(LentStatus::InLent {
            day,
            days_until_pascha,
        }) => lines.push(format!(
            "Great Lent countdown: day {} of {}, {} days until Pascha",
            day, LENT_COUNTDOWN_DAYS, days_until_pascha
        )),
        Some(LentStatus::Upcoming { days_until }) => {
            lines.push(format!("Great Lent starts in {} days", days_until))
        }
        None => {}
    }
    if let Some(pascha) = summary.next_pascha {
        lines.push(format!("Pascha: {}", pascha.format("%b %-d, %Y")));
    }
    lines.push(format!("Tip: {}", summary.tip));
    lines
}

pub fn classification_lines(result: &ClassificationResult) -> Vec<String> {
    let mut lines = vec![result.verdict.label().to_string()];
    for f in &result.flagged_ingredients {
        lines.push(format!("  ✗ {} ({})", f.keyword, f.category.label()));
    }
    for a in &result.ambiguous_ingredients {
        lines.push(format!("  ? {} (may be animal-derived)", a));
    }
    if result.verdict == Verdict::Caution
        && result.flagged_ingredients.is_empty()
        && result.ambiguous_ingredients.is_empty()
    {
        lines.push("  No ingredient information available".to_string());
    }
    lines
}

pub fn recipe_lines(recipes: &[RecipeSummary]) -> Vec<String> {
    recipes
        .iter()
        .map(|r| {
            let mut meta = Vec::new();
            if let Some(m) = r.ready_in_minutes {
                meta.push(format!("{} min", m));
            }
            if let Some(p) = r.protein_grams {
                meta.push(format!("{:.0}g protein", p));
            }
            if let Some(c) = r.calories {
                meta.push(format!("{:.0} kcal", c));
            }
            if meta.is_empty() {
                format!("[{}] {}", r.id, r.title)
            } else {
                format!("[{}] {} ({})", r.id, r.title, meta.join(", "))
            }
        })
        .collect()
}

pub fn history_lines(entries: &[ScanHistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  {} [{}]  {}",
                e.scanned_at.format("%Y-%m-%d %H:%M"),
                e.product_name,
                e.barcode,
                e.verdict.label()
            )
        })
        .collect()
}

pub fn print_day_summary(summary: &DaySummary) {
    let color = hex_to_rgb(summary.rule.color);
    print_line(&summary.date.format("%A, %B %-d, %Y").to_string(), None, true);
    for (i, line) in rule_lines(&summary.rule).iter().enumerate() {
        print_line(line, color, i == 0);
    }
    for line in day_summary_lines(summary) {
        print_line(&line, Some(DIM_GREY), false);
    }
}

pub fn print_classification(result: &ClassificationResult) {
    let color = verdict_color(result.verdict);
    for (i, line) in classification_lines(result).iter().enumerate() {
        print_line(line, Some(color), i == 0);
    }
}

pub fn print_scan(outcome: &ScanOutcome) {
    print_line(
        &format!("{} [{}]", outcome.product.display_name(), outcome.product.barcode),
        None,
        true,
    );
    if let Some(text) = &outcome.product.ingredients_text {
        print_line(&format!("Ingredients: {}", text), Some(DIM_GREY), false);
    }
    print_classification(&outcome.classification);
}

pub fn print_recipes(recipes: &[RecipeSummary]) {
    if recipes.is_empty() {
        print_line(
            "No recipes found. Try different ingredients or filters.",
            Some(DIM_GREY),
            false,
        );
        return;
    }
    for line in recipe_lines(recipes) {
        print_line(&line, None, false);
    }
}

pub fn print_recipe_check(check: &RecipeCheck) {
    print_line(&check.detail.title, None, true);
    for line in &check.detail.ingredients {
        print_line(&format!("  • {}", line), Some(DIM_GREY), false);
    }
    print_classification(&check.classification);
    for (i, step) in check.detail.instructions.iter().enumerate() {
        print_line(&format!("{}. {}", i + 1, step), None, false);
    }
}

pub fn print_history(entries: &[ScanHistoryEntry]) {
    if entries.is_empty() {
        print_line("No scans yet.", Some(DIM_GREY), false);
        return;
    }
    for (line, entry) in history_lines(entries).iter().zip(entries) {
        print_line(line, Some(verdict_color(entry.verdict)), false);
    }
}

pub fn print_error(message: &str) {
    print_line(message, Some(ERROR_RED), true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FastLevel, FlaggedIngredient, IngredientCategory};

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#AB47BC"), Some((0xab, 0x47, 0xbc)));
        assert_eq!(hex_to_rgb("AB47BC"), None);
        assert_eq!(hex_to_rgb("#AB47"), None);
        assert_eq!(hex_to_rgb("#GG47BC"), None);
    }

    #[test]
    fn test_level_colors_parse() {
        for level in [
            FastLevel::Strict,
            FastLevel::OilWine,
            FastLevel::FishAllowed,
            FastLevel::NoFast,
        ] {
            assert!(hex_to_rgb(level.color()).is_some());
        }
    }

    #[test]
    fn test_rule_lines_with_period() {
        let rule = FastingRuleResult::new(FastLevel::Strict, "Holy Week", Some("Great Lent"));
        let lines = rule_lines(&rule);
        assert_eq!(lines[0], "Strict Fast");
        assert_eq!(lines[2], "Reason: Holy Week");
        assert_eq!(lines[3], "Period: Great Lent");
    }

    #[test]
    fn test_classification_lines() {
        let result = ClassificationResult {
            verdict: Verdict::NotSafe,
            flagged_ingredients: vec![FlaggedIngredient {
                keyword: "whey".into(),
                category: IngredientCategory::Dairy,
            }],
            ambiguous_ingredients: vec!["lecithin".into()],
        };
        let lines = classification_lines(&result);
        assert_eq!(lines[0], "Not Fasting Safe");
        assert!(lines[1].contains("whey (dairy)"));
        assert!(lines[2].contains("lecithin"));
    }

    #[test]
    fn test_unknown_classification_explains_itself() {
        let result = ClassificationResult {
            verdict: Verdict::Caution,
            flagged_ingredients: vec![],
            ambiguous_ingredients: vec![],
        };
        assert!(classification_lines(&result)[1].contains("No ingredient information"));
    }

    #[test]
    fn test_recipe_lines() {
        let r = RecipeSummary {
            id: 9,
            title: "Falafel".into(),
            image_url: None,
            ready_in_minutes: Some(25),
            protein_grams: Some(14.4),
            calories: None,
        };
        assert_eq!(recipe_lines(&[r]), vec!["[9] Falafel (25 min, 14g protein)"]);
    }
}
