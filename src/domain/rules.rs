//! Fasting rule engine. Maps a calendar date to exactly one `FastingRuleResult`.
//!
//! Rules are an ordered table evaluated top to bottom; the first match wins and
//! later rules never override it. Periods are taken from the liturgical years
//! before, of and after the query date, since the Nativity Fast, Christmastide
//! and the Apostles' Fast can reach across a year boundary.

use crate::domain::fasting::{
    ActiveFastingPeriod, CHEESEFARE_WEEK, FastLevel, FastingRuleResult, GREAT_LENT,
    LiturgicalYear, UpcomingFastingPeriod, shift,
};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

/// Identifies a rule in the precedence chain, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleId {
    FastFreeWeek,
    RelaxedDay,
    GreatLent,
    Cheesefare,
    NativityFast,
    ApostlesFast,
    DormitionFast,
    SingleFastDay,
    WeeklyFast,
    Default,
}

/// Date under evaluation plus the candidate liturgical years around it.
struct DayContext {
    date: NaiveDate,
    weekday: Weekday,
    years: Vec<LiturgicalYear>,
}

impl DayContext {
    fn new(date: NaiveDate) -> Self {
        let year = date.year();
        Self {
            date,
            weekday: date.weekday(),
            years: (year - 1..=year + 1)
                .filter_map(LiturgicalYear::new)
                .collect(),
        }
    }

    fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

struct Rule {
    id: RuleId,
    apply: fn(&DayContext) -> Option<FastingRuleResult>,
}

/// Precedence chain. Order is the contract: do not reorder.
const RULES: [Rule; 10] = [
    Rule {
        id: RuleId::FastFreeWeek,
        apply: fast_free_week,
    },
    Rule {
        id: RuleId::RelaxedDay,
        apply: relaxed_day,
    },
    Rule {
        id: RuleId::GreatLent,
        apply: great_lent,
    },
    Rule {
        id: RuleId::Cheesefare,
        apply: cheesefare,
    },
    Rule {
        id: RuleId::NativityFast,
        apply: nativity_fast,
    },
    Rule {
        id: RuleId::ApostlesFast,
        apply: apostles_fast,
    },
    Rule {
        id: RuleId::DormitionFast,
        apply: dormition_fast,
    },
    Rule {
        id: RuleId::SingleFastDay,
        apply: single_fast_day,
    },
    Rule {
        id: RuleId::WeeklyFast,
        apply: weekly_fast,
    },
    Rule {
        id: RuleId::Default,
        apply: default_day,
    },
];

fn fast_free_week(ctx: &DayContext) -> Option<FastingRuleResult> {
    ctx.years
        .iter()
        .flat_map(|y| y.fast_free_weeks())
        .find(|week| week.contains(ctx.date))
        .map(|week| FastingRuleResult::new(FastLevel::NoFast, week.name, None))
}

fn relaxed_day(ctx: &DayContext) -> Option<FastingRuleResult> {
    ctx.years.iter().find_map(|y| {
        y.relaxed_days
            .iter()
            .find(|d| d.date == ctx.date && y.great_lent.contains(ctx.date))
            .map(|d| FastingRuleResult::new(d.level, d.name, Some(GREAT_LENT)))
    })
}

fn great_lent(ctx: &DayContext) -> Option<FastingRuleResult> {
    let year = ctx.years.iter().find(|y| y.great_lent.contains(ctx.date))?;
    let result = if year.holy_week.contains(ctx.date) {
        FastingRuleResult::new(FastLevel::Strict, "Holy Week", Some(GREAT_LENT))
    } else if ctx.is_weekend() {
        FastingRuleResult::new(FastLevel::OilWine, "Great Lent (weekend)", Some(GREAT_LENT))
    } else {
        FastingRuleResult::new(FastLevel::Strict, GREAT_LENT, Some(GREAT_LENT))
    };
    Some(result)
}

fn cheesefare(ctx: &DayContext) -> Option<FastingRuleResult> {
    ctx.years
        .iter()
        .any(|y| y.cheesefare.contains(ctx.date))
        .then(|| {
            FastingRuleResult::new(FastLevel::FishAllowed, CHEESEFARE_WEEK, None)
                .with_display("No Meat", "Dairy, eggs, and fish are permitted")
        })
}

fn nativity_fast(ctx: &DayContext) -> Option<FastingRuleResult> {
    let fast = ctx
        .years
        .iter()
        .map(|y| y.nativity_fast)
        .find(|p| p.contains(ctx.date))?;
    // Dec 20-24
    let final_days = shift(fast.end, -4).is_some_and(|d| ctx.date >= d);
    let result = if final_days {
        FastingRuleResult::new(FastLevel::Strict, "Nativity Fast (final days)", Some(fast.name))
    } else if ctx.is_weekend() {
        FastingRuleResult::new(FastLevel::FishAllowed, "Nativity Fast (weekend)", Some(fast.name))
    } else {
        FastingRuleResult::new(FastLevel::OilWine, fast.name, Some(fast.name))
    };
    Some(result)
}

fn apostles_fast(ctx: &DayContext) -> Option<FastingRuleResult> {
    let fast = ctx
        .years
        .iter()
        .map(|y| y.apostles_fast)
        .find(|p| p.is_valid() && p.contains(ctx.date))?;
    let result = if ctx.is_weekend() {
        FastingRuleResult::new(FastLevel::FishAllowed, "Apostles' Fast (weekend)", Some(fast.name))
    } else if matches!(ctx.weekday, Weekday::Tue | Weekday::Thu) {
        FastingRuleResult::new(FastLevel::OilWine, fast.name, Some(fast.name))
    } else {
        FastingRuleResult::new(FastLevel::Strict, fast.name, Some(fast.name))
    };
    Some(result)
}

fn dormition_fast(ctx: &DayContext) -> Option<FastingRuleResult> {
    let fast = ctx
        .years
        .iter()
        .map(|y| y.dormition_fast)
        .find(|p| p.contains(ctx.date))?;
    let result = if ctx.is_weekend() {
        FastingRuleResult::new(FastLevel::OilWine, "Dormition Fast (weekend)", Some(fast.name))
    } else {
        FastingRuleResult::new(FastLevel::Strict, fast.name, Some(fast.name))
    };
    Some(result)
}

fn single_fast_day(ctx: &DayContext) -> Option<FastingRuleResult> {
    ctx.years
        .iter()
        .flat_map(|y| y.single_fast_days)
        .find(|d| d.date == ctx.date)
        .map(|d| FastingRuleResult::new(d.level, d.name, None))
}

fn weekly_fast(ctx: &DayContext) -> Option<FastingRuleResult> {
    match ctx.weekday {
        Weekday::Wed => Some(FastingRuleResult::new(FastLevel::OilWine, "Wednesday fast", None)),
        Weekday::Fri => Some(FastingRuleResult::new(FastLevel::OilWine, "Friday fast", None)),
        _ => None,
    }
}

fn default_day(_ctx: &DayContext) -> Option<FastingRuleResult> {
    Some(FastingRuleResult::new(FastLevel::NoFast, "Regular day", None))
}

/// Stateless engine over the Orthodox fasting calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastingRuleEngine;

impl FastingRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rule ids in evaluation order.
    pub fn rule_order(&self) -> impl Iterator<Item = RuleId> {
        RULES.iter().map(|r| r.id)
    }

    /// Applicable rule for `date`.
    pub fn evaluate(&self, date: NaiveDate) -> FastingRuleResult {
        self.evaluate_traced(date).1
    }

    /// Applicable rule for `date`, with the id of the rule that matched.
    pub fn evaluate_traced(&self, date: NaiveDate) -> (RuleId, FastingRuleResult) {
        let ctx = DayContext::new(date);
        let (id, result) = RULES
            .iter()
            .find_map(|rule| (rule.apply)(&ctx).map(|r| (rule.id, r)))
            .unwrap_or_else(|| {
                (
                    RuleId::Default,
                    FastingRuleResult::new(FastLevel::NoFast, "Regular day", None),
                )
            });
        debug!(%date, rule = ?id, level = %result.level, reason = result.reason, "fasting rule matched");
        (id, result)
    }

    /// Rule for the local calendar date.
    pub fn evaluate_today(&self) -> FastingRuleResult {
        self.evaluate(Local::now().date_naive())
    }

    /// Canonical fast enclosing `date`, with 1-based day and total length.
    pub fn active_fasting_period(&self, date: NaiveDate) -> Option<ActiveFastingPeriod> {
        let year = date.year();
        (year - 1..=year)
            .filter_map(LiturgicalYear::new)
            .flat_map(|y| y.canonical_fasts())
            .find(|p| p.is_valid() && p.contains(date))
            .map(|p| ActiveFastingPeriod {
                name: p.name,
                start: p.start,
                end: p.end,
                day: (date - p.start).num_days() + 1,
                total_days: p.length_days(),
            })
    }

    /// Nearest canonical fast starting strictly after `date`.
    pub fn next_fasting_period(&self, date: NaiveDate) -> Option<UpcomingFastingPeriod> {
        let year = date.year();
        (year..=year + 1)
            .filter_map(LiturgicalYear::new)
            .flat_map(|y| y.canonical_fasts())
            .filter(|p| p.is_valid() && p.start > date)
            .min_by_key(|p| p.start)
            .map(|p| UpcomingFastingPeriod {
                name: p.name,
                start: p.start,
                days_until: (p.start - date).num_days(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fasting::{APOSTLES_FAST, DORMITION_FAST, NATIVITY_FAST};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn eval(y: i32, m: u32, d: u32) -> (RuleId, FastingRuleResult) {
        FastingRuleEngine::new().evaluate_traced(ymd(y, m, d))
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let order: Vec<RuleId> = FastingRuleEngine::new().rule_order().collect();
        assert_eq!(
            order,
            vec![
                RuleId::FastFreeWeek,
                RuleId::RelaxedDay,
                RuleId::GreatLent,
                RuleId::Cheesefare,
                RuleId::NativityFast,
                RuleId::ApostlesFast,
                RuleId::DormitionFast,
                RuleId::SingleFastDay,
                RuleId::WeeklyFast,
                RuleId::Default,
            ]
        );
    }

    #[test]
    fn test_wednesday_in_christmastide_is_not_a_fast() {
        let (id, r) = eval(2023, 12, 27);
        assert_eq!(id, RuleId::FastFreeWeek);
        assert_eq!(r.level, FastLevel::NoFast);
        assert_eq!(r.reason, "Christmastide");
        assert_eq!(r.period, None);
    }

    #[test]
    fn test_christmastide_from_previous_year() {
        // Jan 3, 2025 is a Friday inside Christmastide that started Dec 25, 2024.
        let (id, r) = eval(2025, 1, 3);
        assert_eq!(id, RuleId::FastFreeWeek);
        assert_eq!(r.reason, "Christmastide");
    }

    #[test]
    fn test_fast_free_weeks() {
        assert_eq!(eval(2025, 2, 12).1.reason, "Week of the Publican & Pharisee");
        assert_eq!(eval(2025, 4, 23).1.reason, "Bright Week");
        assert_eq!(eval(2025, 6, 11).1.reason, "Trinity Week");
        for d in [(2025, 2, 12), (2025, 4, 23), (2025, 6, 11)] {
            assert_eq!(eval(d.0, d.1, d.2).1.level, FastLevel::NoFast);
        }
    }

    #[test]
    fn test_relaxed_days_in_great_lent() {
        for (m, d, name) in [(3, 25, "Annunciation"), (4, 12, "Lazarus Saturday"), (4, 13, "Palm Sunday")] {
            let (id, r) = eval(2025, m, d);
            assert_eq!(id, RuleId::RelaxedDay);
            assert_eq!(r.level, FastLevel::FishAllowed);
            assert_eq!(r.reason, name);
            assert_eq!(r.period, Some(GREAT_LENT));
        }
    }

    #[test]
    fn test_great_lent_levels() {
        let weekday = eval(2025, 3, 4).1;
        assert_eq!(weekday.level, FastLevel::Strict);
        assert_eq!(weekday.reason, "Great Lent");

        let weekend = eval(2025, 3, 8).1;
        assert_eq!(weekend.level, FastLevel::OilWine);
        assert_eq!(weekend.reason, "Great Lent (weekend)");

        // Holy Saturday would be a weekend day but Holy Week wins.
        let holy_saturday = eval(2025, 4, 19).1;
        assert_eq!(holy_saturday.level, FastLevel::Strict);
        assert_eq!(holy_saturday.reason, "Holy Week");
        assert_eq!(eval(2025, 4, 16).1.reason, "Holy Week");
    }

    #[test]
    fn test_day_before_clean_monday_is_cheesefare() {
        // Pascha 2025 - 49 = March 2.
        let (id, r) = eval(2025, 3, 2);
        assert_eq!(id, RuleId::Cheesefare);
        assert_eq!(r.level, FastLevel::FishAllowed);
        assert_eq!(r.label, "No Meat");
        assert_eq!(r.description, "Dairy, eggs, and fish are permitted");
        assert_eq!(r.period, None);

        let (id, _) = eval(2025, 3, 3);
        assert_eq!(id, RuleId::GreatLent);
    }

    #[test]
    fn test_cheesefare_wednesday_is_not_weekly_fast() {
        let (id, r) = eval(2025, 2, 26);
        assert_eq!(id, RuleId::Cheesefare);
        assert_eq!(r.reason, CHEESEFARE_WEEK);
    }

    #[test]
    fn test_nativity_fast() {
        let weekday = eval(2025, 11, 19).1;
        assert_eq!(weekday.level, FastLevel::OilWine);
        assert_eq!(weekday.period, Some(NATIVITY_FAST));

        let weekend = eval(2025, 11, 15).1;
        assert_eq!(weekend.level, FastLevel::FishAllowed);
        assert_eq!(weekend.reason, "Nativity Fast (weekend)");

        for day in 20..=24 {
            let r = eval(2025, 12, day).1;
            assert_eq!(r.level, FastLevel::Strict, "Dec {day}");
            assert_eq!(r.reason, "Nativity Fast (final days)");
        }
        assert_eq!(eval(2025, 12, 25).1.reason, "Christmastide");
    }

    #[test]
    fn test_apostles_fast() {
        let tue = eval(2025, 6, 17).1;
        assert_eq!(tue.level, FastLevel::OilWine);
        assert_eq!(tue.period, Some(APOSTLES_FAST));

        assert_eq!(eval(2025, 6, 18).1.level, FastLevel::Strict);

        let sat = eval(2025, 6, 21).1;
        assert_eq!(sat.level, FastLevel::FishAllowed);
        assert_eq!(sat.reason, "Apostles' Fast (weekend)");
    }

    #[test]
    fn test_collapsed_apostles_fast_is_skipped() {
        // 2021: All Saints Monday = June 28 = end of the fast.
        let (id, r) = eval(2021, 6, 28);
        assert_eq!(id, RuleId::Default);
        assert_eq!(r.level, FastLevel::NoFast);
    }

    #[test]
    fn test_dormition_fast() {
        let fri = eval(2025, 8, 1).1;
        assert_eq!(fri.level, FastLevel::Strict);
        assert_eq!(fri.period, Some(DORMITION_FAST));

        let sat = eval(2025, 8, 2).1;
        assert_eq!(sat.level, FastLevel::OilWine);
        assert_eq!(sat.reason, "Dormition Fast (weekend)");
    }

    #[test]
    fn test_single_fast_days_beat_weekly_rule() {
        let (id, r) = eval(2025, 8, 29);
        assert_eq!(id, RuleId::SingleFastDay);
        assert_eq!(r.level, FastLevel::Strict);
        assert_eq!(r.reason, "Beheading of St. John");

        assert_eq!(eval(2025, 9, 14).1.reason, "Elevation of the Cross");
        assert_eq!(eval(2025, 1, 5).1.reason, "Theophany Eve");
    }

    #[test]
    fn test_weekly_fast_and_default() {
        assert_eq!(eval(2025, 10, 15).1.reason, "Wednesday fast");
        assert_eq!(eval(2025, 10, 17).1.reason, "Friday fast");
        assert_eq!(eval(2025, 10, 15).1.level, FastLevel::OilWine);

        let (id, r) = eval(2025, 10, 16);
        assert_eq!(id, RuleId::Default);
        assert_eq!(r.reason, "Regular day");
    }

    #[test]
    fn test_total_and_idempotent_over_two_years() {
        let engine = FastingRuleEngine::new();
        let mut date = ymd(2024, 1, 1);
        while date <= ymd(2025, 12, 31) {
            let first = engine.evaluate(date);
            assert!(!first.reason.is_empty());
            assert_eq!(first, engine.evaluate(date));
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_active_fasting_period() {
        let engine = FastingRuleEngine::new();

        let lent = engine.active_fasting_period(ymd(2025, 3, 10)).unwrap();
        assert_eq!(lent.name, GREAT_LENT);
        assert_eq!(lent.day, 8);
        assert_eq!(lent.total_days, 48);

        let nativity = engine.active_fasting_period(ymd(2025, 12, 24)).unwrap();
        assert_eq!(nativity.name, NATIVITY_FAST);
        assert_eq!(nativity.day, 40);
        assert_eq!(nativity.total_days, 40);

        assert!(engine.active_fasting_period(ymd(2025, 10, 16)).is_none());
    }

    #[test]
    fn test_next_fasting_period() {
        let engine = FastingRuleEngine::new();

        let next = engine.next_fasting_period(ymd(2025, 10, 18)).unwrap();
        assert_eq!(next.name, NATIVITY_FAST);
        assert_eq!(next.days_until, 28);

        let next = engine.next_fasting_period(ymd(2025, 12, 30)).unwrap();
        assert_eq!(next.name, GREAT_LENT);
        assert_eq!(next.start, ymd(2026, 2, 23));
        assert_eq!(next.days_until, 55);
    }
}
