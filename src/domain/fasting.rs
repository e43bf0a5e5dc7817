//! Fasting levels, periods and the per-year liturgical calendar.
//!
//! Everything here is a plain value computed from a civil year and its Pascha.
//! Nothing is persisted; callers rebuild a `LiturgicalYear` whenever they need one.

use crate::domain::pascha::compute_pascha;
use chrono::{Days, NaiveDate};
use serde::Serialize;

pub const GREAT_LENT: &str = "Great Lent";
pub const HOLY_WEEK: &str = "Holy Week";
pub const CHEESEFARE_WEEK: &str = "Cheesefare Week";
pub const BRIGHT_WEEK: &str = "Bright Week";
pub const TRINITY_WEEK: &str = "Trinity Week";
pub const CHRISTMASTIDE: &str = "Christmastide";
pub const PUBLICAN_AND_PHARISEE: &str = "Week of the Publican & Pharisee";
pub const APOSTLES_FAST: &str = "Apostles' Fast";
pub const DORMITION_FAST: &str = "Dormition Fast";
pub const NATIVITY_FAST: &str = "Nativity Fast";

/// Permission tier for a day, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FastLevel {
    Strict,
    OilWine,
    FishAllowed,
    NoFast,
}

impl FastLevel {
    pub fn key(self) -> &'static str {
        match self {
            FastLevel::Strict => "strict",
            FastLevel::OilWine => "oilWine",
            FastLevel::FishAllowed => "fishAllowed",
            FastLevel::NoFast => "noFast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FastLevel::Strict => "Strict Fast",
            FastLevel::OilWine => "Oil & Wine Allowed",
            FastLevel::FishAllowed => "Fish Allowed",
            FastLevel::NoFast => "No Fast Today",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FastLevel::Strict => "No meat, dairy, eggs, fish, oil, or wine",
            FastLevel::OilWine => "No meat, dairy, eggs, or fish",
            FastLevel::FishAllowed => "No meat, dairy, or eggs",
            FastLevel::NoFast => "All foods permitted",
        }
    }

    /// Category color as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            FastLevel::Strict => "#AB47BC",
            FastLevel::OilWine => "#7E57C2",
            FastLevel::FishAllowed => "#42A5F5",
            FastLevel::NoFast => "#66BB6A",
        }
    }
}

impl std::fmt::Display for FastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Named inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FastingPeriod {
    pub name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FastingPeriod {
    pub fn new(name: &'static str, start: NaiveDate, end: NaiveDate) -> Self {
        Self { name, start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Apostles' Fast collapses (start >= end) when Pascha is very late.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Inclusive length in days.
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A single day that overrides the level of whatever encloses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialDay {
    pub name: &'static str,
    pub date: NaiveDate,
    pub level: FastLevel,
}

/// Outcome of rule evaluation for one date. Ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastingRuleResult {
    pub level: FastLevel,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Specific rule that matched, e.g. "Holy Week" or "Wednesday fast".
    pub reason: &'static str,
    /// Enclosing canonical fast, if any.
    pub period: Option<&'static str>,
}

impl FastingRuleResult {
    pub fn new(level: FastLevel, reason: &'static str, period: Option<&'static str>) -> Self {
        Self {
            level,
            label: level.label(),
            description: level.description(),
            color: level.color(),
            reason,
            period,
        }
    }

    /// Same level, different label/description (Cheesefare "No Meat").
    pub fn with_display(mut self, label: &'static str, description: &'static str) -> Self {
        self.label = label;
        self.description = description;
        self
    }
}

/// Canonical fast currently in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFastingPeriod {
    pub name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// 1-based day within the period.
    pub day: i64,
    pub total_days: i64,
}

/// Nearest canonical fast that has not started yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingFastingPeriod {
    pub name: &'static str,
    pub start: NaiveDate,
    pub days_until: i64,
}

/// All periods of one civil year, derived from that year's Pascha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiturgicalYear {
    pub year: i32,
    pub pascha: NaiveDate,
    pub great_lent: FastingPeriod,
    pub holy_week: FastingPeriod,
    pub cheesefare: FastingPeriod,
    pub bright_week: FastingPeriod,
    pub trinity_week: FastingPeriod,
    pub publican_and_pharisee: FastingPeriod,
    pub christmastide: FastingPeriod,
    pub apostles_fast: FastingPeriod,
    pub dormition_fast: FastingPeriod,
    pub nativity_fast: FastingPeriod,
    pub relaxed_days: [SpecialDay; 3],
    pub single_fast_days: [SpecialDay; 3],
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `date` shifted by a signed number of days.
pub(crate) fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

impl LiturgicalYear {
    /// Builds the calendar for `year`. `None` only at the edges of `chrono`'s range.
    pub fn new(year: i32) -> Option<Self> {
        let p = compute_pascha(year)?;
        let pentecost = shift(p, 49)?;
        let all_saints_monday = shift(pentecost, 8)?;

        Some(Self {
            year,
            pascha: p,
            great_lent: FastingPeriod::new(GREAT_LENT, shift(p, -48)?, shift(p, -1)?),
            holy_week: FastingPeriod::new(HOLY_WEEK, shift(p, -6)?, shift(p, -1)?),
            cheesefare: FastingPeriod::new(CHEESEFARE_WEEK, shift(p, -55)?, shift(p, -49)?),
            bright_week: FastingPeriod::new(BRIGHT_WEEK, p, shift(p, 6)?),
            trinity_week: FastingPeriod::new(TRINITY_WEEK, pentecost, shift(pentecost, 6)?),
            publican_and_pharisee: FastingPeriod::new(
                PUBLICAN_AND_PHARISEE,
                shift(p, -69)?,
                shift(p, -63)?,
            ),
            christmastide: FastingPeriod::new(
                CHRISTMASTIDE,
                ymd(year, 12, 25)?,
                ymd(year.checked_add(1)?, 1, 4)?,
            ),
            apostles_fast: FastingPeriod::new(APOSTLES_FAST, all_saints_monday, ymd(year, 6, 28)?),
            dormition_fast: FastingPeriod::new(DORMITION_FAST, ymd(year, 8, 1)?, ymd(year, 8, 14)?),
            nativity_fast: FastingPeriod::new(NATIVITY_FAST, ymd(year, 11, 15)?, ymd(year, 12, 24)?),
            relaxed_days: [
                SpecialDay {
                    name: "Annunciation",
                    date: ymd(year, 3, 25)?,
                    level: FastLevel::FishAllowed,
                },
                SpecialDay {
                    name: "Palm Sunday",
                    date: shift(p, -7)?,
                    level: FastLevel::FishAllowed,
                },
                SpecialDay {
                    name: "Lazarus Saturday",
                    date: shift(p, -8)?,
                    level: FastLevel::FishAllowed,
                },
            ],
            single_fast_days: [
                SpecialDay {
                    name: "Theophany Eve",
                    date: ymd(year, 1, 5)?,
                    level: FastLevel::Strict,
                },
                SpecialDay {
                    name: "Beheading of St. John",
                    date: ymd(year, 8, 29)?,
                    level: FastLevel::Strict,
                },
                SpecialDay {
                    name: "Elevation of the Cross",
                    date: ymd(year, 9, 14)?,
                    level: FastLevel::Strict,
                },
            ],
        })
    }

    /// Fast-free intervals: no fasting even on Wednesday or Friday.
    pub fn fast_free_weeks(&self) -> [FastingPeriod; 4] {
        [
            self.bright_week,
            self.trinity_week,
            self.christmastide,
            self.publican_and_pharisee,
        ]
    }

    /// The four canonical fasts, whether or not they are valid this year.
    pub fn canonical_fasts(&self) -> [FastingPeriod; 4] {
        [
            self.great_lent,
            self.apostles_fast,
            self.dormition_fast,
            self.nativity_fast,
        ]
    }
}
