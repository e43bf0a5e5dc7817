//! Day overview: fasting rule, active/next fast, Lent countdown and tip of the day.

use crate::domain::{
    ActiveFastingPeriod, DomainError, FastingRuleEngine, FastingRuleResult, LentStatus,
    UpcomingFastingPeriod, daily_tip, ensure_supported_year, lent_status, next_pascha,
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

/// Everything the home screen shows for one date.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub rule: FastingRuleResult,
    pub active: Option<ActiveFastingPeriod>,
    pub next: Option<UpcomingFastingPeriod>,
    pub lent: Option<LentStatus>,
    pub next_pascha: Option<NaiveDate>,
    pub tip: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct CalendarService {
    engine: FastingRuleEngine,
}

impl CalendarService {
    pub fn new(engine: FastingRuleEngine) -> Self {
        Self { engine }
    }

    /// Summary for the local calendar date.
    pub fn today(&self) -> Result<DaySummary, DomainError> {
        self.summary(Local::now().date_naive())
    }

    /// Summary for `date`. Years outside the Pascha offset table are rejected.
    pub fn summary(&self, date: NaiveDate) -> Result<DaySummary, DomainError> {
        ensure_supported_year(date.year())?;
        let rule = self.engine.evaluate(date);
        info!(%date, level = %rule.level, reason = rule.reason, "fasting rule");
        Ok(DaySummary {
            date,
            active: self.engine.active_fasting_period(date),
            next: self.engine.next_fasting_period(date),
            lent: lent_status(date),
            next_pascha: next_pascha(date),
            tip: daily_tip(date),
            rule,
        })
    }

    /// Parse `YYYY-MM-DD` and summarize it.
    pub fn summary_for_input(&self, input: &str) -> Result<DaySummary, DomainError> {
        let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|e| DomainError::InvalidInput(format!("expected YYYY-MM-DD: {}", e)))?;
        self.summary(date)
    }
}
