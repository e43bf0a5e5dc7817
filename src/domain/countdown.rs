//! Lent countdown and the daily fasting tip.
//!
//! "Lent" here is the 55-day run from the start of Cheesefare Week up to (but
//! not including) Pascha, which is what the countdown widget shows.

use crate::domain::fasting::shift;
use crate::domain::pascha::compute_pascha;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Days from the start of Cheesefare Week to Pascha.
pub const LENT_COUNTDOWN_DAYS: i64 = 55;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LentStatus {
    InLent { day: i64, days_until_pascha: i64 },
    Upcoming { days_until: i64 },
}

fn lent_span(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let pascha = compute_pascha(year)?;
    Some((shift(pascha, -LENT_COUNTDOWN_DAYS)?, pascha))
}

/// Where `date` sits relative to this year's (or next year's) Lent.
pub fn lent_status(date: NaiveDate) -> Option<LentStatus> {
    let (start, end) = lent_span(date.year())?;
    if date >= start && date < end {
        let day = (date - start).num_days() + 1;
        return Some(LentStatus::InLent {
            day,
            days_until_pascha: LENT_COUNTDOWN_DAYS - day,
        });
    }
    let next_start = if date >= end {
        lent_span(date.year() + 1)?.0
    } else {
        start
    };
    Some(LentStatus::Upcoming {
        days_until: (next_start - date).num_days(),
    })
}

/// This year's Pascha, or next year's once it has passed.
pub fn next_pascha(date: NaiveDate) -> Option<NaiveDate> {
    let pascha = compute_pascha(date.year())?;
    if date > pascha {
        compute_pascha(date.year() + 1)
    } else {
        Some(pascha)
    }
}

const FASTING_TIPS: [&str; 22] = [
    "Whey, casein, and caseinate are hidden dairy ingredients found in many processed foods.",
    "Natural flavors can sometimes be animal-derived. When in doubt, check with the manufacturer.",
    "Gelatin is made from animal bones and skin. Look for agar-agar or pectin as alternatives.",
    "Many breads contain milk, eggs, or butter. Check the ingredients carefully.",
    "Dark chocolate (70%+) is usually vegan, but milk chocolate is not fasting-safe.",
    "Honey is permitted during Orthodox fasting periods.",
    "Shellac (confectioner's glaze) is made from insects and found in some candies.",
    "Many margarines contain whey or other dairy derivatives.",
    "L-cysteine, used in some breads, can be derived from animal hair or feathers.",
    "Carmine (E120) is a red food coloring made from insects.",
    "Some wines and beers are clarified using animal-derived products like isinglass.",
    "Lecithin can be soy-based (fasting-safe) or egg-based. Check the source.",
    "Many pasta shapes are egg-free, but fresh pasta almost always contains eggs.",
    "Tahini, hummus, and baba ganoush are excellent fasting-friendly staples.",
    "Coconut milk and oat milk are great dairy alternatives for fasting periods.",
    "Nutritional yeast is a fasting-safe way to add a cheesy flavor to dishes.",
    "Check vitamins and supplements too, many capsules contain gelatin.",
    "Worcestershire sauce traditionally contains anchovies.",
    "Some sugar is processed with bone char. Look for organic or beet sugar.",
    "Fasting is not just about food. It is a spiritual discipline of self-control and prayer.",
    "The Wednesday fast commemorates the betrayal of Christ by Judas.",
    "The Friday fast commemorates the Crucifixion of Christ.",
];

/// Tip of the day, cycling by day of year.
pub fn daily_tip(date: NaiveDate) -> &'static str {
    FASTING_TIPS[date.ordinal() as usize % FASTING_TIPS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lent_status_inside() {
        // Pascha 2025 = April 20; countdown starts Feb 24.
        assert_eq!(
            lent_status(ymd(2025, 2, 24)),
            Some(LentStatus::InLent {
                day: 1,
                days_until_pascha: 54
            })
        );
        assert_eq!(
            lent_status(ymd(2025, 4, 19)),
            Some(LentStatus::InLent {
                day: 55,
                days_until_pascha: 0
            })
        );
    }

    #[test]
    fn test_lent_status_upcoming() {
        assert_eq!(
            lent_status(ymd(2025, 2, 20)),
            Some(LentStatus::Upcoming { days_until: 4 })
        );
        // Pascha itself is past this year's Lent; next start is Feb 16, 2026.
        assert_eq!(
            lent_status(ymd(2025, 4, 20)),
            Some(LentStatus::Upcoming { days_until: 302 })
        );
    }

    #[test]
    fn test_next_pascha() {
        assert_eq!(next_pascha(ymd(2025, 4, 20)), Some(ymd(2025, 4, 20)));
        assert_eq!(next_pascha(ymd(2025, 4, 21)), Some(ymd(2026, 4, 12)));
        assert_eq!(next_pascha(ymd(2025, 1, 1)), Some(ymd(2025, 4, 20)));
    }

    #[test]
    fn test_daily_tip_cycles() {
        assert_eq!(daily_tip(ymd(2025, 1, 1)), FASTING_TIPS[1]);
        assert_eq!(daily_tip(ymd(2025, 1, 22)), FASTING_TIPS[0]);
    }
}
