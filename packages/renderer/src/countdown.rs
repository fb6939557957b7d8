//! Countdown arithmetic against the injected render instant.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use letter_schema::WeddingInfo;
use serde::{Deserialize, Serialize};

/// Time remaining until (or elapsed since) the wedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// `target <= now`; the exact wedding moment already counts as past
    pub is_past: bool,
}

impl Countdown {
    pub fn between(target: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> Self {
        let remaining = (target - now).num_seconds();
        let total = remaining.abs();

        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
            is_past: remaining <= 0,
        }
    }

    /// Whole days since the wedding, 0 before it
    pub fn days_since(&self) -> i64 {
        if self.is_past {
            self.days
        } else {
            0
        }
    }
}

/// The wedding moment in `offset`; a missing time means midnight
pub fn wedding_datetime(
    wedding: &WeddingInfo,
    offset: &FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(wedding.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
    let time = wedding
        .time
        .as_deref()
        .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);

    date.and_time(time).and_local_timezone(*offset).single()
}
