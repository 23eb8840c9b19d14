use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveTime, Utc};

use weathereyes_domain::Millis;

/// Once-a-day slot for the summary alert, evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// Parses `HH:MM`.
    pub fn parse(raw: &str) -> Result<Self> {
        let at = NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .with_context(|| format!("invalid daily summary time {raw:?}, expected HH:MM"))?;
        Ok(Self { at })
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// Most recent slot at or before `now`.
    pub fn last_slot(&self, now: Millis) -> Millis {
        let now = to_datetime(now);
        let today = now.date_naive().and_time(self.at).and_utc();
        let slot = if today <= now {
            today
        } else {
            now.date_naive()
                .checked_sub_days(Days::new(1))
                .map(|day| day.and_time(self.at).and_utc())
                .unwrap_or(today)
        };
        slot.timestamp_millis()
    }

    /// Whether a summary is owed at `now` given when the last one was made.
    /// Without a previous summary, only today's slot counts, so a fresh
    /// start before the slot waits for it.
    pub fn is_due(&self, last_summary_at: Option<Millis>, now: Millis) -> bool {
        let slot = self.last_slot(now);
        match last_summary_at {
            Some(last) => last < slot,
            None => {
                let today = to_datetime(now).date_naive().and_time(self.at).and_utc();
                today.timestamp_millis() <= now
            }
        }
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            at: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        }
    }
}

fn to_datetime(millis: Millis) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, day: u32) -> Millis {
        Utc.with_ymd_and_hms(2024, 5, day, h, m, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(DailySchedule::parse("8 o'clock").is_err());
        assert_eq!(
            DailySchedule::parse("07:30").unwrap().at(),
            NaiveTime::from_hms_opt(7, 30, 0).unwrap()
        );
    }

    #[test]
    fn last_slot_rolls_back_a_day_before_the_time() {
        let schedule = DailySchedule::default();
        assert_eq!(schedule.last_slot(at(9, 0, 10)), at(8, 0, 10));
        assert_eq!(schedule.last_slot(at(7, 0, 10)), at(8, 0, 9));
    }

    #[test]
    fn due_once_per_day() {
        let schedule = DailySchedule::default();
        assert!(!schedule.is_due(None, at(7, 59, 10)));
        assert!(schedule.is_due(None, at(8, 0, 10)));
        assert!(!schedule.is_due(Some(at(8, 1, 10)), at(20, 0, 10)));
        assert!(schedule.is_due(Some(at(8, 1, 10)), at(8, 5, 11)));
    }
}
