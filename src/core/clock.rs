use chrono::{
    DateTime,
    Days,
    FixedOffset,
    Local,
    NaiveDate,
    Offset,
    TimeDelta,
    TimeZone,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Source of "now". Sampled once per operation by the host.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Which midnight a review date is truncated to before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayBoundary {
    #[default]
    Local,
    Utc,
    Offset {
        seconds: i32,
    },
}

impl DayBoundary {
    /// Calendar day `instant` falls on.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match *self {
            DayBoundary::Local => instant.with_timezone(&Local).date_naive(),
            DayBoundary::Utc => instant.date_naive(),
            DayBoundary::Offset { seconds } => {
                instant.with_timezone(&fixed_offset(seconds)).date_naive()
            }
        }
    }

    /// Advances `instant` by whole calendar days, keeping the wall-clock time.
    pub fn add_days(&self, instant: DateTime<Utc>, days: u32) -> DateTime<Utc> {
        let shifted = match *self {
            DayBoundary::Local => shift_in(instant, &Local, days),
            DayBoundary::Utc => shift_in(instant, &Utc, days),
            DayBoundary::Offset { seconds } => shift_in(instant, &fixed_offset(seconds), days),
        };

        // Local wall-clock times can vanish across DST changes
        shifted
            .or_else(|| instant.checked_add_signed(TimeDelta::days(i64::from(days))))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

fn fixed_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| {
        tracing::warn!(seconds, "day boundary offset out of range, using UTC");
        Utc.fix()
    })
}

fn shift_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz, days: u32) -> Option<DateTime<Utc>> {
    instant
        .with_timezone(tz)
        .checked_add_days(Days::new(u64::from(days)))
        .map(|shifted| shifted.with_timezone(&Utc))
}
