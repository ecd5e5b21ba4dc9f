use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::TimyError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The local wall-clock instant a work interval finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletionEvent(pub NaiveDateTime);

impl CompletionEvent {
    pub fn new(at: NaiveDateTime) -> Self {
        CompletionEvent(at)
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl fmt::Display for CompletionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for CompletionEvent {
    type Err = TimyError;

    /// Accepts the ISO-8601 shapes the history file has been written in:
    /// `T` or space separated date-times with optional seconds and fraction,
    /// RFC 3339 with an offset (the written wall-clock is kept) and bare dates.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();

        if let Ok(at) = value.parse::<NaiveDateTime>() {
            return Ok(CompletionEvent(at));
        }

        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
            if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(CompletionEvent(at));
            }
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(value) {
            return Ok(CompletionEvent(at.naive_local()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(CompletionEvent(date.and_time(NaiveTime::MIN)));
        }

        Err(TimyError::InvalidTimestamp(value.to_string()))
    }
}

/// Completions per calendar date. A date with no entry has a count of zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DailyCounts {
    counts: BTreeMap<NaiveDate, u32>,
}

impl DailyCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a CompletionEvent>) -> Self {
        let mut daily = Self::new();
        for event in events {
            daily.record(event.date());
        }
        daily
    }

    pub fn record(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    pub fn set(&mut self, date: NaiveDate, count: u32) {
        if count == 0 {
            self.counts.remove(&date);
        } else {
            self.counts.insert(date, count);
        }
    }

    pub fn get(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Sum over the inclusive range `[start, end]`; empty when `start > end`.
    pub fn total_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }
        self.counts.range(start..=end).map(|(_, count)| *count).sum()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
