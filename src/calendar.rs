//! Sunday-aligned contribution grid over a trailing window of days.
//!
//! Rows are days of the week (0 = Sunday .. 6 = Saturday) and columns are
//! weeks, starting at the Sunday on or before the first day of the window.

use chrono::{Datelike, Days, Duration as ChronoDuration, NaiveDate};

use crate::{
    constants::GRAPH_SETTINGS,
    domain::DailyCounts,
    error::{TimyError, TimyResult},
};

pub const DAYS_PER_WEEK: usize = 7;

/// Sunday = 0 .. Saturday = 6. The only place weekday numbering is decided.
pub fn sunday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl Intensity {
    pub const ALL: [Intensity; 5] = [
        Intensity::None,
        Intensity::Low,
        Intensity::Medium,
        Intensity::High,
        Intensity::Max,
    ];

    pub fn for_count(count: u32) -> Self {
        match count {
            0 => Intensity::None,
            1 => Intensity::Low,
            2..=3 => Intensity::Medium,
            4..=6 => Intensity::High,
            _ => Intensity::Max,
        }
    }

    pub fn level(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Empty,
    Filled { count: u32, intensity: Intensity },
}

impl Cell {
    fn for_count(count: u32) -> Self {
        if count == 0 {
            Cell::Empty
        } else {
            Cell::Filled {
                count,
                intensity: Intensity::for_count(count),
            }
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            Cell::Filled { count, .. } => *count,
            Cell::Blank | Cell::Empty => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        GridPos { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarWindow {
    days: u32,
    today: NaiveDate,
}

impl CalendarWindow {
    pub fn new(days: u32, today: NaiveDate) -> TimyResult<Self> {
        if days == 0 || days > GRAPH_SETTINGS.max_window_days {
            return Err(TimyError::InvalidWindow);
        }
        Ok(Self { days, today })
    }

    /// Forces `days` into `1..=GRAPH_SETTINGS.max_window_days`.
    pub fn clamped(days: u32, today: NaiveDate) -> Self {
        Self {
            days: days.clamp(1, GRAPH_SETTINGS.max_window_days),
            today,
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Saturates at `NaiveDate::MIN` for a `today` at the edge of the calendar.
    pub fn start(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(u64::from(self.days) - 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// The Sunday on or before `start()`; column 0 begins here.
    pub fn render_start(&self) -> NaiveDate {
        let start = self.start();
        start
            .checked_sub_days(Days::new(sunday_index(start) as u64))
            .unwrap_or(start)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.today
    }

    pub fn week_count(&self) -> usize {
        let span = (self.today - self.render_start()).num_days() as usize + 1;
        span.div_ceil(DAYS_PER_WEEK)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarGrid {
    window: CalendarWindow,
    weeks: Vec<[Cell; DAYS_PER_WEEK]>,
    total: u32,
}

impl CalendarGrid {
    pub fn build(counts: &DailyCounts, window: CalendarWindow) -> Self {
        let render_start = window.render_start();
        let window_start = window.start();
        let mut weeks = vec![[Cell::Blank; DAYS_PER_WEEK]; window.week_count()];

        for date in render_start.iter_days().take_while(|d| *d <= window.today()) {
            let col = (date - render_start).num_days() as usize / DAYS_PER_WEEK;
            let row = sunday_index(date);
            weeks[col][row] = if date < window_start {
                Cell::Blank
            } else {
                Cell::for_count(counts.get(date))
            };
        }

        let total = counts.total_between(window_start, window.today());

        Self {
            window,
            weeks,
            total,
        }
    }

    pub fn window(&self) -> CalendarWindow {
        self.window
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn render_start(&self) -> NaiveDate {
        self.window.render_start()
    }

    pub fn cell(&self, pos: GridPos) -> Option<Cell> {
        self.weeks.get(pos.col)?.get(pos.row).copied()
    }

    /// Cells of one weekday row, oldest week first.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        self.weeks
            .iter()
            .map(move |week| week.get(row).copied().unwrap_or(Cell::Blank))
    }

    /// `render_start + col * 7 + row`, only when that date lies in the window.
    pub fn date_for(&self, pos: GridPos) -> Option<NaiveDate> {
        if pos.row >= DAYS_PER_WEEK || pos.col >= self.week_count() {
            return None;
        }
        let offset = (pos.col * DAYS_PER_WEEK + pos.row) as i64;
        let date = self.render_start() + ChronoDuration::days(offset);
        self.window.contains(date).then_some(date)
    }

    pub fn position_of(&self, date: NaiveDate) -> Option<GridPos> {
        if !self.window.contains(date) {
            return None;
        }
        let offset = (date - self.render_start()).num_days() as usize;
        Some(GridPos::new(offset % DAYS_PER_WEEK, offset / DAYS_PER_WEEK))
    }

    pub fn count_on(&self, date: NaiveDate) -> Option<u32> {
        self.position_of(date)
            .and_then(|pos| self.cell(pos))
            .map(|cell| cell.count())
    }
}
