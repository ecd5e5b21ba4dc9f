use crate::{
    constants::TIMER_DEFAULTS,
    error::{TimyError, TimyResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
        }
    }

    fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub finished: Phase,
    pub started: Phase,
}

impl PhaseChange {
    pub fn was_break(&self) -> bool {
        self.finished == Phase::Break
    }

    pub fn completed_work(&self) -> bool {
        self.finished == Phase::Work
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Durations {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_minutes: TIMER_DEFAULTS.work_minutes,
            break_minutes: TIMER_DEFAULTS.break_minutes,
        }
    }
}

/// Parses a minutes field. Blank keeps the current value.
pub fn parse_minutes(raw: &str) -> TimyResult<Option<u32>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(Some(minutes)),
        _ => Err(TimyError::InvalidDuration(value.to_string())),
    }
}

#[derive(Clone, Debug)]
pub struct PomodoroTimer {
    durations: Durations,
    phase: Phase,
    remaining_seconds: u64,
    running: bool,
    auto_start_next: bool,
}

impl PomodoroTimer {
    pub fn new(durations: Durations, auto_start_next: bool) -> Self {
        Self {
            durations,
            phase: Phase::Work,
            remaining_seconds: u64::from(durations.work_minutes) * 60,
            running: false,
            auto_start_next,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Work;
        self.remaining_seconds = self.phase_length(Phase::Work);
    }

    /// One second of countdown. Returns the transition when a phase ends.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let finished = self.phase;
        self.phase = finished.next();
        self.remaining_seconds = self.phase_length(self.phase);
        self.running = self.auto_start_next;

        Some(PhaseChange {
            finished,
            started: self.phase,
        })
    }

    /// Validates both fields before touching any state.
    pub fn apply_settings(&mut self, work_input: &str, break_input: &str) -> TimyResult<Durations> {
        let work = parse_minutes(work_input)?;
        let rest = parse_minutes(break_input)?;

        if let Some(minutes) = work {
            self.durations.work_minutes = minutes;
        }
        if let Some(minutes) = rest {
            self.durations.break_minutes = minutes;
        }

        if !self.running {
            self.remaining_seconds = self.phase_length(self.phase);
        }

        Ok(self.durations)
    }

    pub fn display(&self) -> String {
        format!(
            "{} Time: {:02}:{:02}",
            self.phase.label(),
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    fn phase_length(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.durations.work_minutes,
            Phase::Break => self.durations.break_minutes,
        };
        u64::from(minutes) * 60
    }
}
