use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    constants::{GRAPH_SETTINGS, TIMER_DEFAULTS},
    error::TimyResult,
    sound::SoundSettings,
    storage,
    timer::Durations,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub window_days: u32,
    pub auto_start_next: bool,
    pub sound: SoundSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: TIMER_DEFAULTS.work_minutes,
            break_minutes: TIMER_DEFAULTS.break_minutes,
            window_days: GRAPH_SETTINGS.window_days,
            auto_start_next: false,
            sound: SoundSettings::default(),
        }
    }
}

impl Settings {
    /// Missing or unreadable settings fall back to defaults.
    pub fn load(path: &Path) -> Self {
        let loaded = match storage::read_json::<Settings>(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => return Self::default(),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "could not load settings, using defaults");
                return Self::default();
            }
        };
        loaded.sanitized()
    }

    pub fn save(&self, path: &Path) -> TimyResult<()> {
        storage::write_json_atomic(path, self)?;
        info!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn durations(&self) -> Durations {
        Durations {
            work_minutes: self.work_minutes,
            break_minutes: self.break_minutes,
        }
    }

    pub fn set_durations(&mut self, durations: Durations) {
        self.work_minutes = durations.work_minutes;
        self.break_minutes = durations.break_minutes;
    }

    /// Zero values are replaced with defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.work_minutes == 0 {
            warn!("work_minutes must be positive, using default");
            self.work_minutes = defaults.work_minutes;
        }
        if self.break_minutes == 0 {
            warn!("break_minutes must be positive, using default");
            self.break_minutes = defaults.break_minutes;
        }
        let clamped = self.window_days.clamp(1, GRAPH_SETTINGS.max_window_days);
        if clamped != self.window_days {
            warn!(
                window_days = self.window_days,
                clamped, "window_days out of range, clamping"
            );
            self.window_days = clamped;
        }
        self
    }
}
