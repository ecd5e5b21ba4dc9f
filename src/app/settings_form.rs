use tracing::{debug, warn};

use crate::constants::INPUT_SETTINGS;

use super::{App, Focus, ToastKind};

impl App {
    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::WorkInput => Some(&mut self.work_input),
            Focus::BreakInput => Some(&mut self.break_input),
            Focus::Timer | Focus::Graph => None,
        }
    }

    pub(super) fn push_input_char(&mut self, c: char) {
        if let Some(input) = self.focused_input_mut()
            && input.chars().count() < INPUT_SETTINGS.max_digits
        {
            input.push(c);
        }
    }

    pub(super) fn pop_input_char(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.pop();
        }
    }

    /// Validates both inputs; on rejection nothing about the timer changes.
    pub(super) fn submit_settings(&mut self) {
        match self.timer.apply_settings(&self.work_input, &self.break_input) {
            Ok(durations) => {
                self.settings.set_durations(durations);
                if let Err(error) = self.settings.save(&self.paths.settings_file) {
                    warn!(error = %error, "could not persist settings");
                }
                self.work_input.clear();
                self.break_input.clear();
                self.show_toast("Settings updated!", ToastKind::Info);
            }
            Err(error) => {
                debug!(error = %error, "rejected settings input");
                self.show_toast("Please enter valid numbers!", ToastKind::Error);
            }
        }
    }
}
