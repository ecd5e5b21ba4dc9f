use chrono::NaiveDate;
use tracing::debug;

use crate::{
    calendar::{CalendarGrid, CalendarWindow},
    domain::DailyCounts,
    selection::{self, Direction},
};

use super::App;

impl App {
    /// Full rescan of the history file followed by a grid rebuild.
    pub(super) fn reload_history(&mut self, today: NaiveDate) {
        self.counts = match &self.history {
            Some(history) => history.load_all().daily_counts(),
            None => DailyCounts::new(),
        };
        debug!(
            days = self.counts.len(),
            total = self.counts.total(),
            "reloaded history"
        );
        self.rebuild_grid(today);
    }

    pub(super) fn rebuild_grid(&mut self, today: NaiveDate) {
        let window = CalendarWindow::clamped(self.settings.window_days, today);
        self.grid = CalendarGrid::build(&self.counts, window);
        self.selection = selection::revalidate(&self.grid, self.selection);
        self.render_needed = true;
    }

    pub(super) fn on_graph_focus(&mut self) {
        if selection::revalidate(&self.grid, self.selection).is_none() {
            self.selection = selection::initial_selection(&self.grid);
        }
    }

    pub(super) fn move_selection(&mut self, direction: Direction) {
        let Some(current) = self.selection else {
            self.selection = selection::initial_selection(&self.grid);
            return;
        };
        self.selection = Some(selection::step(&self.grid, current, direction));
    }

    pub(super) fn selected_day(&self) -> Option<(NaiveDate, u32)> {
        let pos = self.selection?;
        let date = self.grid.date_for(pos)?;
        Some((date, self.grid.count_on(date).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::KeyCode;

    use super::super::tests::{press, test_app, unique_dir};
    use super::*;

    #[test]
    fn test_focusing_graph_selects_today() {
        let dir = unique_dir("timy_graph_focus");
        let mut app = test_app(&dir, 25);
        assert_eq!(app.selection, None);

        press(&mut app, KeyCode::BackTab);
        let (date, count) = app.selected_day().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_arrow_keys_move_selection_within_window() {
        let dir = unique_dir("timy_graph_arrows");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("history.log"),
            "2024-03-12T09:00:00\n2024-03-12T10:00:00\n2024-03-06T10:00:00\n",
        )
        .unwrap();
        let mut app = test_app(&dir, 25);
        assert_eq!(app.grid.total(), 3);

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Up);
        assert_eq!(
            app.selected_day(),
            Some((NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(), 2))
        );

        press(&mut app, KeyCode::Left);
        assert_eq!(
            app.selected_day(),
            Some((NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), 0))
        );

        // Today is Wednesday, so Thursday in the last column is in the future.
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(
            app.selected_day().map(|(date, _)| date),
            Some(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap())
        );

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_selection_survives_reload() {
        let dir = unique_dir("timy_graph_reload");
        let mut app = test_app(&dir, 25);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Up);
        let before = app.selection;

        app.reload_history(NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
        assert_eq!(app.selection, before);
    }
}
