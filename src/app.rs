use std::{
    io,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::{
    calendar::{CalendarGrid, CalendarWindow, GridPos},
    constants::TIME_SETTINGS,
    domain::DailyCounts,
    history::HistoryStore,
    settings::Settings,
    sound::SoundNotifier,
    storage::AppPaths,
    timer::{PhaseChange, PomodoroTimer},
};

mod event_handlers;
mod graph_state;
mod graph_view;
mod render_views;
mod settings_form;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Timer,
    WorkInput,
    BreakInput,
    Graph,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Timer, Focus::WorkInput, Focus::BreakInput, Focus::Graph];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn is_input(self) -> bool {
        matches!(self, Focus::WorkInput | Focus::BreakInput)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
struct Toast {
    message: String,
    kind: ToastKind,
    shown_at: Instant,
}

struct App {
    paths: AppPaths,
    settings: Settings,
    timer: PomodoroTimer,
    history: Option<HistoryStore>,
    sound: SoundNotifier,
    counts: DailyCounts,
    grid: CalendarGrid,
    selection: Option<GridPos>,
    focus: Focus,
    work_input: String,
    break_input: String,
    toast: Option<Toast>,
    render_needed: bool,
}

impl App {
    fn new(
        paths: AppPaths,
        settings: Settings,
        history: Option<HistoryStore>,
        today: NaiveDate,
    ) -> Self {
        let timer = PomodoroTimer::new(settings.durations(), settings.auto_start_next);
        let sound = SoundNotifier::new(settings.sound.clone());
        let window = CalendarWindow::clamped(settings.window_days, today);
        let counts = DailyCounts::new();
        let grid = CalendarGrid::build(&counts, window);

        let mut app = Self {
            paths,
            settings,
            timer,
            history,
            sound,
            counts,
            grid,
            selection: None,
            focus: Focus::Timer,
            work_input: String::new(),
            break_input: String::new(),
            toast: None,
            render_needed: true,
        };
        app.reload_history(today);
        app
    }

    fn on_tick(&mut self, now: DateTime<Local>) {
        let today = now.date_naive();
        if today != self.grid.window().today() {
            self.rebuild_grid(today);
        }

        if let Some(change) = self.timer.tick() {
            self.on_phase_change(change, now);
        }

        if self.timer.is_running() {
            self.render_needed = true;
        }
    }

    fn on_phase_change(&mut self, change: PhaseChange, now: DateTime<Local>) {
        if change.completed_work() {
            if let Some(history) = &self.history {
                history.record_completion(now.naive_local());
            }
            self.reload_history(now.date_naive());
            self.show_toast("Break time!", ToastKind::Info);
        } else {
            self.show_toast("Back to work!", ToastKind::Info);
        }

        info!(finished = change.finished.label(), started = change.started.label(), "phase finished");
        // Dropping the handle detaches the playback thread.
        drop(self.sound.play(change.was_break()));
        self.render_needed = true;
    }

    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
        self.render_needed = true;
    }

    fn expire_toast(&mut self) {
        let lifetime = Duration::from_millis(TIME_SETTINGS.toast_ms);
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.shown_at.elapsed() >= lifetime)
        {
            self.toast = None;
            self.render_needed = true;
        }
    }
}

pub fn run_ui(
    paths: AppPaths,
    settings: Settings,
    history: Option<HistoryStore>,
) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(paths, settings, history, Local::now().date_naive());

    let tick_rate = Duration::from_millis(TIME_SETTINGS.tick_ms);
    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms);
    let mut last_tick = Instant::now();

    let result = loop {
        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Local::now());
            last_tick += tick_rate;
        }

        app.expire_toast();

        if app.render_needed {
            if let Err(e) = terminal.draw(|f| app.draw_frame(f)) {
                break Err(e);
            }
            app.render_needed = false;
        }

        let timeout = tick_rate
            .saturating_sub(last_tick.elapsed())
            .min(poll_rate);
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break Ok(());
                    }
                }
                Ok(Event::Resize(_, _)) => app.render_needed = true,
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => {}
            Err(e) => break Err(e),
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use chrono::TimeZone;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::sound::SoundSettings;

    pub(super) fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}", prefix, now))
    }

    pub(super) fn test_app(dir: &PathBuf, work_minutes: u32) -> App {
        let paths = AppPaths::in_dir(dir);
        let settings = Settings {
            work_minutes,
            break_minutes: 1,
            window_days: 14,
            auto_start_next: false,
            sound: SoundSettings {
                enabled: false,
                ..SoundSettings::default()
            },
        };
        let history = HistoryStore::new(&paths.history_file);
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        App::new(paths, settings, Some(history), today)
    }

    pub(super) fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_work_completion_appends_history_and_refreshes_graph() {
        let dir = unique_dir("timy_app_completion");
        let mut app = test_app(&dir, 1);
        assert_eq!(app.grid.total(), 0);

        press(&mut app, KeyCode::Char(' '));
        for _ in 0..60 {
            app.on_tick(noon());
        }

        let content = fs::read_to_string(dir.join("history.log")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("2024-03-13T12:00:00"));
        assert_eq!(app.grid.total(), 1);
        assert_eq!(app.timer.phase(), crate::timer::Phase::Break);
        assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Break time!"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_break_completion_does_not_record() {
        let dir = unique_dir("timy_app_break");
        let mut app = test_app(&dir, 1);

        press(&mut app, KeyCode::Char(' '));
        for _ in 0..60 {
            app.on_tick(noon());
        }
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..60 {
            app.on_tick(noon());
        }

        let content = fs::read_to_string(dir.join("history.log")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert_eq!(app.toast.as_ref().map(|t| t.message.as_str()), Some("Back to work!"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_completion_without_history_keeps_running() {
        let dir = unique_dir("timy_app_no_history");
        let mut app = test_app(&dir, 1);
        app.history = None;

        press(&mut app, KeyCode::Char(' '));
        for _ in 0..60 {
            app.on_tick(noon());
        }

        assert_eq!(app.timer.phase(), crate::timer::Phase::Break);
        assert!(!dir.join("history.log").exists());
    }

    #[test]
    fn test_day_rollover_rebuilds_window() {
        let dir = unique_dir("timy_app_rollover");
        let mut app = test_app(&dir, 25);
        let tomorrow = Local.with_ymd_and_hms(2024, 3, 14, 0, 0, 1).unwrap();

        app.on_tick(tomorrow);
        assert_eq!(
            app.grid.window().today(),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
    }
}
