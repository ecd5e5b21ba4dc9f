use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::selection::Direction;

use super::{App, Focus, ui_helpers};

impl App {
    /// Returns true when the app should quit.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.render_needed = true;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(Focus::ORDER[ui_helpers::wrap_next_index(
                    self.focus.position(),
                    Focus::ORDER.len(),
                )]);
                return false;
            }
            KeyCode::BackTab => {
                self.set_focus(Focus::ORDER[ui_helpers::wrap_prev_index(
                    self.focus.position(),
                    Focus::ORDER.len(),
                )]);
                return false;
            }
            KeyCode::Esc => {
                self.set_focus(Focus::Timer);
                return false;
            }
            _ => {}
        }

        if self.focus.is_input() {
            self.handle_input_key(key);
            false
        } else {
            self.handle_normal_key(key)
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::Graph {
            self.on_graph_focus();
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_settings(),
            KeyCode::Backspace => self.pop_input_char(),
            KeyCode::Char(c) => self.push_input_char(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => true,
            KeyCode::Char(' ') => {
                self.timer.toggle();
                false
            }
            KeyCode::Enter if self.focus == Focus::Timer => {
                self.timer.toggle();
                false
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.timer.reset();
                false
            }
            KeyCode::Up if self.focus == Focus::Graph => {
                self.move_selection(Direction::Up);
                false
            }
            KeyCode::Down if self.focus == Focus::Graph => {
                self.move_selection(Direction::Down);
                false
            }
            KeyCode::Left if self.focus == Focus::Graph => {
                self.move_selection(Direction::Left);
                false
            }
            KeyCode::Right if self.focus == Focus::Graph => {
                self.move_selection(Direction::Right);
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::tests::{press, test_app, unique_dir};
    use super::*;

    #[test]
    fn test_tab_cycles_focus_and_wraps() {
        let mut app = test_app(&unique_dir("timy_keys_tab"), 25);
        let mut seen = Vec::new();
        for _ in 0..5 {
            press(&mut app, KeyCode::Tab);
            seen.push(app.focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::WorkInput,
                Focus::BreakInput,
                Focus::Graph,
                Focus::Timer,
                Focus::WorkInput,
            ]
        );
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Timer);
    }

    #[test]
    fn test_space_toggles_and_r_resets() {
        let mut app = test_app(&unique_dir("timy_keys_toggle"), 25);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.timer.is_running());
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.timer.is_running());
        assert_eq!(app.timer.display(), "Work Time: 25:00");
    }

    #[test]
    fn test_q_quits_only_outside_inputs() {
        let mut app = test_app(&unique_dir("timy_keys_quit"), 25);
        press(&mut app, KeyCode::Tab);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.work_input, "q");
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = test_app(&unique_dir("timy_keys_ctrl_c"), 25);
        press(&mut app, KeyCode::Tab);
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_arrows_ignored_unless_graph_focused() {
        let mut app = test_app(&unique_dir("timy_keys_arrows"), 25);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selection, None);
    }
}
