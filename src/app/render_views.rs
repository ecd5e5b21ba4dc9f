use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{App, Focus, ToastKind, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(size);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(vertical[0]);

        self.render_timer_panel(f, panels[0]);
        self.render_graph(f, panels[1]);
        self.render_footer(f, vertical[1]);
    }

    fn render_timer_panel(&self, f: &mut Frame, area: Rect) {
        let phase_color = view_style::phase_color(self.timer.phase());
        let status = if self.timer.is_running() {
            "running"
        } else {
            "paused"
        };

        let durations = self.timer.durations();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.timer.display(),
                Style::default()
                    .fg(phase_color)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(status, Style::default().fg(Color::Gray)))
                .alignment(Alignment::Center),
            Line::from(""),
            Line::from(Vec::from(view_style::key_hint_spans("space", "start/stop")))
                .alignment(Alignment::Center),
            Line::from(Vec::from(view_style::key_hint_spans("r", "reset")))
                .alignment(Alignment::Center),
            Line::from(""),
            input_line(
                "Work: ",
                &self.work_input,
                durations.work_minutes,
                self.focus == Focus::WorkInput,
            ),
            input_line(
                "Break:",
                &self.break_input,
                durations.break_minutes,
                self.focus == Focus::BreakInput,
            ),
            Line::from(""),
            Line::from(Vec::from(view_style::key_hint_spans("enter", "update settings")))
                .alignment(Alignment::Center),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    "timy",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .border_style(Style::default().fg(view_style::border_color(
                matches!(self.focus, Focus::Timer | Focus::WorkInput | Focus::BreakInput),
                phase_color,
            )));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let line = if let Some(toast) = &self.toast {
            let color = match toast.kind {
                ToastKind::Info => Color::Green,
                ToastKind::Error => Color::Red,
            };
            Line::from(Span::styled(
                toast.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        } else {
            let mut spans = Vec::new();
            for (key, label) in [
                ("space", "start/stop"),
                ("r", "reset"),
                ("tab", "focus"),
                ("arrows", "browse graph"),
                ("q", "quit"),
            ] {
                spans.extend(view_style::key_hint_spans(key, label));
            }
            if self.history.is_none() {
                spans.push(Span::styled(
                    "history disabled",
                    Style::default().fg(Color::Yellow),
                ));
            }
            Line::from(spans)
        };

        f.render_widget(Paragraph::new(line), area);
    }
}

fn input_line(label: &str, value: &str, current: u32, focused: bool) -> Line<'static> {
    let shown = if value.is_empty() {
        Span::styled(
            format!(" {:>4} ", current),
            view_style::input_style(focused).add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(format!(" {:>4} ", value), view_style::input_style(focused))
    };

    Line::from(vec![
        Span::styled(format!("{} ", label), Style::default().fg(Color::White)),
        shown,
        Span::styled(" min", Style::default().fg(Color::Gray)),
    ])
    .alignment(Alignment::Center)
}
