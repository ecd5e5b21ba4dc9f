use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    calendar::{Cell, DAYS_PER_WEEK, GridPos, Intensity},
    constants::GRAPH_SETTINGS,
};

use super::{App, Focus, ui_helpers, view_style};

impl App {
    pub(super) fn render_graph(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Graph;
        let days = self.grid.window().days();

        let mut lines = Vec::with_capacity(DAYS_PER_WEEK + 4);
        for (row, label) in GRAPH_SETTINGS.day_labels.iter().enumerate() {
            let mut spans = vec![Span::styled(
                format!("{} ", label),
                Style::default().fg(Color::DarkGray),
            )];
            for (col, cell) in self.grid.row(row).enumerate() {
                let selected = focused && self.selection == Some(GridPos::new(row, col));
                spans.push(cell_span(cell, selected));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(legend_line());

        if focused && let Some((date, count)) = self.selected_day() {
            lines.push(Line::from(Span::styled(
                ui_helpers::format_selected_day(date, count),
                Style::default().fg(Color::White),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    format!("Pomodoros ({} days)", days),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Left),
            )
            .title_bottom(
                Line::from(Span::styled(
                    ui_helpers::format_window_total(self.grid.total(), days),
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(view_style::border_color(
                focused,
                view_style::intensity_color(Intensity::High),
            )));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn cell_span(cell: Cell, selected: bool) -> Span<'static> {
    let style = match cell {
        Cell::Blank => return Span::raw(" "),
        Cell::Empty => Style::default().fg(view_style::intensity_color(Intensity::None)),
        Cell::Filled { intensity, .. } => {
            Style::default().fg(view_style::intensity_color(intensity))
        }
    };

    let style = if selected {
        style.bg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        style
    };
    Span::styled(GRAPH_SETTINGS.cell_glyph, style)
}

fn legend_line() -> Line<'static> {
    let mut spans = vec![Span::styled("less ", Style::default().fg(Color::DarkGray))];
    for intensity in Intensity::ALL {
        spans.push(Span::styled(
            GRAPH_SETTINGS.cell_glyph,
            Style::default().fg(view_style::intensity_color(intensity)),
        ));
    }
    spans.push(Span::styled(" more", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}
