use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
};

use crate::{calendar::Intensity, constants::INTENSITY_COLORS, timer::Phase};

pub(super) fn intensity_color(intensity: Intensity) -> Color {
    INTENSITY_COLORS[intensity.level().min(INTENSITY_COLORS.len() - 1)]
}

pub(super) fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Rgb(255, 99, 71),
        Phase::Break => Color::Rgb(64, 196, 99),
    }
}

pub(super) fn border_color(focused: bool, base: Color) -> Color {
    if focused { Color::White } else { base }
}

pub(super) fn key_hint_spans(key: &str, label: &str) -> [Span<'static>; 2] {
    [
        Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}  ", label), Style::default().fg(Color::Gray)),
    ]
}

pub(super) fn input_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_intensity_has_a_distinct_color() {
        let colors: Vec<Color> = Intensity::ALL.iter().map(|i| intensity_color(*i)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
