use crate::calendar::{CalendarGrid, DAYS_PER_WEEK, GridPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The cell for today, the most recent day in the window.
pub fn initial_selection(grid: &CalendarGrid) -> Option<GridPos> {
    grid.position_of(grid.window().today())
}

/// Moves one step, clamped to the grid. Moves landing on a cell that does
/// not resolve to a date in the window leave the selection where it was.
pub fn step(grid: &CalendarGrid, pos: GridPos, direction: Direction) -> GridPos {
    let candidate = match direction {
        Direction::Up if pos.row > 0 => GridPos::new(pos.row - 1, pos.col),
        Direction::Down if pos.row + 1 < DAYS_PER_WEEK => GridPos::new(pos.row + 1, pos.col),
        Direction::Left if pos.col > 0 => GridPos::new(pos.row, pos.col - 1),
        Direction::Right if pos.col + 1 < grid.week_count() => GridPos::new(pos.row, pos.col + 1),
        _ => return pos,
    };

    if grid.date_for(candidate).is_some() {
        candidate
    } else {
        pos
    }
}

/// Keeps a selection across a rebuild only while it still resolves to a date.
pub fn revalidate(grid: &CalendarGrid, selection: Option<GridPos>) -> Option<GridPos> {
    selection.filter(|pos| grid.date_for(*pos).is_some())
}
