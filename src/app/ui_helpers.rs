use chrono::NaiveDate;

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn format_pomos(count: u32) -> String {
    if count == 1 {
        "1 pomo".to_string()
    } else {
        format!("{} pomos", count)
    }
}

pub fn format_window_total(total: u32, days: u32) -> String {
    format!("{} in the last {} days", format_pomos(total), days)
}

pub fn format_selected_day(date: NaiveDate, count: u32) -> String {
    format!("{} · {}", date.format("%a %b %-d, %Y"), format_pomos(count))
}
