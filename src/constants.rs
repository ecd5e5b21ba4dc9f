use ratatui::style::Color;

pub const INTENSITY_COLORS: [Color; 5] = [
    Color::Indexed(239),
    Color::Rgb(155, 233, 168),
    Color::Rgb(64, 196, 99),
    Color::Rgb(48, 161, 78),
    Color::Rgb(33, 110, 57),
];

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 1000,
    poll_ms: 50,
    toast_ms: 3000,
};

pub const TIMER_DEFAULTS: TimerDefaults = TimerDefaults {
    work_minutes: 30,
    break_minutes: 5,
};

pub const GRAPH_SETTINGS: GraphSettings = GraphSettings {
    window_days: 91,
    max_window_days: 3660,
    cell_glyph: "■",
    day_labels: ["S", "M", "T", "W", "T", "F", "S"],
};

pub const FILE_NAMES: FileNames = FileNames {
    data_dir: ".timy",
    history: "history.log",
    settings: "settings.json",
    log: "timy.log",
};

pub const INPUT_SETTINGS: InputSettings = InputSettings { max_digits: 4 };

pub const SEED_SETTINGS: SeedSettings = SeedSettings {
    days: 30,
    per_day: 5,
    max_per_day: 50,
};

pub struct TimeSettings {
    pub tick_ms: u64,
    pub poll_ms: u64,
    pub toast_ms: u64,
}

pub struct TimerDefaults {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

pub struct GraphSettings {
    pub window_days: u32,
    pub max_window_days: u32,
    pub cell_glyph: &'static str,
    pub day_labels: [&'static str; 7],
}

pub struct FileNames {
    pub data_dir: &'static str,
    pub history: &'static str,
    pub settings: &'static str,
    pub log: &'static str,
}

pub struct InputSettings {
    pub max_digits: usize,
}

pub struct SeedSettings {
    pub days: u32,
    pub per_day: u32,
    pub max_per_day: u32,
}
