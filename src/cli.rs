use std::{io, path::PathBuf};

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{CommandFactory, Parser, Subcommand};
use rand::{Rng, seq::SliceRandom};
use tracing::info;

use crate::{
    app,
    calendar::{CalendarGrid, CalendarWindow, Cell, Intensity},
    constants::{GRAPH_SETTINGS, SEED_SETTINGS},
    domain::CompletionEvent,
    error::{TimyError, TimyResult},
    history::HistoryStore,
    logging::{self, LogTarget},
    settings::Settings,
    storage::AppPaths,
};

#[derive(Parser, Debug)]
#[command(name = "timy")]
#[command(about = "Pomodoro timer with a contribution graph", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, global = true, help = "Directory holding history and settings")]
    pub data_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(GRAPH_SETTINGS.max_window_days)),
        help = "Days shown in the graph"
    )]
    pub days: Option<u32>,

    #[arg(
        long,
        value_name = "MIN",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Work interval in minutes"
    )]
    pub work: Option<u32>,

    #[arg(
        long = "break",
        value_name = "MIN",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Break interval in minutes"
    )]
    pub break_minutes: Option<u32>,

    #[arg(long, help = "Start the next interval automatically")]
    pub auto_start: bool,

    #[arg(long, help = "Do not play notification sounds")]
    pub no_sound: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Record a completed pomodoro")]
    Log {
        #[arg(long, help = "ISO-8601 timestamp, defaults to now")]
        at: Option<String>,
    },

    #[command(about = "Print the contribution graph")]
    Graph,

    #[command(about = "Append random sample history, for trying out the graph")]
    Seed {
        #[arg(
            long,
            default_value_t = SEED_SETTINGS.per_day,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(SEED_SETTINGS.max_per_day)),
            help = "Completions generated for each day"
        )]
        per_day: u32,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

impl Cli {
    /// Command line flags win over the saved settings for this run only.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(work) = self.work {
            settings.work_minutes = work;
        }
        if let Some(minutes) = self.break_minutes {
            settings.break_minutes = minutes;
        }
        if let Some(days) = self.days {
            settings.window_days = days;
        }
        if self.auto_start {
            settings.auto_start_next = true;
        }
        if self.no_sound {
            settings.sound.enabled = false;
        }
    }
}

pub fn log_completion(paths: &AppPaths, at: Option<&str>) -> TimyResult<CompletionEvent> {
    let event = match at {
        Some(raw) => raw.parse::<CompletionEvent>()?,
        None => CompletionEvent::new(Local::now().naive_local()),
    };

    HistoryStore::new(&paths.history_file).append(event.0)?;
    println!("Recorded pomodoro at {}", event);
    Ok(event)
}

pub fn render_graph_lines(grid: &CalendarGrid) -> Vec<String> {
    let days = grid.window().days();
    let mut lines = vec![format!("Pomodoros ({} days)", days)];

    for (row, label) in GRAPH_SETTINGS.day_labels.iter().enumerate() {
        let cells: Vec<String> = grid.row(row).map(|cell| plain_glyph(cell).to_string()).collect();
        lines.push(format!("{} {}", label, cells.join(" ")).trim_end().to_string());
    }

    lines.push(format!(
        "{} pomos in the last {} days",
        grid.total(),
        days
    ));
    lines
}

fn plain_glyph(cell: Cell) -> char {
    match cell {
        Cell::Blank => ' ',
        Cell::Empty => '·',
        Cell::Filled { intensity, .. } => match intensity {
            Intensity::None => '·',
            Intensity::Low => '░',
            Intensity::Medium => '▒',
            Intensity::High => '▓',
            Intensity::Max => '█',
        },
    }
}

pub fn print_graph(paths: &AppPaths, days: u32) -> TimyResult<()> {
    let loaded = HistoryStore::new(&paths.history_file).read_all()?;
    if !loaded.skipped.is_empty() {
        eprintln!("Skipped {} malformed history line(s)", loaded.skipped.len());
    }

    let window = CalendarWindow::new(days, Local::now().date_naive())?;
    let grid = CalendarGrid::build(&loaded.daily_counts(), window);

    for line in render_graph_lines(&grid) {
        println!("{}", line);
    }
    Ok(())
}

/// `per_day` random times on each of the `days` days ending at `today`, shuffled.
pub fn sample_timestamps(
    rng: &mut impl Rng,
    today: NaiveDate,
    days: u32,
    per_day: u32,
) -> Vec<NaiveDateTime> {
    let mut stamps = Vec::with_capacity(days as usize * per_day as usize);
    for back in 0..days {
        let Some(day) = today.checked_sub_days(Days::new(u64::from(back))) else {
            break;
        };
        for _ in 0..per_day {
            let seconds = rng.gen_range(0..86_400);
            let nanos = rng.gen_range(0..1_000_000) * 1_000;
            if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos) {
                stamps.push(day.and_time(time));
            }
        }
    }
    stamps.shuffle(rng);
    stamps
}

pub fn seed_history(paths: &AppPaths, days: u32, per_day: u32) -> TimyResult<usize> {
    let stamps = sample_timestamps(
        &mut rand::thread_rng(),
        Local::now().date_naive(),
        days,
        per_day,
    );
    HistoryStore::new(&paths.history_file).append_all(&stamps)?;
    println!(
        "Added {} sample pomodoros over {} days to {}",
        stamps.len(),
        days,
        paths.history_file.display()
    );
    Ok(stamps.len())
}

pub fn print_completions(shell: &str) -> TimyResult<()> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => return Err(TimyError::UnsupportedShell(shell.to_string())),
    };
    clap_complete::generate(shell, &mut Cli::command(), "timy", &mut io::stdout());
    Ok(())
}

fn run_tui(cli: &Cli, paths: AppPaths) -> TimyResult<()> {
    let history = match paths.ensure_data_dir() {
        Ok(()) => Some(HistoryStore::new(&paths.history_file)),
        Err(error) => {
            eprintln!(
                "Warning: could not create {}: {}. History disabled.",
                paths.data_dir.display(),
                error
            );
            None
        }
    };

    let target = if history.is_some() {
        LogTarget::File(paths.log_file.clone())
    } else {
        LogTarget::Sink
    };
    if let Err(error) = logging::init_tracing(target) {
        eprintln!("Warning: could not start logging: {}", error);
    }

    let mut settings = Settings::load(&paths.settings_file);
    cli.apply_overrides(&mut settings);
    info!(
        data_dir = %paths.data_dir.display(),
        work_minutes = settings.work_minutes,
        break_minutes = settings.break_minutes,
        window_days = settings.window_days,
        "starting timer"
    );

    app::run_ui(paths, settings, history)?;
    Ok(())
}

fn exit_on_error<T>(result: TimyResult<T>) {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn run_cli() {
    let cli = Cli::parse();
    let paths = AppPaths::resolve(cli.data_dir.clone());

    match &cli.command {
        None => exit_on_error(run_tui(&cli, paths)),
        Some(command) => {
            if let Err(error) = logging::init_tracing(LogTarget::Stderr) {
                eprintln!("Warning: could not start logging: {}", error);
            }
            match command {
                Command::Log { at } => exit_on_error(log_completion(&paths, at.as_deref())),
                Command::Graph => {
                    let days = cli
                        .days
                        .unwrap_or_else(|| Settings::load(&paths.settings_file).window_days);
                    exit_on_error(print_graph(&paths, days));
                }
                Command::Seed { per_day } => {
                    let days = cli.days.unwrap_or(SEED_SETTINGS.days);
                    exit_on_error(seed_history(&paths, days, *per_day));
                }
                Command::Completions { shell } => exit_on_error(print_completions(shell)),
            }
        }
    }
}
