use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

pub enum LogTarget {
    /// The TUI owns the terminal, so its logs go to a file.
    File(PathBuf),
    Stderr,
    Sink,
}

pub fn init_tracing(target: LogTarget) -> Result<(), String> {
    let (writer, default_level) = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            (BoxMakeWriter::new(Mutex::new(file)), "info")
        }
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), "warn"),
        LogTarget::Sink => (BoxMakeWriter::new(io::sink), "off"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|error| error.to_string())
}
