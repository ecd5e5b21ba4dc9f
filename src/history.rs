use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, ErrorKind, Write},
    path::PathBuf,
};

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::{
    domain::{CompletionEvent, DailyCounts},
    error::{TimyError, TimyResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
}

#[derive(Clone, Debug, Default)]
pub struct LoadedHistory {
    pub events: Vec<CompletionEvent>,
    pub skipped: Vec<SkippedLine>,
}

impl LoadedHistory {
    pub fn daily_counts(&self) -> DailyCounts {
        DailyCounts::from_events(&self.events)
    }
}

/// Append-only log of completed work sessions, one timestamp per line.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, at: NaiveDateTime) -> TimyResult<()> {
        self.append_all(&[at])
    }

    /// Writes every timestamp through one handle, in the order given.
    pub fn append_all(&self, stamps: &[NaiveDateTime]) -> TimyResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| TimyError::history_io(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TimyError::history_io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        for at in stamps {
            writeln!(writer, "{}", CompletionEvent::new(*at))
                .map_err(|e| TimyError::history_io(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| TimyError::history_io(&self.path, e))?;

        debug!(path = %self.path.display(), count = stamps.len(), "appended history");
        Ok(())
    }

    /// Appends and logs any failure; the caller keeps running either way.
    pub fn record_completion(&self, at: NaiveDateTime) -> bool {
        match self.append(at) {
            Ok(()) => true,
            Err(error) => {
                warn!(error = %error, "failed to record completion");
                false
            }
        }
    }

    pub fn read_all(&self) -> TimyResult<LoadedHistory> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedHistory::default()),
            Err(e) => return Err(TimyError::history_io(&self.path, e)),
        };

        // Decoded per line so one corrupt line cannot hide the rest.
        let mut loaded = LoadedHistory::default();
        for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let line_number = index + 1;
            let parsed = match std::str::from_utf8(raw) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    line.parse::<CompletionEvent>().map_err(|e| e.to_string())
                }
                Err(e) => Err(format!("invalid UTF-8: {}", e)),
            };

            match parsed {
                Ok(event) => loaded.events.push(event),
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        line = line_number,
                        error = %error,
                        "skipping malformed history line"
                    );
                    loaded.skipped.push(SkippedLine {
                        line_number,
                        content: String::from_utf8_lossy(raw).trim().to_string(),
                    });
                }
            }
        }

        Ok(loaded)
    }

    /// Full scan of the log. Read failures are logged and treated as no data.
    pub fn load_all(&self) -> LoadedHistory {
        match self.read_all() {
            Ok(loaded) => loaded,
            Err(error) => {
                warn!(error = %error, "could not read history, showing none");
                LoadedHistory::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use chrono::NaiveDate;

    use super::*;

    fn unique_path(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}", prefix, now))
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 30)
            .unwrap()
    }

    #[test]
    fn test_append_then_reload_round_trip() {
        let dir = unique_path("timy_history_roundtrip");
        let store = HistoryStore::new(dir.join("nested").join("history.log"));

        let stamps = [
            at(2024, 3, 8, 9),
            at(2024, 3, 8, 13),
            at(2024, 3, 9, 10),
            at(2024, 3, 10, 8),
            at(2024, 3, 10, 8),
        ];
        for stamp in stamps {
            store.append(stamp).unwrap();
        }

        let loaded = store.load_all();
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.events.len(), stamps.len());

        let daily = loaded.daily_counts();
        assert_eq!(daily.total(), 5);
        assert_eq!(daily.get(NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()), 2);
        assert_eq!(daily.get(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()), 1);
        assert_eq!(daily.get(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()), 2);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_line_is_skipped_and_reported() {
        let path = unique_path("timy_history_malformed");
        let mut content = String::new();
        for day in 1..=10 {
            content.push_str(&format!("2024-02-{:02}T10:00:00.000000\n", day));
            if day == 5 {
                content.push_str("garbage-line\n");
            }
        }
        content.push_str("\n   \n");
        fs::write(&path, content).unwrap();

        let loaded = HistoryStore::new(&path).load_all();
        assert_eq!(loaded.events.len(), 10);
        assert_eq!(loaded.daily_counts().total(), 10);
        assert_eq!(
            loaded.skipped,
            vec![SkippedLine {
                line_number: 6,
                content: "garbage-line".to_string(),
            }]
        );

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_non_utf8_line_is_skipped_and_others_kept() {
        let path = unique_path("timy_history_non_utf8");
        let mut content = Vec::new();
        for day in 1..=10 {
            content.extend_from_slice(format!("2024-02-{:02}T10:00:00.000000\n", day).as_bytes());
            if day == 3 {
                content.extend_from_slice(b"\xff\xfe garbage\n");
            }
        }
        content.extend_from_slice(b"2024-02-11T10:00:00.000000\r\n");
        fs::write(&path, content).unwrap();

        let loaded = HistoryStore::new(&path).read_all().unwrap();
        assert_eq!(loaded.events.len(), 11);
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line_number, 4);
        assert!(loaded.skipped[0].content.ends_with("garbage"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = HistoryStore::new(unique_path("timy_history_missing").join("history.log"));
        let loaded = store.read_all().unwrap();
        assert!(loaded.events.is_empty());
        assert!(loaded.daily_counts().is_empty());
    }

    #[test]
    fn test_record_completion_reports_failure_without_panicking() {
        let blocker = unique_path("timy_history_blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = HistoryStore::new(blocker.join("history.log"));
        assert!(!store.record_completion(at(2024, 3, 10, 9)));

        fs::remove_file(blocker).ok();
    }

    #[test]
    fn test_appended_lines_use_isoformat() {
        let path = unique_path("timy_history_format");
        let store = HistoryStore::new(&path);
        store.append(at(2024, 3, 10, 9)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "2024-03-10T09:15:30.000000\n");

        fs::remove_file(path).ok();
    }
}
