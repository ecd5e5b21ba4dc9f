use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::{constants::FILE_NAMES, error::TimyResult};

/// Every file location the app touches, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub history_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            history_file: data_dir.join(FILE_NAMES.history),
            settings_file: data_dir.join(FILE_NAMES.settings),
            log_file: data_dir.join(FILE_NAMES.log),
            data_dir,
        }
    }

    /// `<home>/.timy` unless overridden; falls back to `./.timy` without a home.
    pub fn resolve(data_dir_override: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir_override {
            return Self::in_dir(dir);
        }

        let home = BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(home.join(FILE_NAMES.data_dir))
    }

    pub fn ensure_data_dir(&self) -> TimyResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> TimyResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> TimyResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, &json)
}

pub fn atomic_write(path: &Path, content: &str) -> TimyResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content.as_bytes())?;
    tmp_file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use serde::{Deserialize, Serialize};

    use super::*;

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}.{}", prefix, now, extension))
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestJsonValue {
        name: String,
        count: usize,
    }

    #[test]
    fn test_json_helper_round_trip() {
        let path = unique_path("timy_json_roundtrip", "json");
        let value = TestJsonValue {
            name: "sample".to_string(),
            count: 3,
        };

        write_json_atomic(&path, &value).unwrap();
        let loaded: Option<TestJsonValue> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(value));
        assert!(!path.with_extension("tmp").exists());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_json_missing_file_is_none() {
        let path = unique_path("timy_json_missing", "json");
        let loaded: Option<TestJsonValue> = read_json(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_paths_live_under_data_dir() {
        let paths = AppPaths::resolve(Some(PathBuf::from("/tmp/timy-data")));
        assert_eq!(paths.history_file, PathBuf::from("/tmp/timy-data/history.log"));
        assert_eq!(paths.settings_file, PathBuf::from("/tmp/timy-data/settings.json"));
        assert_eq!(paths.log_file, PathBuf::from("/tmp/timy-data/timy.log"));
    }

    #[test]
    fn test_default_paths_end_in_dot_timy() {
        let paths = AppPaths::resolve(None);
        assert!(paths.data_dir.ends_with(".timy"));
        assert!(paths.history_file.ends_with(".timy/history.log"));
    }
}
