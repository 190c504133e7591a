use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use gridblast_engine::HighScoreStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// On-disk form of the high score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
    updated_at: DateTime<Utc>,
}

/// High score kept in a small JSON file.
///
/// A missing or unreadable file counts as no high score. Write failures are
/// logged and otherwise ignored so that a read-only disk never interrupts a
/// game.
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> anyhow::Result<Option<HighScoreRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open high score file: {}", self.path.display())
                });
            }
        };
        let record = serde_json::from_reader(BufReader::new(file)).with_context(|| {
            format!("Failed to parse high score file: {}", self.path.display())
        })?;
        Ok(Some(record))
    }

    fn write(&self, record: &HighScoreRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create high score directory: {}", parent.display())
            })?;
        }
        // The record is only ever replaced whole, by rename.
        let tmp_path = self.tmp_path();
        let result = write_record(&tmp_path, record)
            .with_context(|| format!("Failed to write high score file: {}", tmp_path.display()))
            .and_then(|()| {
                fs::rename(&tmp_path, &self.path).with_context(|| {
                    format!("Failed to replace high score file: {}", self.path.display())
                })
            });
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

fn write_record(path: &Path, record: &HighScoreRecord) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writeln!(writer)?;
    writer.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> u64 {
        match self.read() {
            Ok(Some(record)) => {
                debug!(
                    high_score = record.high_score,
                    updated_at = %record.updated_at,
                    "loaded high score"
                );
                record.high_score
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no high score file yet");
                0
            }
            Err(e) => {
                warn!("{e:#}; starting from 0");
                0
            }
        }
    }

    fn save(&mut self, high_score: u64) {
        let record = HighScoreRecord {
            high_score,
            updated_at: Utc::now(),
        };
        if let Err(e) = self.write(&record) {
            warn!("{e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    /// Scratch directory removed when dropped.
    struct TestDir(PathBuf);

    impl TestDir {
        fn new(name: &str) -> Self {
            let path = env::temp_dir().join(format!("gridblast-test-{}-{name}", process::id()));
            let _ = fs::remove_dir_all(&path);
            Self(path)
        }

        fn join(&self, path: &str) -> PathBuf {
            self.0.join(path)
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TestDir::new("missing");
        let store = JsonFileHighScore::new(dir.join("high-score.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TestDir::new("roundtrip");
        let path = dir.join("nested/high-score.json");
        let mut store = JsonFileHighScore::new(&path);
        store.save(1234);
        assert_eq!(store.load(), 1234);

        let other = JsonFileHighScore::new(&path);
        assert_eq!(other.load(), 1234);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["high_score"], 1234);
        let updated_at = json["updated_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(updated_at).is_ok());
    }

    #[test]
    fn test_save_replaces_previous_record() {
        let dir = TestDir::new("replace");
        let path = dir.join("high-score.json");
        let mut store = JsonFileHighScore::new(&path);
        store.save(5);
        store.save(42);
        assert_eq!(store.load(), 42);
        assert!(!store.tmp_path().exists());
        assert_eq!(
            fs::read_dir(&dir.0).unwrap().count(),
            1,
            "only the record itself is left in the directory"
        );
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let dir = TestDir::new("corrupt");
        let path = dir.join("high-score.json");
        fs::create_dir_all(&dir.0).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileHighScore::new(&path);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = TestDir::new("unwritable");
        // A directory cannot be replaced by a file.
        let path = dir.join("high-score.json");
        fs::create_dir_all(&path).unwrap();
        let mut store = JsonFileHighScore::new(&path);
        store.save(10);
        assert_eq!(store.load(), 0);
        assert!(!store.tmp_path().exists());
    }
}
