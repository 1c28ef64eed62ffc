//! Storage layer for airdispatch.
//!
//! This module persists flight records as a JSON array in a single file.
//! Only the three flat record fields are stored; passengers never touch disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::flight::FlightRecord;

/// Default location of the flights file, relative to the working directory.
pub const DEFAULT_FLIGHTS_PATH: &str = "result/flights.json";

/// Indentation used in the flights file.
const INDENT: &[u8] = b"    ";

/// JSON file store for flight records.
///
/// The store is bound to one path for its whole lifetime and holds no other
/// state. Every [`save`](Self::save) replaces the file completely, by writing
/// a sibling temporary file and renaming it over the target.
#[derive(Debug, Clone)]
pub struct FlightStore {
    /// Path to the flights file.
    path: PathBuf,
}

impl FlightStore {
    /// Bind a store to the given file path.
    ///
    /// Nothing is created on disk until the first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the flights file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all records to the file, replacing whatever was there.
    ///
    /// Missing parent directories are created first. Output is indented with
    /// four spaces and keeps non-ASCII text as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created, the records cannot
    /// be serialized, or the file cannot be written.
    pub fn save(&self, records: &[FlightRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Create parent directories if needed
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut buf = Vec::new();
        records.serialize(&mut serde_json::Serializer::with_formatter(
            &mut buf,
            PrettyFormatter::with_indent(INDENT),
        ))?;

        // Stage next to the target so the rename stays on one filesystem and
        // a failed write leaves the previous file intact.
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| self.write_error(source))?;
        staged
            .write_all(&buf)
            .map_err(|source| self.write_error(source))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;

        debug!("Wrote {} flight records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::FileWrite {
            path: self.path.clone(),
            source,
        }
    }

    /// Read all records from the file.
    ///
    /// A missing file yields an empty list and is not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read for any reason other than
    /// not existing, or does not contain a JSON array of flight records.
    pub fn load(&self) -> Result<Vec<FlightRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No flights file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::FileRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records: Vec<FlightRecord> =
            serde_json::from_str(&contents).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} flight records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

impl Default for FlightStore {
    fn default() -> Self {
        Self::new(DEFAULT_FLIGHTS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, destination: &str, time: &str) -> FlightRecord {
        FlightRecord {
            flight_number: number.to_string(),
            destination: destination.to_string(),
            departure_time: time.to_string(),
        }
    }

    #[test]
    fn test_default_path() {
        let store = FlightStore::default();
        assert_eq!(store.path(), Path::new("result/flights.json"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("flights.json");
        let store = FlightStore::new(&path);

        let records = store.load().unwrap();

        assert!(records.is_empty());
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlightStore::new(dir.path().join("flights.json"));
        let records = vec![
            record("SU100", "Москва", "12:30"),
            record("BA200", "Лондон", "15:45"),
            record("SU100", "Сочи", "завтра"),
        ];

        store.save(&records).unwrap();

        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c").join("flights.json");
        let store = FlightStore::new(&path);

        store.save(&[record("SU100", "Москва", "12:30")]).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlightStore::new(dir.path().join("flights.json"));

        store
            .save(&[
                record("SU100", "Москва", "12:30"),
                record("BA200", "Лондон", "15:45"),
            ])
            .unwrap();
        store.save(&[record("LH300", "Berlin", "09:00")]).unwrap();

        assert_eq!(store.load().unwrap(), vec![record("LH300", "Berlin", "09:00")]);
    }

    #[test]
    fn test_save_uses_four_space_indent_and_literal_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlightStore::new(dir.path().join("flights.json"));

        store.save(&[record("SU100", "Москва", "12:30")]).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();

        assert_eq!(
            contents,
            "[\n    {\n        \"flight_number\": \"SU100\",\n        \"destination\": \"Москва\",\n        \"departure_time\": \"12:30\"\n    }\n]"
        );
    }

    #[test]
    fn test_save_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlightStore::new(dir.path().join("flights.json"));

        store.save(&[]).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.json");
        fs::write(&path, "[{\"flight_number\": ").unwrap();

        let err = FlightStore::new(&path).load().unwrap_err();

        assert!(err.is_parse_error());
        assert!(err.to_string().contains("flights.json"));
    }

    #[test]
    fn test_load_wrong_shape_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.json");
        fs::write(&path, r#"{"flight_number": "SU100"}"#).unwrap();

        let err = FlightStore::new(&path).load().unwrap_err();

        assert!(err.is_parse_error());
    }

    #[test]
    fn test_load_through_file_parent_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = FlightStore::new(blocker.join("flights.json")).load().unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_save_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlightStore::new(dir.path().join("flights.json"));

        store.save(&[record("SU100", "Москва", "12:30")]).unwrap();
        store.save(&[record("BA200", "Лондон", "15:45")]).unwrap();

        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, ["flights.json"]);
    }

    #[test]
    fn test_failed_save_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.json");
        let store = FlightStore::new(&path);
        store.save(&[record("SU100", "Москва", "12:30")]).unwrap();

        // A non-empty directory at the target makes the final rename fail
        let blocked = FlightStore::new(dir.path().join("blocked"));
        fs::create_dir(blocked.path()).unwrap();
        fs::write(blocked.path().join("keep"), "x").unwrap();
        let err = blocked.save(&[record("BA200", "Лондон", "15:45")]).unwrap_err();

        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(blocked.path().join("keep").is_file());
        assert_eq!(store.load().unwrap(), vec![record("SU100", "Москва", "12:30")]);
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn test_save_into_file_as_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = FlightStore::new(blocker.join("flights.json"));

        let result = store.save(&[record("SU100", "Москва", "12:30")]);

        assert!(result.is_err());
    }
}
