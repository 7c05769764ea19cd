//! Production implementation of `PitchStore` backed by a JSON export.

use crate::error::EnvError;
use crate::store::PitchStore;
use crate::types::PitchRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the collection the pitching table is exported under.
pub const PITCHING_COLLECTION: &str = "pitching_data";

/// Splits an export into its rows. Accepted layouts: a bare array, or the
/// array wrapped in its collection name.
fn export_rows(export: Value) -> Result<Vec<Value>, EnvError> {
    match export {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove(PITCHING_COLLECTION) {
            Some(Value::Array(rows)) => Ok(rows),
            Some(_) => Err(EnvError::decode(format!(
                "'{}' is not an array",
                PITCHING_COLLECTION
            ))),
            None => Err(EnvError::decode(format!(
                "expected an array or a '{}' collection",
                PITCHING_COLLECTION
            ))),
        },
        _ => Err(EnvError::decode(format!(
            "expected an array or a '{}' collection",
            PITCHING_COLLECTION
        ))),
    }
}

/// Store reading a JSON export of the pitching table.
///
/// The file is read on every fetch, so each request sees the file as it is
/// at that moment and nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the file at `path`. The file is not touched
    /// until the first fetch.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PitchStore for JsonFileStore {
    async fn fetch_pitches(&self, player_key: &str) -> Result<Vec<PitchRecord>, EnvError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| EnvError::Io(format!("{}: {}", self.path.display(), e)))?;

        let rows = export_rows(serde_json::from_str(&raw)?)?;
        let total = rows.len();

        // Decoded row by row: a malformed row is skipped, not fatal
        let matching: Vec<PitchRecord> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| match serde_json::from_value::<PitchRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping row {} of {}: {}", i, self.path.display(), e);
                    None
                }
            })
            .filter(|r| r.belongs_to(player_key))
            .collect();

        debug!(
            "{} of {} rows in {} match '{}'",
            matching.len(),
            total,
            self.path.display(),
            player_key
        );

        Ok(matching)
    }

    fn describe(&self) -> String {
        format!("json-file({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pitchview-{}.json", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_reads_bare_array() {
        let path = temp_file(
            r#"[
                {"player_name": "Skenes, Paul", "pitch_type": "FF"},
                {"player_name": "Cole, Gerrit", "pitch_type": "SL"}
            ]"#,
        );
        let store = JsonFileStore::new(&path);

        let rows = store.fetch_pitches("Skenes, Paul").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pitch_type.as_deref(), Some("FF"));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_reads_collection_wrapper() {
        let path = temp_file(
            r#"{"pitching_data": [
                {"player_name": "Skenes, Paul", "pitch_type": "FF"},
                {"player_name": "Skenes, Paul", "pitch_type": "CH"}
            ]}"#,
        );
        let store = JsonFileStore::new(&path);

        let rows = store.fetch_pitches("Skenes, Paul").await.unwrap();
        assert_eq!(rows.len(), 2);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_bad_row_does_not_fail_fetch() {
        let path = temp_file(
            r#"[
                {"player_name": "Skenes, Paul", "pitch_type": "FF", "p_throws": "R",
                 "release_pos_x": -1.8, "release_pos_y": 54.0, "release_pos_z": 6.0,
                 "vx0": 6.5, "vy0": -140.0, "vz0": -5.0,
                 "ax": -14.0, "ay": 30.0, "az": -13.0},
                {"player_name": "Skenes, Paul", "pitch_type": "FF", "p_throws": "R",
                 "release_pos_x": "n/a", "release_pos_y": 54.0, "release_pos_z": 6.0,
                 "vx0": 6.5, "vy0": -140.0, "vz0": -5.0,
                 "ax": -14.0, "ay": 30.0, "az": -13.0},
                "not a row"
            ]"#,
        );
        let store = JsonFileStore::new(&path);

        let rows = store.fetch_pitches("Skenes, Paul").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].release_pos_x, Some(-1.8));
        assert_eq!(rows[1].release_pos_x, None);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_wrong_layout_is_decode_error() {
        let path = temp_file(r#"{"rows": []}"#);
        let store = JsonFileStore::new(&path);

        let err = store.fetch_pitches("Skenes, Paul").await.unwrap_err();
        assert!(matches!(err, EnvError::Decode(ref m) if m.contains(PITCHING_COLLECTION)));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let store = JsonFileStore::new("/definitely/not/here/pitches.json");
        let err = store.fetch_pitches("Skenes, Paul").await.unwrap_err();
        assert!(matches!(err, EnvError::Io(_)));
    }

    #[tokio::test]
    async fn test_garbage_is_decode_error() {
        let path = temp_file("this is not json");
        let store = JsonFileStore::new(&path);

        let err = store.fetch_pitches("Skenes, Paul").await.unwrap_err();
        assert!(matches!(err, EnvError::Decode(_)));

        std::fs::remove_file(path).ok();
    }
}
