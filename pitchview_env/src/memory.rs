//! In-memory implementation of `PitchStore`.

use crate::error::EnvError;
use crate::store::PitchStore;
use crate::types::PitchRecord;
use async_trait::async_trait;

/// Store backed by a `Vec` of records.
///
/// Used by tests and demos. A store built with [`MemoryStore::failing`]
/// answers every query with an error, which is how upstream faults are
/// exercised without a real backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<PitchRecord>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Creates a store holding the given records.
    pub fn new(records: Vec<PitchRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Creates a store whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl PitchStore for MemoryStore {
    async fn fetch_pitches(&self, player_key: &str) -> Result<Vec<PitchRecord>, EnvError> {
        if let Some(ref message) = self.failure {
            return Err(EnvError::store(message.clone()));
        }

        Ok(self
            .records
            .iter()
            .filter(|r| r.belongs_to(player_key))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("memory({} records)", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: &str, pitch_type: &str) -> PitchRecord {
        PitchRecord::new(
            player,
            pitch_type,
            "R",
            [-1.5, 54.0, 6.0],
            [6.0, -135.0, -5.0],
            [-12.0, 28.0, -15.0],
        )
    }

    #[tokio::test]
    async fn test_fetch_filters_by_player() {
        let store = MemoryStore::new(vec![
            record("Skenes, Paul", "FF"),
            record("Cole, Gerrit", "FF"),
            record("Skenes, Paul", "SL"),
        ]);

        let rows = store.fetch_pitches("Skenes, Paul").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.belongs_to("Skenes, Paul")));
    }

    #[tokio::test]
    async fn test_unknown_player_is_empty_not_error() {
        let store = MemoryStore::new(vec![record("Skenes, Paul", "FF")]);
        let rows = store.fetch_pitches("Nobody, Some").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = MemoryStore::failing("connection reset");
        let err = store.fetch_pitches("Skenes, Paul").await.unwrap_err();
        assert!(matches!(err, EnvError::Store(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
