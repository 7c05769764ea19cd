//! The Presentation Adapter
//!
//! The only boundary where an error turns into text. Below this point every
//! failure is a `CoreError` value; above it the UI gets either a scene or a
//! single message to show.

use crate::config::PitchViewConfig;
use crate::error::{CoreError, Result};
use crate::pipeline::build_scene;
use crate::player::PlayerName;
use crate::scene::Scene;
use pitchview_env::{PitchStore, RequestId};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

/// What the UI shows for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Scene(Box<Scene>),
    Error(String),
}

impl Presentation {
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Presentation::Scene(scene) => Some(scene),
            Presentation::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Presentation::Scene(_) => None,
            Presentation::Error(message) => Some(message),
        }
    }
}

/// Resolves player names against a store and builds their scenes.
///
/// Holds no per-request state: every call fetches, aggregates and composes
/// from scratch.
pub struct PitchViewer<S: PitchStore + ?Sized> {
    store: Arc<S>,
    config: PitchViewConfig,
}

impl<S: PitchStore + ?Sized> PitchViewer<S> {
    pub fn new(store: Arc<S>, config: PitchViewConfig) -> Self {
        Self { store, config }
    }

    /// Builds the scene for a free-text player name.
    ///
    /// # Errors
    /// - `CoreError::InvalidName` for anything but "First Last"
    /// - `CoreError::UpstreamFailure` if the store fails
    /// - `CoreError::EmptyDataset` if there is nothing to draw
    pub async fn plot(&self, raw_name: &str) -> Result<Scene> {
        let player = PlayerName::parse(raw_name)?;
        let key = player.query_key();
        let span = info_span!("request", id = %RequestId::new(), player = %key);

        async {
            info!("Fetching pitches from {}", self.store.describe());
            let records = self.store.fetch_pitches(&key).await?;

            let scene = build_scene(&records, &player, &self.config)?;
            info!(
                "Scene ready: {} records, {} pitch types",
                records.len(),
                scene.pitches.len()
            );
            Ok::<_, CoreError>(scene)
        }
        .instrument(span)
        .await
    }

    /// Like [`plot`](Self::plot), with every failure rendered as a message.
    pub async fn present(&self, raw_name: &str) -> Presentation {
        match self.plot(raw_name).await {
            Ok(scene) => Presentation::Scene(Box::new(scene)),
            Err(e) => {
                warn!("Request for {:?} failed: {}", raw_name, e);
                Presentation::Error(format!("Error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchview_env::{MemoryStore, PitchRecord};

    fn fastball(player: &str, hand: &str) -> PitchRecord {
        PitchRecord::new(
            player,
            "FF",
            hand,
            [-1.8, 54.0, 6.1],
            [7.0, -140.0, -6.0],
            [-15.0, 30.0, -14.0],
        )
    }

    fn viewer(store: MemoryStore) -> PitchViewer<MemoryStore> {
        PitchViewer::new(Arc::new(store), PitchViewConfig::default())
    }

    #[tokio::test]
    async fn test_plot_resolves_name_to_store_key() {
        let v = viewer(MemoryStore::new(vec![
            fastball("Skenes, Paul", "R"),
            fastball("Cole, Gerrit", "R"),
        ]));

        let scene = v.plot("paul SKENES").await.unwrap();
        assert_eq!(scene.layout.title.text, "Paul Skenes, 2024");
        assert_eq!(scene.legend_labels(), vec!["FF"]);
        assert_eq!(scene.pitch("FF").unwrap().pitch_count, 1);
    }

    #[tokio::test]
    async fn test_unknown_player_is_empty_dataset() {
        let v = viewer(MemoryStore::new(vec![fastball("Skenes, Paul", "R")]));

        let err = v.plot("Nobody Atall").await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyDataset { .. }));

        let shown = v.present("Nobody Atall").await;
        let message = shown.error().unwrap();
        assert!(message.starts_with("Error: "));
        assert!(message.contains("Nobody Atall"));
        assert!(shown.scene().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_becomes_upstream() {
        let v = viewer(MemoryStore::failing("connection refused"));

        let err = v.plot("Paul Skenes").await.unwrap_err();
        assert!(matches!(err, CoreError::UpstreamFailure(_)));

        let shown = v.present("Paul Skenes").await;
        assert!(shown.error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_bad_name_never_reaches_store() {
        // A failing store would turn any fetch into UpstreamFailure.
        let v = viewer(MemoryStore::failing("should not be called"));

        let err = v.plot("Skenes").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_works_behind_trait_object() {
        let store: Arc<dyn PitchStore> =
            Arc::new(MemoryStore::new(vec![fastball("Skenes, Paul", "R")]));
        let v = PitchViewer::new(store, PitchViewConfig::default());

        assert!(v.present("Paul Skenes").await.scene().is_some());
    }
}
