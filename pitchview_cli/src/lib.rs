//! PitchView command-line front end.
//!
//! Drives one visualization request end to end: effective config, store
//! installation, scene construction through the presentation adapter, and
//! whichever outputs were asked for (figure file, Rerun viewer, JSON summary).

pub mod config;
pub mod exporter;
pub mod visualizer;

pub use config::Overrides;
pub use exporter::ExportFormat;
pub use visualizer::RerunLogger;

use pitchview_core::Presentation;
use serde::Serialize;

/// Machine-readable outcome of one run, printed with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub player: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub pitch_types: Vec<PitchTypeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeSummary {
    pub pitch_type: String,
    pub color: String,
    pub pitches: usize,
    pub samples: usize,
}

impl RunSummary {
    pub fn new(player: &str, presentation: &Presentation) -> Self {
        match presentation {
            Presentation::Scene(scene) => Self {
                player: player.to_string(),
                ok: true,
                title: Some(scene.layout.title.text.clone()),
                pitch_types: scene
                    .pitches
                    .iter()
                    .map(|p| PitchTypeSummary {
                        pitch_type: p.pitch_type.clone(),
                        color: p.color.css(),
                        pitches: p.pitch_count,
                        samples: p.curve.points.len(),
                    })
                    .collect(),
                error: None,
                output: None,
            },
            Presentation::Error(message) => Self {
                player: player.to_string(),
                ok: false,
                title: None,
                pitch_types: Vec::new(),
                error: Some(message.clone()),
                output: None,
            },
        }
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchview_core::{PitchViewConfig, PitchViewer};
    use pitchview_env::{MemoryStore, PitchRecord};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_summary_of_scene() {
        let store = MemoryStore::new(vec![PitchRecord::new(
            "Skenes, Paul",
            "FF",
            "R",
            [-1.8, 54.0, 6.0],
            [6.5, -140.0, -5.0],
            [-14.0, 30.0, -13.0],
        )]);
        let viewer = PitchViewer::new(Arc::new(store), PitchViewConfig::default());
        let shown = viewer.present("Paul Skenes").await;

        let summary = RunSummary::new("Paul Skenes", &shown).with_output(Some("out.html".into()));
        assert!(summary.ok);
        assert_eq!(summary.title.as_deref(), Some("Paul Skenes, 2024"));
        assert_eq!(summary.pitch_types.len(), 1);
        assert_eq!(summary.pitch_types[0].pitches, 1);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["output"], "out.html");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_summary_of_error() {
        let shown = Presentation::Error("Error: No data found for player A B.".into());
        let summary = RunSummary::new("A B", &shown);

        assert!(!summary.ok);
        assert!(summary.pitch_types.is_empty());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["error"], "Error: No data found for player A B.");
        assert!(value.get("title").is_none());
    }
}
