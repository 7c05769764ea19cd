//! End-to-end: store records through the viewer to a composed scene.

use approx::assert_relative_eq;
use pitchview_core::palette::husl_palette;
use pitchview_core::{CoreError, PitchViewConfig, PitchViewer};
use pitchview_env::{JsonFileStore, MemoryStore, PitchRecord};
use std::sync::Arc;

const SKENES: &str = "Skenes, Paul";

fn skenes_store() -> MemoryStore {
    MemoryStore::new(vec![
        // Mirror images of the same fastball, one from each side
        PitchRecord::new(
            SKENES,
            "FF",
            "R",
            [-1.8, 54.0, 6.0],
            [6.5, -140.0, -5.0],
            [-14.0, 30.0, -13.0],
        ),
        PitchRecord::new(
            SKENES,
            "FF",
            "L",
            [1.8, 54.0, 6.0],
            [-6.5, -140.0, -5.0],
            [14.0, 30.0, -13.0],
        ),
        PitchRecord::new(
            SKENES,
            "CU",
            "R",
            [-1.6, 54.5, 6.2],
            [3.0, -115.0, 2.0],
            [6.0, 24.0, -40.0],
        ),
        // Somebody else's pitch must not leak in
        PitchRecord::new(
            "Cole, Gerrit",
            "SL",
            "R",
            [-2.0, 54.0, 5.8],
            [5.0, -125.0, -3.0],
            [4.0, 26.0, -30.0],
        ),
    ])
}

#[tokio::test]
async fn test_two_pitch_types_end_to_end() {
    let viewer = PitchViewer::new(Arc::new(skenes_store()), PitchViewConfig::default());

    let scene = viewer.plot("Paul Skenes").await.unwrap();

    assert_eq!(scene.layout.title.text, "Paul Skenes, 2024");
    assert_eq!(scene.legend_labels(), vec!["CU", "FF"]);

    let palette = husl_palette(2);
    for (trace, color) in scene.pitches.iter().zip(&palette) {
        assert_eq!(trace.color, *color);
        assert_eq!(trace.curve.color, *color);
        assert_eq!(trace.endpoints.color, *color);
        assert_eq!(trace.endpoints.points.len(), 2);
        assert!(trace.curve.points.len() >= 2);
    }

    let ff = scene.pitch("FF").unwrap();
    assert_eq!(ff.pitch_count, 2);

    // Both fastballs normalize to the same release side
    let release = ff.curve.points[0];
    assert_relative_eq!(release.x, 1.8, epsilon = 1e-12);
    assert_relative_eq!(release.y, 54.0, epsilon = 1e-12);
    assert_relative_eq!(release.z, 6.0, epsilon = 1e-12);
    assert_eq!(ff.endpoints.points[0], release);

    let front = PitchViewConfig::default().zone.front;
    for trace in &scene.pitches {
        assert!(trace.curve.points.iter().all(|p| p.y >= front));
    }

    assert_eq!(scene.ground.len(), 3);
    assert_eq!(scene.strike_zone.len(), 6);
}

#[tokio::test]
async fn test_player_with_no_rows_presents_message() {
    let viewer = PitchViewer::new(Arc::new(skenes_store()), PitchViewConfig::default());

    let err = viewer.plot("tarik skubal").await.unwrap_err();
    assert!(matches!(err, CoreError::EmptyDataset { .. }));

    let shown = viewer.present("tarik skubal").await;
    assert_eq!(
        shown.error(),
        Some("Error: No data found for player Tarik Skubal.")
    );
}

#[tokio::test]
async fn test_season_comes_from_config() {
    let mut config = PitchViewConfig::default();
    config.view.season = 2023;
    let viewer = PitchViewer::new(Arc::new(skenes_store()), config);

    let scene = viewer.plot("PAUL skenes").await.unwrap();
    assert_eq!(scene.layout.title.text, "Paul Skenes, 2023");
}

#[tokio::test]
async fn test_malformed_row_dropped_not_fatal() {
    let path = std::env::temp_dir().join(format!(
        "pitchview_core_malformed_{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"{"pitching_data": [
            {"player_name": "Skenes, Paul", "game_year": 2024, "pitch_type": "FF",
             "p_throws": "R", "release_pos_x": -1.8, "release_pos_y": 54.0,
             "release_pos_z": 6.0, "vx0": 6.5, "vy0": -140.0, "vz0": -5.0,
             "ax": -14.0, "ay": 30.0, "az": -13.0},
            {"player_name": "Skenes, Paul", "game_year": "2024", "pitch_type": "FF",
             "p_throws": "R", "release_pos_x": "n/a", "release_pos_y": 54.0,
             "release_pos_z": 6.0, "vx0": 6.5, "vy0": -140.0, "vz0": -5.0,
             "ax": -14.0, "ay": 30.0, "az": -13.0}
        ]}"#,
    )
    .unwrap();

    let viewer = PitchViewer::new(Arc::new(JsonFileStore::new(&path)), PitchViewConfig::default());
    let scene = viewer.plot("Paul Skenes").await.unwrap();

    assert_eq!(scene.legend_labels(), vec!["FF"]);
    assert_eq!(scene.pitch("FF").unwrap().pitch_count, 1);

    std::fs::remove_file(path).ok();
}
