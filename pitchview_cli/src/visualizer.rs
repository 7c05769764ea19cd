//! Rerun viewer for pitch scenes.
//!
//! Only available with the `visualization` feature; without it every method
//! is a no-op and the logger reports itself as disabled.
//!
//! # What Gets Logged
//!
//! - Ground planes as thin boxes
//! - Strike zone edges as line strips
//! - One line strip plus release/arrival points per pitch type
//! - The title as a text document

#[cfg(feature = "visualization")]
use rerun::{
    Boxes3D, LineStrips3D, Points3D, Radius, RecordingStream, RecordingStreamBuilder,
    TextDocument,
};
use pitchview_core::Scene;

#[cfg(feature = "visualization")]
const PLANE_THICKNESS: f32 = 0.02;

/// Rerun logger for a single scene.
pub struct RerunLogger {
    #[cfg(feature = "visualization")]
    rec: Option<RecordingStream>,

    enabled: bool,
}

impl RerunLogger {
    pub fn disabled() -> Self {
        Self {
            #[cfg(feature = "visualization")]
            rec: None,
            enabled: false,
        }
    }

    /// Spawns a viewer, or saves to `rrd` when given.
    #[cfg(feature = "visualization")]
    pub fn new(app_id: &str, rrd: Option<&std::path::Path>) -> Self {
        let builder = RecordingStreamBuilder::new(app_id);
        let rec = match rrd {
            Some(path) => builder.save(path),
            None => builder.spawn(),
        };

        match rec {
            Ok(rec) => {
                if let Err(e) = rec.log_static("pitch", &rerun::ViewCoordinates::RIGHT_HAND_Z_UP()) {
                    tracing::warn!("Failed to set view coordinates: {:?}", e);
                }
                tracing::info!("Rerun visualization enabled");
                Self {
                    rec: Some(rec),
                    enabled: true,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to initialize Rerun: {:?}", e);
                Self::disabled()
            }
        }
    }

    #[cfg(not(feature = "visualization"))]
    pub fn new(_app_id: &str, _rrd: Option<&std::path::Path>) -> Self {
        tracing::info!("Rerun visualization not available (compile with --features visualization)");
        Self::disabled()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs every part of the scene.
    #[cfg(feature = "visualization")]
    pub fn log_scene(&self, scene: &Scene) -> anyhow::Result<()> {
        let Some(ref rec) = self.rec else {
            return Ok(());
        };

        rec.log_static("pitch/title", &TextDocument::new(scene.layout.title.text.as_str()))?;

        for surface in &scene.ground {
            let [x0, x1, y0, y1] = surface.bounds();
            rec.log_static(
                format!("pitch/ground/{}", surface.name),
                &Boxes3D::from_centers_and_sizes(
                    [[
                        ((x0 + x1) / 2.0) as f32,
                        ((y0 + y1) / 2.0) as f32,
                        surface.z as f32,
                    ]],
                    [[(x1 - x0) as f32, (y1 - y0) as f32, PLANE_THICKNESS]],
                )
                .with_colors([surface.color.with_alpha(255)])
                .with_labels([surface.name.as_str()]),
            )?;
        }

        let zone: Vec<Vec<[f32; 3]>> = scene
            .strike_zone
            .iter()
            .map(|line| to_f32(&line.points))
            .collect();
        if let Some(first) = scene.strike_zone.first() {
            rec.log_static(
                "pitch/strike_zone",
                &LineStrips3D::new(zone)
                    .with_colors([first.color.with_alpha(255)])
                    .with_radii([Radius::new_ui_points(first.width as f32)]),
            )?;
        }

        for pitch in &scene.pitches {
            let path = format!("pitch/types/{}", pitch.pitch_type);
            let color = pitch.color.with_alpha(255);

            rec.log_static(
                format!("{}/curve", path),
                &LineStrips3D::new([to_f32(&pitch.curve.points)])
                    .with_colors([color])
                    .with_radii([Radius::new_ui_points(pitch.curve.width as f32)])
                    .with_labels([format!("{} ({})", pitch.pitch_type, pitch.pitch_count)]),
            )?;
            rec.log_static(
                format!("{}/endpoints", path),
                &Points3D::new(to_f32(&pitch.endpoints.points))
                    .with_colors([color])
                    .with_radii([Radius::new_ui_points(pitch.endpoints.size as f32)]),
            )?;
        }

        Ok(())
    }

    #[cfg(not(feature = "visualization"))]
    pub fn log_scene(&self, _scene: &Scene) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "visualization")]
fn to_f32(points: &[nalgebra::Point3<f64>]) -> Vec<[f32; 3]> {
    points
        .iter()
        .map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect()
}
