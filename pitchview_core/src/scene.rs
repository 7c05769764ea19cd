//! The Scene Composer
//!
//! Builds a renderer-agnostic description of the pitch scene:
//! - **Static**: three ground planes and the strike zone wireframe
//! - **Dynamic**: one colored curve plus a release/arrival marker pair per
//!   pitch type
//! - **Layout**: title, camera, fixed axes, aspect ratio, legend
//!
//! Rendering layers (Plotly export, Rerun viewer) consume a [`Scene`] as is.

use crate::config::{FieldLayout, PitchViewConfig, StrikeZone, ViewConfig};
use crate::error::{CoreError, Result};
use crate::kinematics::{PitchGroups, PitchTypeAggregate};
use crate::palette::Rgb;
use crate::trajectory::Trajectory;
use nalgebra::Point3;
use serde::Serialize;
use tracing::warn;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A flat, solid, horizontal plane sampled on a square grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub name: String,
    /// Grid coordinates along x
    pub x: Vec<f64>,
    /// Grid coordinates along y
    pub y: Vec<f64>,
    /// Constant height
    pub z: f64,
    pub color: Rgb,
    pub opacity: f64,
}

impl Surface {
    /// `[x_min, x_max, y_min, y_max]`
    pub fn bounds(&self) -> [f64; 4] {
        let first = |v: &[f64]| v.first().copied().unwrap_or(0.0);
        let last = |v: &[f64]| v.last().copied().unwrap_or(0.0);
        [first(&self.x), last(&self.x), first(&self.y), last(&self.y)]
    }
}

/// A connected 3D line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
    pub color: Rgb,
    pub width: f64,
    /// Legend label; `None` keeps the line out of the legend
    pub legend: Option<String>,
}

/// A set of fixed-size markers. Never shown in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSet {
    pub points: Vec<Point3<f64>>,
    pub color: Rgb,
    pub size: f64,
}

/// Everything drawn for one pitch type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTrace {
    pub pitch_type: String,
    pub color: Rgb,
    /// Number of pitches behind the mean
    pub pitch_count: usize,
    pub curve: Polyline,
    /// Release point and last visible sample
    pub endpoints: MarkerSet,
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    /// Horizontal position in paper coordinates, anchored at its center
    pub x: f64,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub range: [f64; 2],
    pub show_tick_labels: bool,
    pub title: String,
}

impl Axis {
    fn bare(range: [f64; 2]) -> Self {
        Self {
            range,
            show_tick_labels: false,
            title: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    pub eye: [f64; 3],
}

/// Legend pinned to the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub x_anchor: String,
    pub y_anchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    pub title: Title,
    pub camera: Camera,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub z_axis: Axis,
    pub aspect_ratio: [f64; 3],
    pub legend: Legend,
}

/// The complete scene for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub layout: SceneLayout,
    /// Batter's box, grass, mound
    pub ground: Vec<Surface>,
    /// Two horizontal rectangles and four vertical edges
    pub strike_zone: Vec<Polyline>,
    /// One entry per visible pitch type, in grouping order
    pub pitches: Vec<PitchTrace>,
}

impl Scene {
    /// Pitch type codes in legend order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.pitches.iter().map(|p| p.pitch_type.as_str()).collect()
    }

    /// Looks up the trace of one pitch type.
    pub fn pitch(&self, pitch_type: &str) -> Option<&PitchTrace> {
        self.pitches.iter().find(|p| p.pitch_type == pitch_type)
    }
}

// =============================================================================
// COMPOSITION
// =============================================================================

/// `n` evenly spaced values over `[start, end]`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Batter's box, grass and mound planes at ground height.
pub fn ground_planes(field: &FieldLayout, zone: &StrikeZone) -> Vec<Surface> {
    let z = zone.bottom + field.ground_offset;
    let n = field.grid_resolution;
    let [x0, x1] = field.x_extent;

    let plane = |name: &str, [y0, y1]: [f64; 2], color: Rgb| Surface {
        name: name.to_string(),
        x: linspace(x0, x1, n),
        y: linspace(y0, y1, n),
        z,
        color,
        opacity: 1.0,
    };

    vec![
        plane("batters_box", field.batters_box, Rgb::CLAY),
        plane("ground", field.ground, Rgb::GRASS),
        plane("mound", field.mound, Rgb::MOUND),
    ]
}

/// Strike zone outline: closed rectangles at top and bottom, then the four
/// vertical edges.
pub fn strike_zone_wireframe(zone: &StrikeZone, width: f64) -> Vec<Polyline> {
    let line = |points: Vec<Point3<f64>>| Polyline {
        points,
        color: Rgb::BLACK,
        width,
        legend: None,
    };

    let rectangle = |z: f64| {
        line(vec![
            Point3::new(zone.left, zone.front, z),
            Point3::new(zone.right, zone.front, z),
            Point3::new(zone.right, zone.back, z),
            Point3::new(zone.left, zone.back, z),
            Point3::new(zone.left, zone.front, z),
        ])
    };

    let corners = [
        (zone.left, zone.front),
        (zone.right, zone.front),
        (zone.left, zone.back),
        (zone.right, zone.back),
    ];

    let mut lines = vec![rectangle(zone.top), rectangle(zone.bottom)];
    lines.extend(corners.iter().map(|&(x, y)| {
        line(vec![
            Point3::new(x, y, zone.bottom),
            Point3::new(x, y, zone.top),
        ])
    }));
    lines
}

/// Curve and endpoint markers for one pitch type.
///
/// Returns `None` when nothing survived the visibility clip; that pitch type
/// is simply left out of the scene.
pub fn pitch_trace(
    aggregate: &PitchTypeAggregate,
    trajectory: &Trajectory,
    color: Rgb,
    view: &ViewConfig,
) -> Option<PitchTrace> {
    let Some(last) = trajectory.last() else {
        warn!(
            "Pitch type {} has no visible samples, leaving it out",
            aggregate.pitch_type
        );
        return None;
    };

    Some(PitchTrace {
        pitch_type: aggregate.pitch_type.clone(),
        color,
        pitch_count: aggregate.count,
        curve: Polyline {
            points: trajectory.points.clone(),
            color,
            width: view.trajectory_width,
            legend: Some(aggregate.pitch_type.clone()),
        },
        endpoints: MarkerSet {
            points: vec![aggregate.mean.release_point(), *last],
            color,
            size: view.marker_size,
        },
    })
}

/// Camera, axes, legend and title.
pub fn layout(title: &str, view: &ViewConfig) -> SceneLayout {
    SceneLayout {
        title: Title {
            text: title.to_string(),
            x: 0.5,
            font_size: view.title_font_size,
        },
        camera: Camera {
            eye: view.camera_eye,
        },
        x_axis: Axis::bare(view.x_range),
        y_axis: Axis::bare(view.y_range),
        z_axis: Axis::bare(view.z_range),
        aspect_ratio: view.aspect_ratio,
        legend: Legend {
            title: view.legend_title.clone(),
            x: 0.0,
            y: 1.0,
            x_anchor: "left".to_string(),
            y_anchor: "top".to_string(),
        },
    }
}

/// Assembles the full scene.
///
/// `trajectories` and `colors` are parallel to `groups.iter()`.
///
/// # Errors
/// `CoreError::EmptyDataset` naming `player` if `groups` is empty.
pub fn compose(
    player: &str,
    title: &str,
    groups: &PitchGroups,
    trajectories: &[Trajectory],
    colors: &[Rgb],
    config: &PitchViewConfig,
) -> Result<Scene> {
    if groups.is_empty() {
        return Err(CoreError::empty(player));
    }

    let pitches = groups
        .iter()
        .zip(trajectories)
        .zip(colors)
        .filter_map(|((aggregate, trajectory), &color)| {
            pitch_trace(aggregate, trajectory, color, &config.view)
        })
        .collect();

    Ok(Scene {
        layout: layout(title, &config.view),
        ground: ground_planes(&config.field, &config.zone),
        strike_zone: strike_zone_wireframe(&config.zone, config.view.zone_line_width),
        pitches,
    })
}
