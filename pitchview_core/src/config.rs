//! Simulation and scene constants.
//!
//! Every number the pipeline uses lives here with its default. All structs
//! deserialize with `#[serde(default)]`, so a config file only needs the
//! fields it overrides.

use serde::{Deserialize, Serialize};

/// Top-level configuration for one visualization request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchViewConfig {
    pub flight: FlightConfig,
    pub zone: StrikeZone,
    pub field: FieldLayout,
    pub view: ViewConfig,
}

impl PitchViewConfig {
    /// Parses a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Time sampling of a pitch's flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Simulated flight duration in seconds
    pub duration_secs: f64,

    /// Number of uniformly spaced samples over `[0, duration_secs]`
    pub steps: usize,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.6,
            steps: 1000,
        }
    }
}

impl FlightConfig {
    /// Returns the sample times, both ends inclusive.
    pub fn sample_times(&self) -> impl Iterator<Item = f64> + '_ {
        let dt = if self.steps > 1 {
            self.duration_secs / (self.steps - 1) as f64
        } else {
            0.0
        };
        (0..self.steps).map(move |i| i as f64 * dt)
    }
}

/// Strike zone box in feet.
///
/// `y` is distance from home plate, growing toward the mound. The zone is
/// drawn as a flat frame at `front == back`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikeZone {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub front: f64,
    pub back: f64,
}

impl Default for StrikeZone {
    fn default() -> Self {
        Self {
            top: 3.5,
            bottom: 1.6,
            left: -0.833,
            right: 0.833,
            front: 1.714,
            back: 1.714,
        }
    }
}

/// Ground geometry around the flight path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLayout {
    /// Lateral extent `[min, max]` of every ground plane
    pub x_extent: [f64; 2],

    /// Ground height relative to the strike zone bottom
    pub ground_offset: f64,

    /// `y` range of the batter's box plane
    pub batters_box: [f64; 2],

    /// `y` range of the grass between box and mound
    pub ground: [f64; 2],

    /// `y` range of the mound plane
    pub mound: [f64; 2],

    /// Grid points per side of each plane
    pub grid_resolution: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            x_extent: [-5.0, 5.0],
            ground_offset: -0.5,
            batters_box: [0.0, 8.0],
            ground: [8.0, 45.0],
            mound: [45.0, 75.0],
            grid_resolution: 10,
        }
    }
}

/// Camera, axes, and styling of the rendered scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Season shown in the title
    pub season: i32,

    pub title_font_size: u32,

    /// Camera eye in normalized scene coordinates
    pub camera_eye: [f64; 3],

    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub z_range: [f64; 2],

    /// Axis scaling; the flight axis is stretched
    pub aspect_ratio: [f64; 3],

    pub trajectory_width: f64,
    pub zone_line_width: f64,
    pub marker_size: f64,

    pub legend_title: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            season: 2024,
            title_font_size: 20,
            camera_eye: [0.0, -6.45, -0.25],
            x_range: [-4.0, 4.0],
            y_range: [1.0, 60.0],
            z_range: [0.8, 7.0],
            aspect_ratio: [1.0, 12.0, 1.0],
            trajectory_width: 8.0,
            zone_line_width: 4.0,
            marker_size: 6.0,
            legend_title: "Pitch Type".to_string(),
        }
    }
}
