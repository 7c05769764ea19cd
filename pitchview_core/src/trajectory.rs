//! The Trajectory Sampler
//!
//! Samples the closed-form constant-acceleration path of a mean pitch and
//! keeps only the part in front of the strike zone.
//!
//! Convention: `y` is distance from home plate, increasing toward the mound.
//! A sample is visible while `y(t) >= y_front`.

use crate::config::FlightConfig;
use crate::kinematics::{Kinematics, PitchTypeAggregate};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Visible samples of one pitch type's flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<Point3<f64>>,
}

impl Trajectory {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// First visible sample.
    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Last visible sample, where the curve meets the zone front or the
    /// flight window ends.
    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    /// Both endpoints, if anything survived the clip.
    pub fn endpoints(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        Some((*self.first()?, *self.last()?))
    }
}

/// Samples `kinematics` over the flight window and clips at `y_front`.
///
/// Positions are evaluated in closed form at each sample time, so there is
/// no integration drift and the same input always yields the same points.
pub fn sample(kinematics: &Kinematics, flight: &FlightConfig, y_front: f64) -> Trajectory {
    let points = flight
        .sample_times()
        .map(|t| kinematics.position_at(t))
        .filter(|p| p.y >= y_front)
        .collect();

    Trajectory { points }
}

/// Samples the mean path of one pitch type.
pub fn sample_aggregate(
    aggregate: &PitchTypeAggregate,
    flight: &FlightConfig,
    y_front: f64,
) -> Trajectory {
    sample(&aggregate.mean, flight, y_front)
}
