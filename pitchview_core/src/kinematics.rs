//! The Kinematics Aggregator
//!
//! Turns raw per-pitch records into one mean kinematic state per pitch type:
//! 1. **Filter**: drop records missing a pitch type, a valid hand, or any of
//!    the nine numeric fields
//! 2. **Normalize**: mirror onto the right-handed convention
//! 3. **Group**: by pitch type code, in lexicographic order
//! 4. **Average**: arithmetic mean of every component per group

use crate::error::{CoreError, Result};
use nalgebra::{Point3, Vector3};
use pitchview_env::PitchRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// Throwing hand of the pitcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl FromStr for Handedness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(Handedness::Left),
            "R" | "r" => Ok(Handedness::Right),
            other => Err(format!("Unknown handedness code: {:?}", other)),
        }
    }
}

/// Constant-acceleration kinematic state of a pitch at release.
///
/// Units: feet, ft/s, ft/s².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub release: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
}

impl Kinematics {
    pub fn new(release: Vector3<f64>, velocity: Vector3<f64>, acceleration: Vector3<f64>) -> Self {
        Self {
            release,
            velocity,
            acceleration,
        }
    }

    /// Extracts the kinematic fields of a record.
    ///
    /// Returns `None` unless all nine fields are present and finite.
    pub fn from_record(record: &PitchRecord) -> Option<Self> {
        let components = [
            record.release_pos_x?,
            record.release_pos_y?,
            record.release_pos_z?,
            record.vx0?,
            record.vy0?,
            record.vz0?,
            record.ax?,
            record.ay?,
            record.az?,
        ];

        if components.iter().all(|c| c.is_finite()) {
            Some(Self::from_components(components))
        } else {
            None
        }
    }

    /// Position after `t` seconds: `release + v*t + a*t²/2`.
    pub fn position_at(&self, t: f64) -> Point3<f64> {
        Point3::from(self.release + self.velocity * t + self.acceleration * (0.5 * t * t))
    }

    /// Release point as a position.
    pub fn release_point(&self) -> Point3<f64> {
        Point3::from(self.release)
    }

    fn components(&self) -> [f64; 9] {
        [
            self.release.x,
            self.release.y,
            self.release.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
            self.acceleration.x,
            self.acceleration.y,
            self.acceleration.z,
        ]
    }

    fn from_components(c: [f64; 9]) -> Self {
        Self {
            release: Vector3::new(c[0], c[1], c[2]),
            velocity: Vector3::new(c[3], c[4], c[5]),
            acceleration: Vector3::new(c[6], c[7], c[8]),
        }
    }
}

/// Mirrors a pitch onto the right-handed-pitcher convention.
///
/// Right-handers get their release side flipped, left-handers their
/// horizontal break. Everything else passes through.
pub fn normalize(kinematics: Kinematics, hand: Handedness) -> Kinematics {
    let mut out = kinematics;
    match hand {
        Handedness::Right => out.release.x = -out.release.x,
        Handedness::Left => out.acceleration.x = -out.acceleration.x,
    }
    out
}

/// A record that passed filtering, already mirrored.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPitchRecord {
    pub pitch_type: String,
    pub kinematics: Kinematics,
}

/// Why a record was kept out of the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    MissingPitchType,
    BadHandedness(Option<String>),
    MissingKinematics,
}

impl NormalizedPitchRecord {
    /// Validates and normalizes one raw record.
    pub fn from_record(record: &PitchRecord) -> std::result::Result<Self, Rejection> {
        let pitch_type = record
            .pitch_type
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or(Rejection::MissingPitchType)?;

        let hand = record
            .p_throws
            .as_deref()
            .and_then(|code| code.parse::<Handedness>().ok())
            .ok_or_else(|| Rejection::BadHandedness(record.p_throws.clone()))?;

        let kinematics = Kinematics::from_record(record).ok_or(Rejection::MissingKinematics)?;

        Ok(Self {
            pitch_type: pitch_type.to_string(),
            kinematics: normalize(kinematics, hand),
        })
    }
}

/// Mean kinematics of one pitch type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchTypeAggregate {
    /// Pitch type code
    pub pitch_type: String,

    /// Number of records averaged
    pub count: usize,

    /// Component-wise arithmetic mean
    pub mean: Kinematics,
}

/// Bookkeeping of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub received: usize,
    pub kept: usize,
    pub missing_pitch_type: usize,
    pub bad_handedness: usize,
    pub missing_kinematics: usize,
    /// Pitch types whose mean overflowed to a non-finite value
    pub non_finite_groups: usize,
}

impl AggregationReport {
    pub fn dropped(&self) -> usize {
        self.missing_pitch_type + self.bad_handedness + self.missing_kinematics
    }
}

/// Result of aggregating one player's records.
///
/// Iteration order is lexicographic by pitch type code. Colors and legend
/// entries are assigned in this order.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchGroups {
    groups: BTreeMap<String, PitchTypeAggregate>,
    pub report: AggregationReport,
}

impl PitchGroups {
    /// Number of pitch types.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks up one pitch type.
    pub fn get(&self, pitch_type: &str) -> Option<&PitchTypeAggregate> {
        self.groups.get(pitch_type)
    }

    /// Aggregates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &PitchTypeAggregate> {
        self.groups.values()
    }

    /// Pitch type codes in canonical order.
    pub fn order(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }
}

/// Groups a player's records by pitch type and averages each group.
///
/// # Errors
/// `CoreError::EmptyDataset` naming `player` if `records` is empty or no
/// record survives filtering.
pub fn aggregate(records: &[PitchRecord], player: &str) -> Result<PitchGroups> {
    if records.is_empty() {
        return Err(CoreError::empty(player));
    }

    let mut report = AggregationReport {
        received: records.len(),
        ..Default::default()
    };
    let mut buckets: BTreeMap<String, Vec<Kinematics>> = BTreeMap::new();

    for record in records {
        match NormalizedPitchRecord::from_record(record) {
            Ok(normalized) => {
                report.kept += 1;
                buckets
                    .entry(normalized.pitch_type)
                    .or_default()
                    .push(normalized.kinematics);
            }
            Err(Rejection::MissingPitchType) => report.missing_pitch_type += 1,
            Err(Rejection::BadHandedness(code)) => {
                warn!("Dropping record with handedness {:?}", code);
                report.bad_handedness += 1;
            }
            Err(Rejection::MissingKinematics) => report.missing_kinematics += 1,
        }
    }

    debug!(
        "Aggregation for {}: {} received, {} kept, {} dropped",
        player,
        report.received,
        report.kept,
        report.dropped()
    );

    if buckets.is_empty() {
        return Err(CoreError::empty(player));
    }

    let mut groups = BTreeMap::new();
    for (pitch_type, members) in buckets {
        debug!("  {}: {} pitches", pitch_type, members.len());
        let mean = canonical_mean(&members);
        if !mean.components().iter().all(|c| c.is_finite()) {
            warn!("Pitch type {} has a non-finite mean, leaving it out", pitch_type);
            report.non_finite_groups += 1;
            continue;
        }

        let aggregate = PitchTypeAggregate {
            count: members.len(),
            mean,
            pitch_type: pitch_type.clone(),
        };
        groups.insert(pitch_type, aggregate);
    }

    if groups.is_empty() {
        return Err(CoreError::empty(player));
    }

    Ok(PitchGroups { groups, report })
}

/// Component-wise mean whose result does not depend on member order.
///
/// Each component is summed in sorted order, so any permutation of the
/// members yields bit-identical output.
fn canonical_mean(members: &[Kinematics]) -> Kinematics {
    let n = members.len() as f64;
    let mut mean = [0.0; 9];

    for (axis, slot) in mean.iter_mut().enumerate() {
        let mut values: Vec<f64> = members.iter().map(|k| k.components()[axis]).collect();
        values.sort_by(f64::total_cmp);
        *slot = values.iter().sum::<f64>() / n;
    }

    Kinematics::from_components(mean)
}
