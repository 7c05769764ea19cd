//! Common types shared between the store and the engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One observed pitch as it comes out of the store.
///
/// Every field is optional on the wire. Sparse rows deserialize cleanly, and
/// so do fields of the wrong type, which read as `None`. Such rows are
/// rejected later by the aggregator instead of failing the whole fetch.
/// Units: positions in feet, velocities in ft/s, accelerations in ft/s².
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchRecord {
    /// Store key of the pitcher, "Last, First"
    #[serde(deserialize_with = "lenient_string")]
    pub player_name: Option<String>,

    /// Season the pitch was thrown in
    #[serde(deserialize_with = "lenient_i32")]
    pub game_year: Option<i32>,

    /// Pitch type code (e.g. "FF", "SL", "CU")
    #[serde(deserialize_with = "lenient_string")]
    pub pitch_type: Option<String>,

    /// Throwing hand code ("L" or "R")
    #[serde(deserialize_with = "lenient_string")]
    pub p_throws: Option<String>,

    #[serde(deserialize_with = "lenient_f64")]
    pub release_pos_x: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub release_pos_y: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub release_pos_z: Option<f64>,

    #[serde(deserialize_with = "lenient_f64")]
    pub vx0: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub vy0: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub vz0: Option<f64>,

    #[serde(deserialize_with = "lenient_f64")]
    pub ax: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ay: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub az: Option<f64>,
}

impl PitchRecord {
    /// Creates a fully populated record.
    ///
    /// `release`, `velocity` and `acceleration` are `[x, y, z]` triples.
    pub fn new(
        player_name: &str,
        pitch_type: &str,
        p_throws: &str,
        release: [f64; 3],
        velocity: [f64; 3],
        acceleration: [f64; 3],
    ) -> Self {
        Self {
            player_name: Some(player_name.to_string()),
            game_year: None,
            pitch_type: Some(pitch_type.to_string()),
            p_throws: Some(p_throws.to_string()),
            release_pos_x: Some(release[0]),
            release_pos_y: Some(release[1]),
            release_pos_z: Some(release[2]),
            vx0: Some(velocity[0]),
            vy0: Some(velocity[1]),
            vz0: Some(velocity[2]),
            ax: Some(acceleration[0]),
            ay: Some(acceleration[1]),
            az: Some(acceleration[2]),
        }
    }

    /// Returns true if this record belongs to the given store key.
    pub fn belongs_to(&self, player_key: &str) -> bool {
        self.player_name.as_deref() == Some(player_key)
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(Value::deserialize(d)?
        .as_i64()
        .and_then(|v| i32::try_from(v).ok()))
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Identifier for one visualization request.
///
/// Only used to correlate log lines; a request has no identity beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random RequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show first 8 chars for readability
        write!(f, "{}", &self.0.to_string()[..8])
    }
}
