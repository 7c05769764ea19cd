//! Records in, scene out.
//!
//! Wires the aggregator, sampler, color assigner and composer together for
//! one player. Pure apart from logging.

use crate::config::PitchViewConfig;
use crate::error::Result;
use crate::kinematics::aggregate;
use crate::palette::{assign_colors, Rgb};
use crate::player::PlayerName;
use crate::scene::{compose, Scene};
use crate::trajectory::{sample_aggregate, Trajectory};
use pitchview_env::PitchRecord;
use tracing::debug;

/// Builds the scene for `player` from their raw records.
///
/// # Errors
/// `CoreError::EmptyDataset` if no record is usable.
pub fn build_scene(
    records: &[PitchRecord],
    player: &PlayerName,
    config: &PitchViewConfig,
) -> Result<Scene> {
    let display = player.to_string();
    let groups = aggregate(records, &display)?;

    let trajectories: Vec<Trajectory> = groups
        .iter()
        .map(|g| sample_aggregate(g, &config.flight, config.zone.front))
        .collect();

    for (g, t) in groups.iter().zip(&trajectories) {
        debug!("  {} -> {} visible samples", g.pitch_type, t.len());
    }

    let colors: Vec<Rgb> = assign_colors(groups.order())
        .into_iter()
        .map(|(code, color)| {
            debug!("  {} -> {}", code, color.css());
            color
        })
        .collect();

    compose(
        &display,
        &player.title(config.view.season),
        &groups,
        &trajectories,
        &colors,
        config,
    )
}
