//! Error types for the PitchView engine.

use pitchview_env::EnvError;
use thiserror::Error;

/// Everything that can stop a scene from being produced.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No usable records for the player, either from the store or after
    /// filtering
    #[error("No data found for player {player}.")]
    EmptyDataset { player: String },

    /// The input could not be turned into a store key
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// The store or its transport failed
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),
}

impl CoreError {
    /// Creates an empty-dataset error for `player`.
    pub fn empty(player: impl Into<String>) -> Self {
        Self::EmptyDataset {
            player: player.into(),
        }
    }
}

impl From<EnvError> for CoreError {
    fn from(e: EnvError) -> Self {
        CoreError::UpstreamFailure(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
