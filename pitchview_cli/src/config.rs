//! Config loading for the CLI.
//!
//! Defaults come from `PitchViewConfig::default()`, a JSON file may override
//! any subset of them, and command-line flags override the file.

use anyhow::{Context, Result};
use pitchview_core::PitchViewConfig;
use std::path::Path;
use tracing::{debug, info};

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub season: Option<i32>,
}

impl Overrides {
    pub fn apply(&self, config: &mut PitchViewConfig) {
        if let Some(season) = self.season {
            debug!("Season override: {}", season);
            config.view.season = season;
        }
    }
}

/// Builds the effective config.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<PitchViewConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = PitchViewConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => PitchViewConfig::default(),
    };

    overrides.apply(&mut config);
    Ok(config)
}
