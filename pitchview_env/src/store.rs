//! Record store abstraction for PitchView.

use async_trait::async_trait;
use crate::error::EnvError;
use crate::types::PitchRecord;

/// Abstraction over wherever per-pitch records live.
///
/// # Implementations
///
/// - **Production**: `JsonFileStore` - a JSON export of the pitching table
/// - **Tests/Demos**: `MemoryStore` - records held in memory
///
/// # Query Flow
///
/// ```text
/// Viewer                     Store
///   |                          |
///   |-- fetch("Last, First") ->|
///   |                          |-- filter by player_name
///   |<-- Vec<PitchRecord> -----|
/// ```
#[async_trait]
pub trait PitchStore: Send + Sync + 'static {
    /// Fetches every record stored for a player.
    ///
    /// # Arguments
    /// * `player_key` - Store key in "Last, First" form
    ///
    /// # Returns
    /// * `Ok(records)` - Possibly empty, in no particular order
    /// * `Err(EnvError)` - The store could not answer
    ///
    /// # Note
    /// An empty result is a valid answer, not an error. Deciding what "no
    /// data" means is left to the caller.
    async fn fetch_pitches(&self, player_key: &str) -> Result<Vec<PitchRecord>, EnvError>;

    /// Returns a short human-readable name of the backend (for logging).
    fn describe(&self) -> String;
}
