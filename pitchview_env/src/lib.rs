//! PitchView Store Abstraction Layer
//!
//! This crate isolates the one piece of I/O in the PitchView pipeline: fetching
//! the per-pitch records of a single player from a record store.
//!
//! # Core Concept
//!
//! The trajectory engine in `pitchview_core` only ever sees a `PitchStore`.
//! Production wires in a [`JsonFileStore`]; tests and demos wire in a
//! [`MemoryStore`]. Either way the engine gets an unordered `Vec<PitchRecord>`
//! for the requested player key, or an [`EnvError`].
//!
//! # Example
//!
//! ```ignore
//! use pitchview_env::{MemoryStore, PitchStore};
//!
//! async fn count(store: &impl PitchStore) -> usize {
//!     store.fetch_pitches("Skenes, Paul").await.map(|r| r.len()).unwrap_or(0)
//! }
//! ```

mod error;
mod file_store;
pub mod global;
mod memory;
mod store;
mod types;

pub use error::EnvError;
pub use file_store::JsonFileStore;
pub use memory::MemoryStore;
pub use store::PitchStore;
pub use types::{PitchRecord, RequestId};
