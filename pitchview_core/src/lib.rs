//! PitchView Core - Pitch Trajectory & Scene Composition Engine
//!
//! Turns a pitcher's per-pitch kinematic records into a 3D scene:
//! 1. **Aggregation**: handedness-normalized mean kinematics per pitch type
//! 2. **Sampling**: closed-form projectile paths clipped at the strike zone
//! 3. **Composition**: ground, strike zone, colored curves, camera and legend
//!
//! The store lives behind `pitchview_env::PitchStore`; rendering is left to
//! whoever consumes the [`Scene`].

pub mod config;
pub mod error;
pub mod kinematics;
pub mod palette;
pub mod pipeline;
pub mod player;
pub mod scene;
pub mod trajectory;
pub mod viewer;

// Re-export key types for convenience
pub use config::PitchViewConfig;
pub use error::CoreError;
pub use kinematics::{aggregate, Handedness, PitchGroups, PitchTypeAggregate};
pub use palette::Rgb;
pub use pipeline::build_scene;
pub use player::PlayerName;
pub use scene::Scene;
pub use trajectory::Trajectory;
pub use viewer::{PitchViewer, Presentation};
