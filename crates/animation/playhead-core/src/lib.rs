//! Playhead Core (renderer-agnostic)
//!
//! Turns elapsed frame time into a playback position on a shared timeline and
//! writes that position's values into a host target. The center of the crate
//! is [`AnimationInstance`]: forward/backward playback, single-pass, loop and
//! ping-pong disciplines, and spilled-time bookkeeping across frames.
//! Timelines are immutable and shared behind `Arc`; hosts drive instances
//! (or [`SceneNode`]s) once per rendered frame from a single thread.

pub mod config;
pub mod data;
pub mod error;
pub mod instance;
pub mod interp;
pub mod loop_mode;
pub mod outputs;
pub mod sampling;
pub mod scene;
pub mod stored_timeline;
pub mod target;
pub mod timeline;
pub mod value;

// Re-exports for consumers (hosts)
pub use config::InstanceCfg;
pub use data::{Interpolation, Keyframe, TimelineData, Track};
pub use error::{PlaybackError, Result};
pub use instance::AnimationInstance;
pub use loop_mode::{Direction, LoopMode};
pub use outputs::PlaybackEvent;
pub use sampling::sample_track;
pub use scene::{SceneNode, StillScene};
pub use stored_timeline::parse_timeline_json;
pub use target::{AnimationTarget, PropertyStore};
pub use timeline::{Timeline, TimelineLibrary};
pub use value::{Value, ValueKind};
