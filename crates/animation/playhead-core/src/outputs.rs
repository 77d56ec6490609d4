//! Semantic signals recorded by `AnimationInstance::advance`.
//!
//! The event reflects only the most recent advance; it is cleared at the start
//! of every call, like the loop-boundary flag.

use serde::{Deserialize, Serialize};

use crate::loop_mode::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// Loop discipline wrapped to the opposite boundary.
    Looped { spilled: f32 },
    /// Ping-pong reflected off a boundary; `direction` is the new heading.
    Bounced { direction: Direction, spilled: f32 },
    /// Single-pass playback ran past its final boundary and stopped there.
    Completed { time: f32, spilled: f32 },
}
