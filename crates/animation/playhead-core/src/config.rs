//! Instance configuration.

use serde::{Deserialize, Serialize};

use crate::loop_mode::{Direction, LoopMode};

/// Settings applied when an instance is bound to a timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceCfg {
    /// Stored for the caller to pre-multiply into deltas; the clock itself is unit-agnostic.
    pub speed_multiplier: f32,
    /// Overrides the timeline's default loop discipline.
    pub loop_override: Option<LoopMode>,
    pub direction: Direction,
    /// Starting position in seconds; defaults to the timeline's start time.
    pub start_time: Option<f32>,
}

impl Default for InstanceCfg {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            loop_override: None,
            direction: Direction::Forward,
            start_time: None,
        }
    }
}
