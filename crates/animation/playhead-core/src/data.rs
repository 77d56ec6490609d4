//! Keyed timeline data model.
//!
//! Times are authored in frames and converted to seconds through `fps`, the
//! way exported vector-animation files store them.

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};
use crate::loop_mode::LoopMode;
use crate::value::Value;

/// How a keyframe eases toward the next one.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    /// Keep this keyframe's value until the next keyframe.
    Hold,
    #[default]
    Linear,
    /// Cubic-bezier timing curve with control points in the normalized 0..1 domain.
    Cubic { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// A single keyframe positioned on the frame grid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub frame: u32,
    pub value: Value,
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl Keyframe {
    #[inline]
    pub fn seconds(&self, fps: u32) -> f32 {
        if fps == 0 {
            return 0.0;
        }
        self.frame as f32 / fps as f32
    }
}

/// Keyframes driving one property path on the target.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: String,
    /// Property path on the target (e.g. "ball/opacity").
    pub target: String,
    pub keys: Vec<Keyframe>,
}

/// A complete linear timeline. Shared read-only between instances.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
    pub name: String,
    pub fps: u32,
    /// Length in frames.
    pub duration: u32,
    #[serde(default, rename = "loop")]
    pub loop_mode: LoopMode,
    /// Frame an instance starts from after construction or reset.
    #[serde(default)]
    pub start_frame: u32,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl TimelineData {
    pub fn new(name: impl Into<String>, fps: u32, duration: u32, loop_mode: LoopMode) -> Self {
        Self {
            name: name.into(),
            fps,
            duration,
            loop_mode,
            start_frame: 0,
            tracks: Vec::new(),
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    #[inline]
    pub fn duration_seconds(&self) -> f32 {
        if self.fps == 0 {
            return 0.0;
        }
        self.duration as f32 / self.fps as f32
    }

    #[inline]
    pub fn start_seconds(&self) -> f32 {
        if self.fps == 0 {
            return 0.0;
        }
        self.start_frame as f32 / self.fps as f32
    }

    /// Validate basic invariants (positive fps, start inside the timeline,
    /// non-decreasing key frames, one value kind per track).
    pub fn validate_basic(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(PlaybackError::invalid(format!(
                "timeline '{}' must have fps > 0",
                self.name
            )));
        }
        if self.start_frame > self.duration {
            return Err(PlaybackError::invalid(format!(
                "timeline '{}' start frame {} exceeds duration {}",
                self.name, self.start_frame, self.duration
            )));
        }
        for track in &self.tracks {
            let mut last = 0u32;
            let kind = track.keys.first().map(|k| k.value.kind());
            for key in &track.keys {
                if key.frame < last {
                    return Err(PlaybackError::invalid(format!(
                        "keyframes must be sorted by frame for '{}'",
                        track.target
                    )));
                }
                if Some(key.value.kind()) != kind {
                    return Err(PlaybackError::invalid(format!(
                        "keyframes mix value kinds for '{}'",
                        track.target
                    )));
                }
                if let Value::Float(v) = key.value {
                    if !v.is_finite() {
                        return Err(PlaybackError::invalid(format!(
                            "non-finite keyframe value for '{}'",
                            track.target
                        )));
                    }
                }
                last = key.frame;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(frame: u32, value: Value) -> Keyframe {
        Keyframe {
            frame,
            value,
            interpolation: Interpolation::Linear,
        }
    }

    #[test]
    fn seconds_follow_fps() {
        let mut data = TimelineData::new("walk", 24, 48, LoopMode::Loop);
        data.start_frame = 12;
        assert_eq!(data.duration_seconds(), 2.0);
        assert_eq!(data.start_seconds(), 0.5);
        assert_eq!(key(6, Value::Float(0.0)).seconds(24), 0.25);
    }

    #[test]
    fn validate_rejects_unsorted_and_mixed_tracks() {
        let unsorted = TimelineData::new("a", 60, 60, LoopMode::Loop).with_track(Track {
            id: "t".into(),
            target: "x".into(),
            keys: vec![key(30, Value::Float(1.0)), key(10, Value::Float(0.0))],
        });
        assert!(unsorted.validate_basic().is_err());

        let mixed = TimelineData::new("b", 60, 60, LoopMode::Loop).with_track(Track {
            id: "t".into(),
            target: "x".into(),
            keys: vec![key(0, Value::Float(1.0)), key(10, Value::Bool(true))],
        });
        assert!(mixed.validate_basic().is_err());
    }

    #[test]
    fn validate_rejects_zero_fps_and_late_start() {
        assert!(TimelineData::new("z", 0, 10, LoopMode::Loop)
            .validate_basic()
            .is_err());
        let mut late = TimelineData::new("late", 30, 10, LoopMode::Loop);
        late.start_frame = 11;
        assert!(late.validate_basic().is_err());
        late.start_frame = 10;
        assert!(late.validate_basic().is_ok());
    }
}
