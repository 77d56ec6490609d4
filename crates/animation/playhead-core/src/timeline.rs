//! Timeline contract consumed by animation instances, plus shared storage.

use std::fmt;
use std::sync::Arc;

use crate::config::InstanceCfg;
use crate::data::TimelineData;
use crate::error::{PlaybackError, Result};
use crate::instance::AnimationInstance;
use crate::loop_mode::LoopMode;
use crate::sampling::sample_track;
use crate::target::AnimationTarget;

/// Read-only timeline metadata and the apply path into a target.
///
/// Implementations are shared between instances behind an `Arc` and must be
/// safe to read from several threads.
pub trait Timeline: fmt::Debug + Send + Sync {
    fn name(&self) -> &str {
        ""
    }
    fn duration_seconds(&self) -> f32;
    fn frame_rate(&self) -> u32;
    /// Authored length in frames.
    fn duration_frames(&self) -> u32 {
        (self.duration_seconds() * self.frame_rate() as f32).round() as u32
    }
    fn default_loop(&self) -> LoopMode;
    fn start_time_seconds(&self) -> f32 {
        0.0
    }
    /// Write the values this timeline produces at `time` into `target`.
    /// `mix` is already clamped to (0, 1] by the caller.
    fn apply_values_at(&self, target: &mut dyn AnimationTarget, time: f32, mix: f32);
    /// Whether the output at `time` lets content underneath show through.
    fn is_translucent_at(&self, _time: f32) -> bool {
        false
    }
}

impl Timeline for TimelineData {
    fn name(&self) -> &str {
        &self.name
    }

    fn duration_seconds(&self) -> f32 {
        TimelineData::duration_seconds(self)
    }

    fn frame_rate(&self) -> u32 {
        self.fps
    }

    fn duration_frames(&self) -> u32 {
        self.duration
    }

    fn default_loop(&self) -> LoopMode {
        self.loop_mode
    }

    fn start_time_seconds(&self) -> f32 {
        self.start_seconds()
    }

    fn apply_values_at(&self, target: &mut dyn AnimationTarget, time: f32, mix: f32) {
        for track in &self.tracks {
            if let Some(value) = sample_track(track, time, self.fps) {
                target.mix_value(&track.target, &value, mix);
            }
        }
    }

    fn is_translucent_at(&self, time: f32) -> bool {
        self.tracks.iter().any(|track| {
            sample_track(track, time, self.fps).is_some_and(|value| value.is_translucent())
        })
    }
}

/// Named timeline storage. Timelines are validated on insert and handed out
/// as shared `Arc`s; instances never own or copy them.
#[derive(Default, Debug)]
pub struct TimelineLibrary {
    items: Vec<(String, Arc<TimelineData>)>,
}

impl TimelineLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a timeline under its name, replacing any previous entry.
    pub fn insert(&mut self, data: TimelineData) -> Result<Arc<TimelineData>> {
        if let Err(err) = data.validate_basic() {
            log::warn!("rejecting timeline '{}': {err}", data.name);
            return Err(err);
        }
        let shared = Arc::new(data);
        match self.items.iter_mut().find(|(n, _)| *n == shared.name) {
            Some((_, slot)) => *slot = Arc::clone(&shared),
            None => self.items.push((shared.name.clone(), Arc::clone(&shared))),
        }
        Ok(shared)
    }

    pub fn get(&self, name: &str) -> Option<Arc<TimelineData>> {
        self.items
            .iter()
            .find_map(|(n, d)| if n == name { Some(Arc::clone(d)) } else { None })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bind a new instance to the named timeline.
    pub fn instance(&self, name: &str, cfg: InstanceCfg) -> Result<AnimationInstance> {
        let timeline = self
            .get(name)
            .ok_or_else(|| PlaybackError::UnboundTimeline {
                name: name.to_string(),
            })?;
        AnimationInstance::with_config(timeline, cfg)
    }
}
