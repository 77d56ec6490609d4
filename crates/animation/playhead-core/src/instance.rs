//! AnimationInstance: per-frame clock and loop resolution over a shared timeline.
//!
//! Methods:
//! - advance (move the playhead, resolve the loop discipline), apply_to (write into a target)
//! - set_time / set_direction / set_loop_override / reset (explicit state changes)
//! - keep_going (non-mutating "more to play" predicate)
//!
//! Nothing here returns an error once the instance exists: malformed per-frame
//! input is normalized and logged at debug level.

use std::sync::Arc;

use log::{debug, trace};

use crate::config::InstanceCfg;
use crate::error::{PlaybackError, Result};
use crate::loop_mode::{Direction, LoopMode};
use crate::outputs::PlaybackEvent;
use crate::target::AnimationTarget;
use crate::timeline::Timeline;

/// Playback state for one timeline. Cloning copies the clock and re-shares the timeline.
#[derive(Clone, Debug)]
pub struct AnimationInstance {
    timeline: Arc<dyn Timeline>,
    time: f32,
    direction: Direction,
    total_time: f32,
    last_total_time: f32,
    spilled_time: f32,
    did_loop: bool,
    loop_override: Option<LoopMode>,
    speed_multiplier: f32,
    last_event: Option<PlaybackEvent>,
}

/// Negative, NaN and infinite deltas collapse to zero.
fn sanitize_delta(seconds: f32) -> f32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        if seconds != 0.0 {
            debug!("ignoring invalid advance delta {seconds}");
        }
        0.0
    }
}

/// Out-of-range mix strengths clamp to [0,1]; NaN counts as 0.
#[inline]
pub fn clamp_mix(mix: f32) -> f32 {
    if mix.is_nan() {
        0.0
    } else {
        mix.clamp(0.0, 1.0)
    }
}

/// Remainder of a positive overshoot within one ping-pong period. Whole
/// periods map to `span` so the reflection lands on the boundary it reached.
#[inline]
fn fold_overshoot(spill: f32, span: f32) -> f32 {
    let m = spill % span;
    if m == 0.0 {
        span
    } else {
        m
    }
}

impl AnimationInstance {
    /// Bind an instance to a timeline with default settings.
    pub fn new(timeline: Arc<dyn Timeline>) -> Result<Self> {
        Self::with_config(timeline, InstanceCfg::default())
    }

    /// Bind an instance to a timeline. Fails fast when the timeline metadata
    /// cannot drive a clock (non-finite or negative duration, zero frame rate).
    pub fn with_config(timeline: Arc<dyn Timeline>, cfg: InstanceCfg) -> Result<Self> {
        let duration = timeline.duration_seconds();
        if !duration.is_finite() || duration < 0.0 {
            return Err(PlaybackError::invalid(format!(
                "timeline '{}' has unusable duration {duration}",
                timeline.name()
            )));
        }
        if timeline.frame_rate() == 0 {
            return Err(PlaybackError::invalid(format!(
                "timeline '{}' has a zero frame rate",
                timeline.name()
            )));
        }
        let start = timeline.start_time_seconds();
        if !start.is_finite() {
            return Err(PlaybackError::invalid(format!(
                "timeline '{}' has non-finite start time",
                timeline.name()
            )));
        }

        let mut instance = Self {
            timeline,
            time: start,
            direction: cfg.direction,
            total_time: 0.0,
            last_total_time: 0.0,
            spilled_time: 0.0,
            did_loop: false,
            loop_override: cfg.loop_override,
            speed_multiplier: 1.0,
            last_event: None,
        };
        instance.set_speed_multiplier(cfg.speed_multiplier);
        if let Some(t) = cfg.start_time {
            instance.set_time(t);
        }
        Ok(instance)
    }

    /// Advance the playhead by `seconds` (pre-multiplied by the caller's speed).
    /// Returns false only when a single-pass timeline is used up in the current direction.
    pub fn advance(&mut self, seconds: f32) -> bool {
        let delta = sanitize_delta(seconds);
        self.did_loop = false;
        self.spilled_time = 0.0;
        self.last_event = None;
        self.last_total_time = self.total_time;
        if delta == 0.0 {
            return self.keep_going();
        }

        self.total_time += delta;
        let previous = self.time;
        self.time += self.direction.sign() * delta;
        if !self.time.is_finite() {
            debug!("advance by {delta} overflowed the playhead; holding at {previous}");
            self.time = previous;
            return self.keep_going();
        }

        let duration = self.duration_seconds();
        match self.loop_mode() {
            LoopMode::SinglePass => self.resolve_single_pass(previous, duration),
            LoopMode::Loop => self.resolve_loop(duration),
            LoopMode::PingPong => self.resolve_ping_pong(duration),
        }
        self.keep_going()
    }

    fn resolve_single_pass(&mut self, previous: f32, duration: f32) {
        let (boundary, spill, started_inside) = if self.time > duration {
            (duration, self.time - duration, previous < duration)
        } else if self.time < 0.0 {
            (0.0, -self.time, previous > 0.0)
        } else {
            return;
        };
        self.time = boundary;
        self.spilled_time = spill;
        if started_inside {
            self.did_loop = true;
            self.last_event = Some(PlaybackEvent::Completed {
                time: boundary,
                spilled: spill,
            });
            trace!("'{}' completed at {boundary}s", self.timeline.name());
        }
    }

    /// Reaching the far boundary in the direction of travel completes a cycle,
    /// even when the step lands on it exactly.
    fn resolve_loop(&mut self, duration: f32) {
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }
        let forward = self.direction == Direction::Forward;
        if self.time > duration || (forward && self.time == duration) {
            let spill = self.time - duration;
            self.time = spill % duration;
            self.mark_looped(spill);
        } else if self.time < 0.0 || (!forward && self.time == 0.0) {
            let spill = 0.0 - self.time;
            self.time = duration - spill % duration;
            self.mark_looped(spill);
        }
    }

    fn mark_looped(&mut self, spill: f32) {
        self.spilled_time = spill;
        self.did_loop = true;
        self.last_event = Some(PlaybackEvent::Looped { spilled: spill });
        trace!("'{}' looped with {spill}s spill", self.timeline.name());
    }

    fn resolve_ping_pong(&mut self, duration: f32) {
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }
        // Two reflections bring the playhead back to the same place and heading.
        let period = 2.0 * duration;
        loop {
            if self.time > duration {
                let spill = fold_overshoot(self.time - duration, period);
                self.time = duration - spill;
                self.mark_bounced(Direction::Backward, spill);
            } else if self.time < 0.0 {
                let spill = fold_overshoot(-self.time, period);
                self.time = spill;
                self.mark_bounced(Direction::Forward, spill);
            } else {
                break;
            }
        }
    }

    fn mark_bounced(&mut self, direction: Direction, spill: f32) {
        self.direction = direction;
        self.spilled_time = spill;
        self.did_loop = true;
        self.last_event = Some(PlaybackEvent::Bounced {
            direction,
            spilled: spill,
        });
        trace!("'{}' bounced, now {direction:?}", self.timeline.name());
    }

    /// Write the timeline's values at the current time into `target`.
    pub fn apply_to(&self, target: &mut dyn AnimationTarget, mix: f32) {
        let mix = clamp_mix(mix);
        if mix == 0.0 {
            return;
        }
        self.timeline.apply_values_at(target, self.time, mix);
    }

    /// Advance, then apply at full strength. Returns the advance result.
    pub fn advance_and_apply(&mut self, seconds: f32, target: &mut dyn AnimationTarget) -> bool {
        let more = self.advance(seconds);
        self.apply_to(target, 1.0);
        more
    }

    /// True while there is more to play; always true outside single-pass.
    pub fn keep_going(&self) -> bool {
        self.loop_mode() != LoopMode::SinglePass
            || (self.direction == Direction::Forward && self.time < self.duration_seconds())
            || (self.direction == Direction::Backward && self.time > 0.0)
    }

    /// Set the absolute playhead position. Clears spilled time; non-finite input is ignored.
    pub fn set_time(&mut self, seconds: f32) {
        if !seconds.is_finite() {
            debug!("ignoring non-finite time {seconds}");
            return;
        }
        self.time = seconds;
        self.spilled_time = 0.0;
    }

    /// Positive is forward, negative is backward; zero (or NaN) leaves the direction unchanged.
    pub fn set_direction(&mut self, sign: f32) {
        match Direction::from_sign(sign) {
            Some(direction) => self.direction = direction,
            None => debug!("ignoring direction {sign}"),
        }
    }

    pub fn set_loop_override(&mut self, mode: Option<LoopMode>) {
        self.loop_override = mode;
    }

    /// Rewind to the timeline start and clear all accumulated clock state.
    pub fn reset(&mut self, speed_multiplier: f32) {
        self.time = self.timeline.start_time_seconds();
        self.direction = Direction::Forward;
        self.total_time = 0.0;
        self.last_total_time = 0.0;
        self.spilled_time = 0.0;
        self.did_loop = false;
        self.last_event = None;
        self.set_speed_multiplier(speed_multiplier);
    }

    fn set_speed_multiplier(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed_multiplier = speed;
        } else {
            debug!("ignoring non-finite speed multiplier {speed}");
            self.speed_multiplier = 1.0;
        }
    }

    #[inline]
    pub fn clear_spilled_time(&mut self) {
        self.spilled_time = 0.0;
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True only for the advance call that crossed a boundary.
    #[inline]
    pub fn did_loop(&self) -> bool {
        self.did_loop
    }

    #[inline]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    #[inline]
    pub fn last_total_time(&self) -> f32 {
        self.last_total_time
    }

    #[inline]
    pub fn spilled_time(&self) -> f32 {
        self.spilled_time
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    #[inline]
    pub fn last_event(&self) -> Option<PlaybackEvent> {
        self.last_event
    }

    /// Effective loop discipline: the override if set, else the timeline default.
    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_override
            .unwrap_or_else(|| self.timeline.default_loop())
    }

    #[inline]
    pub fn loop_override(&self) -> Option<LoopMode> {
        self.loop_override
    }

    pub fn duration_seconds(&self) -> f32 {
        self.timeline.duration_seconds()
    }

    /// Timeline length in frames, as authored.
    pub fn duration_frames(&self) -> u32 {
        self.timeline.duration_frames()
    }

    pub fn fps(&self) -> u32 {
        self.timeline.frame_rate()
    }

    pub fn start_time(&self) -> f32 {
        self.timeline.start_time_seconds()
    }

    pub fn name(&self) -> &str {
        self.timeline.name()
    }

    pub fn timeline(&self) -> &Arc<dyn Timeline> {
        &self.timeline
    }

    pub fn is_translucent(&self) -> bool {
        self.timeline.is_translucent_at(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_delta_drops_invalid_values() {
        assert_eq!(sanitize_delta(0.5), 0.5);
        assert_eq!(sanitize_delta(-1.0), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
    }

    #[test]
    fn clamp_mix_policy() {
        assert_eq!(clamp_mix(1.7), 1.0);
        assert_eq!(clamp_mix(-0.2), 0.0);
        assert_eq!(clamp_mix(f32::NAN), 0.0);
        assert_eq!(clamp_mix(0.4), 0.4);
    }

    #[test]
    fn fold_overshoot_keeps_whole_periods_on_boundary() {
        assert_eq!(fold_overshoot(2.0, 20.0), 2.0);
        assert_eq!(fold_overshoot(20.0, 20.0), 20.0);
        assert_eq!(fold_overshoot(43.0, 20.0), 3.0);
    }
}
