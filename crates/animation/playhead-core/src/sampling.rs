//! Track sampling at a playhead position in seconds.
//!
//! Model:
//! - Each Track has keyframes ordered by frame; seconds = frame / fps.
//! - Before the first key the first value holds; after the last key the last value holds.
//! - Inside a segment [Ki -> K(i+1)] the left key's interpolation eases local time,
//!   then values blend linearly. Bool tracks always hold the left value.

use crate::data::{Keyframe, Track};
use crate::interp::{ease, functions::linear_value};
use crate::value::{Value, ValueKind};

/// Find the segment [i, i+1] that contains `seconds`, and return (i, i+1, local_t),
/// where local_t is normalized to [0, 1] between the two keys.
/// Edge cases:
/// - If seconds <= first key, returns (0, 0, 0).
/// - If seconds >= last key, returns (last, last, 0).
fn find_segment(keys: &[Keyframe], seconds: f32, fps: u32) -> (usize, usize, f32) {
    let n = keys.len();
    if n <= 1 || seconds <= keys[0].seconds(fps) {
        return (0, 0, 0.0);
    }
    if seconds >= keys[n - 1].seconds(fps) {
        return (n - 1, n - 1, 0.0);
    }
    // Last key at or before `seconds`; keys are sorted so this is the segment start.
    let i = keys
        .partition_point(|k| k.seconds(fps) <= seconds)
        .saturating_sub(1);
    let t0 = keys[i].seconds(fps);
    let t1 = keys[i + 1].seconds(fps);
    let denom = (t1 - t0).max(f32::EPSILON);
    (i, i + 1, ((seconds - t0) / denom).clamp(0.0, 1.0))
}

/// Sample a single track at `seconds`. Returns `None` for tracks without keys.
pub fn sample_track(track: &Track, seconds: f32, fps: u32) -> Option<Value> {
    let keys = &track.keys;
    match keys.len() {
        0 => None,
        1 => Some(keys[0].value.clone()),
        _ => {
            let (i0, i1, lt) = find_segment(keys, seconds, fps);
            let left = &keys[i0];
            if i0 == i1 || left.value.kind() == ValueKind::Bool {
                return Some(left.value.clone());
            }
            match ease(left.interpolation, lt) {
                Some(eased) => Some(linear_value(&left.value, &keys[i1].value, eased)),
                None => Some(left.value.clone()),
            }
        }
    }
}
