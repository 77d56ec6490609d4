//! Interpolation helpers.
//!
//! Keyframe segments ease their local time through the left key's
//! [`Interpolation`](crate::data::Interpolation), then blend values linearly.

pub mod functions;

use crate::data::Interpolation;

/// Map local segment time `t` in [0,1] through an interpolation curve.
/// `None` means the segment holds its left value.
#[inline]
pub fn ease(interpolation: Interpolation, t: f32) -> Option<f32> {
    match interpolation {
        Interpolation::Hold => None,
        Interpolation::Linear => Some(t.clamp(0.0, 1.0)),
        Interpolation::Cubic { x1, y1, x2, y2 } => {
            Some(functions::bezier_ease_t(t, x1, y1, x2, y2))
        }
    }
}
