//! Loop disciplines and playback direction.

use serde::{Deserialize, Serialize};

/// Boundary policy applied when the playhead leaves `[0, duration]`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum LoopMode {
    /// Play once and stop at the boundary in the direction of travel.
    #[default]
    SinglePass,
    /// Wrap around to the opposite boundary.
    Loop,
    /// Reflect off the boundary and reverse direction.
    PingPong,
}

impl LoopMode {
    /// Map the integer codes used by exported runtime files (0 = one-shot,
    /// 1 = loop, 2 = ping-pong).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::SinglePass),
            1 => Some(Self::Loop),
            2 => Some(Self::PingPong),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u32 {
        match self {
            Self::SinglePass => 0,
            Self::Loop => 1,
            Self::PingPong => 2,
        }
    }
}

/// Playback direction. Only ever +1 or -1 when used as a factor.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Normalize a signed value: positive is forward, negative is backward.
    /// Zero and NaN carry no direction.
    pub fn from_sign(sign: f32) -> Option<Self> {
        if sign > 0.0 {
            Some(Self::Forward)
        } else if sign < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_codes_round_trip_known_values() {
        for mode in [LoopMode::SinglePass, LoopMode::Loop, LoopMode::PingPong] {
            assert_eq!(LoopMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(LoopMode::from_code(7), None);
    }

    #[test]
    fn direction_from_sign_normalizes_magnitude() {
        assert_eq!(Direction::from_sign(42.0), Some(Direction::Forward));
        assert_eq!(Direction::from_sign(-0.001), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0.0), None);
        assert_eq!(Direction::from_sign(f32::NAN), None);
        assert_eq!(Direction::Backward.sign(), -1.0);
    }

    #[test]
    fn loop_mode_serializes_camel_case() {
        let s = serde_json::to_string(&LoopMode::PingPong).unwrap();
        assert_eq!(s, "\"pingPong\"");
        let m: LoopMode = serde_json::from_str("\"singlePass\"").unwrap();
        assert_eq!(m, LoopMode::SinglePass);
    }
}
