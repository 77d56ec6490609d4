use serde::Deserialize;

use crate::data::{Interpolation, Keyframe, TimelineData, Track};
use crate::error::{PlaybackError, Result};
use crate::loop_mode::LoopMode;
use crate::value::Value;

/// Public API: parse exported timeline JSON into the canonical TimelineData (data.rs).
///
/// Notes:
/// - `loop` accepts either the named form ("singlePass" | "loop" | "pingPong")
///   or the integer codes 0/1/2 used by exported runtime files.
/// - Keyframe values are untagged: booleans, numbers, "#RRGGBB[AA]" hex colors,
///   or { r, g, b, a? } objects with components in 0..1.
/// - `interpolation` is "hold", "linear" (default) or { "cubic": [x1, y1, x2, y2] }.
pub fn parse_timeline_json(s: &str) -> Result<TimelineData> {
    let st: StoredTimeline = serde_json::from_str(s)?;

    let loop_mode = match st.loop_mode {
        None => LoopMode::default(),
        Some(RawLoop::Named(mode)) => mode,
        Some(RawLoop::Code(code)) => LoopMode::from_code(code).ok_or_else(|| {
            PlaybackError::invalid(format!("unknown loop code {code} in '{}'", st.name))
        })?,
    };

    let mut tracks: Vec<Track> = Vec::with_capacity(st.tracks.len());
    for track in st.tracks {
        let mut keys: Vec<Keyframe> = Vec::with_capacity(track.keys.len());
        for key in track.keys {
            keys.push(Keyframe {
                frame: key.frame,
                value: to_core_value(&key.value)?,
                interpolation: to_interpolation(key.interpolation),
            });
        }
        tracks.push(Track {
            id: track.id,
            target: track.target,
            keys,
        });
    }

    let data = TimelineData {
        name: st.name,
        fps: st.fps,
        duration: st.duration,
        loop_mode,
        start_frame: st.start_frame,
        tracks,
    };
    // Basic validation (fps > 0, start in range, sorted single-kind tracks)
    if let Err(err) = data.validate_basic() {
        log::warn!("timeline '{}' failed validation: {err}", data.name);
        return Err(err);
    }
    Ok(data)
}

fn to_core_value(v: &RawValue) -> Result<Value> {
    match v {
        RawValue::Boolean(b) => Ok(Value::Bool(*b)),
        RawValue::Number(n) => Ok(Value::Float(*n as f32)),
        RawValue::Hex(s) => parse_hex_color(s)
            .map(Value::Color)
            .ok_or_else(|| PlaybackError::invalid(format!("invalid hex color '{s}'"))),
        RawValue::Rgba { r, g, b, a } => Ok(Value::Color([
            *r as f32,
            *g as f32,
            *b as f32,
            a.unwrap_or(1.0) as f32,
        ])),
    }
}

fn to_interpolation(raw: Option<RawInterpolation>) -> Interpolation {
    match raw {
        None | Some(RawInterpolation::Named(NamedInterpolation::Linear)) => {
            Interpolation::Linear
        }
        Some(RawInterpolation::Named(NamedInterpolation::Hold)) => Interpolation::Hold,
        Some(RawInterpolation::Cubic { cubic }) => Interpolation::Cubic {
            x1: cubic[0] as f32,
            y1: cubic[1] as f32,
            x2: cubic[2] as f32,
            y2: cubic[3] as f32,
        },
    }
}

/// "#RRGGBB" or "#RRGGBBAA" to RGBA (0..1)
fn parse_hex_color(s: &str) -> Option<[f32; 4]> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let channel = |i: usize| -> Option<f32> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTimeline {
    pub name: String,
    pub fps: u32,
    pub duration: u32, // frames
    #[serde(default, rename = "loop")]
    pub loop_mode: Option<RawLoop>,
    #[serde(default)]
    pub start_frame: u32,
    #[serde(default)]
    pub tracks: Vec<StoredTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLoop {
    Code(u32),
    Named(LoopMode),
}

#[derive(Debug, Deserialize)]
struct StoredTrack {
    pub id: String,
    pub target: String,
    #[serde(default)]
    pub keys: Vec<StoredKey>,
}

#[derive(Debug, Deserialize)]
struct StoredKey {
    pub frame: u32,
    pub value: RawValue,
    #[serde(default)]
    pub interpolation: Option<RawInterpolation>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Boolean(bool),
    Number(f64),
    Hex(String),
    Rgba {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default)]
        a: Option<f64>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInterpolation {
    Named(NamedInterpolation),
    Cubic { cubic: [f64; 4] },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum NamedInterpolation {
    Hold,
    Linear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_and_without_alpha() {
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("#00000000"), Some([0.0, 0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#ff00"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }
}
