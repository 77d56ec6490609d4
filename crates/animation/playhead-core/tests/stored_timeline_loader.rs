use std::sync::Arc;

use playhead_core::{
    parse_timeline_json, AnimationInstance, Interpolation, LoopMode, PlaybackError, PropertyStore,
    Value,
};
use serde_json::json;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn parses_named_loop_and_mixed_value_shapes() {
    let doc = json!({
        "name": "pulse",
        "fps": 30,
        "duration": 60,
        "loop": "pingPong",
        "tracks": [
            {
                "id": "t0",
                "target": "dot/scale",
                "keys": [
                    { "frame": 0, "value": 1.0 },
                    { "frame": 30, "value": 2.0, "interpolation": "hold" },
                    { "frame": 60, "value": 1.0 }
                ]
            },
            {
                "id": "t1",
                "target": "dot/fill",
                "keys": [
                    { "frame": 0, "value": "#ff000080" },
                    { "frame": 60, "value": { "r": 0.0, "g": 1.0, "b": 0.0 },
                      "interpolation": { "cubic": [0.42, 0.0, 0.58, 1.0] } }
                ]
            },
            {
                "id": "t2",
                "target": "dot/visible",
                "keys": [ { "frame": 0, "value": true } ]
            }
        ]
    });

    let data = parse_timeline_json(&doc.to_string()).expect("parse");
    assert_eq!(data.name, "pulse");
    assert_eq!(data.loop_mode, LoopMode::PingPong);
    assert_eq!(data.duration_seconds(), 2.0);
    assert_eq!(data.tracks.len(), 3);
    assert_eq!(data.tracks[0].keys[1].interpolation, Interpolation::Hold);
    assert_eq!(data.tracks[0].keys[0].interpolation, Interpolation::Linear);

    let fill = data.tracks[1].keys[0].value.as_color().unwrap();
    approx(fill[3], 128.0 / 255.0, 1e-6);
    assert_eq!(
        data.tracks[1].keys[1].value,
        Value::Color([0.0, 1.0, 0.0, 1.0])
    );
    assert!(matches!(
        data.tracks[1].keys[1].interpolation,
        Interpolation::Cubic { .. }
    ));
    assert_eq!(data.tracks[2].keys[0].value, Value::Bool(true));
}

#[test]
fn accepts_integer_loop_codes() {
    for (code, mode) in [
        (0, LoopMode::SinglePass),
        (1, LoopMode::Loop),
        (2, LoopMode::PingPong),
    ] {
        let doc = json!({ "name": "c", "fps": 60, "duration": 60, "loop": code });
        let data = parse_timeline_json(&doc.to_string()).expect("parse");
        assert_eq!(data.loop_mode, mode);
    }
}

#[test]
fn missing_loop_defaults_to_single_pass() {
    let doc = json!({ "name": "c", "fps": 60, "duration": 60 });
    let data = parse_timeline_json(&doc.to_string()).expect("parse");
    assert_eq!(data.loop_mode, LoopMode::SinglePass);
    assert!(data.tracks.is_empty());
}

#[test]
fn rejects_unknown_loop_code_and_bad_colors() {
    let doc = json!({ "name": "c", "fps": 60, "duration": 60, "loop": 9 });
    let err = parse_timeline_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, PlaybackError::InvalidTimeline { .. }));

    let doc = json!({
        "name": "c", "fps": 60, "duration": 60,
        "tracks": [ { "id": "t", "target": "x", "keys": [ { "frame": 0, "value": "red" } ] } ]
    });
    let err = parse_timeline_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, PlaybackError::InvalidTimeline { .. }));
}

#[test]
fn rejects_malformed_json_and_invalid_data() {
    let err = parse_timeline_json("{ not json").unwrap_err();
    assert!(matches!(err, PlaybackError::Parse(_)));

    let doc = json!({ "name": "z", "fps": 0, "duration": 10 });
    let err = parse_timeline_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, PlaybackError::InvalidTimeline { .. }));
}

#[test]
fn loaded_timeline_drives_an_instance() {
    let doc = json!({
        "name": "slide",
        "fps": 24,
        "duration": 48,
        "loop": "loop",
        "tracks": [
            { "id": "t", "target": "panel/y",
              "keys": [ { "frame": 0, "value": 0.0 }, { "frame": 48, "value": 96.0 } ] }
        ]
    });
    let data = parse_timeline_json(&doc.to_string()).expect("parse");
    let mut inst = AnimationInstance::new(Arc::new(data)).unwrap();
    let mut store = PropertyStore::new();

    assert!(inst.advance_and_apply(2.5, &mut store));
    assert!(inst.did_loop());
    approx(inst.time(), 0.5, 1e-5);
    approx(store.float("panel/y").unwrap(), 24.0, 1e-3);
}
