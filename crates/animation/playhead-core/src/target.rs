//! Targets that receive animated values.
//!
//! A host scene graph implements [`AnimationTarget`]; the crate ships
//! [`PropertyStore`], a flat path-keyed store that hosts can use directly or
//! mirror into their own scene each frame.

use std::collections::HashMap;

use crate::interp::functions::{lerp_f32, lerp_vec4};
use crate::value::Value;

/// Receiver of sampled property values.
pub trait AnimationTarget {
    /// Blend `value` into the property at `path` with strength `mix` in [0,1].
    fn mix_value(&mut self, path: &str, value: &Value, mix: f32);
}

/// Blend an incoming value over the current one.
///
/// - mix >= 1 overwrites.
/// - Float/Color blend component-wise: `current + (value - current) * mix`.
/// - Bools are step-only and win when `mix >= 0.5`.
/// - A missing or mismatched current value is replaced when `mix > 0`.
pub fn blend_value(current: Option<&Value>, incoming: &Value, mix: f32) -> Option<Value> {
    if mix.is_nan() || mix <= 0.0 {
        return None;
    }
    if mix >= 1.0 {
        return Some(incoming.clone());
    }
    match (current, incoming) {
        (Some(Value::Float(a)), Value::Float(b)) => Some(Value::Float(lerp_f32(*a, *b, mix))),
        (Some(Value::Color(a)), Value::Color(b)) => Some(Value::Color(lerp_vec4(*a, *b, mix))),
        (Some(Value::Bool(_)), Value::Bool(_)) if mix < 0.5 => None,
        _ => Some(incoming.clone()),
    }
}

/// Path-keyed property storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyStore {
    values: HashMap<String, Value>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.values.get(path)
    }

    pub fn float(&self, path: &str) -> Option<f32> {
        self.get(path).and_then(Value::as_float)
    }

    pub fn set(&mut self, path: impl Into<String>, value: Value) {
        self.values.insert(path.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl AnimationTarget for PropertyStore {
    fn mix_value(&mut self, path: &str, value: &Value, mix: f32) {
        if let Some(blended) = blend_value(self.values.get(path), value, mix) {
            self.values.insert(path.to_string(), blended);
        }
    }
}
