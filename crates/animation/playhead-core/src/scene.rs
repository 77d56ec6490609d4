//! Scene nodes a host can drive uniformly each frame.

use crate::instance::{clamp_mix, AnimationInstance};
use crate::loop_mode::LoopMode;
use crate::target::AnimationTarget;
use crate::value::Value;

/// A fixed pose: property values that never change over time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StillScene {
    pub name: String,
    pub values: Vec<(String, Value)>,
}

impl StillScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, path: impl Into<String>, value: Value) -> Self {
        self.values.push((path.into(), value));
        self
    }
}

/// Closed set of scene kinds sharing advance / apply / duration / translucency.
#[derive(Clone, Debug)]
pub enum SceneNode {
    Animation(AnimationInstance),
    Still(StillScene),
}

impl SceneNode {
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Animation(instance) => instance.name(),
            SceneNode::Still(still) => &still.name,
        }
    }

    /// Returns whether the node still has something to play.
    pub fn advance(&mut self, seconds: f32) -> bool {
        match self {
            SceneNode::Animation(instance) => instance.advance(seconds),
            SceneNode::Still(_) => false,
        }
    }

    pub fn apply_to(&self, target: &mut dyn AnimationTarget, mix: f32) {
        match self {
            SceneNode::Animation(instance) => instance.apply_to(target, mix),
            SceneNode::Still(still) => {
                let mix = clamp_mix(mix);
                if mix == 0.0 {
                    return;
                }
                for (path, value) in &still.values {
                    target.mix_value(path, value, mix);
                }
            }
        }
    }

    pub fn advance_and_apply(&mut self, seconds: f32, target: &mut dyn AnimationTarget) -> bool {
        let more = self.advance(seconds);
        self.apply_to(target, 1.0);
        more
    }

    pub fn duration_seconds(&self) -> f32 {
        match self {
            SceneNode::Animation(instance) => instance.duration_seconds(),
            SceneNode::Still(_) => 0.0,
        }
    }

    pub fn loop_mode(&self) -> LoopMode {
        match self {
            SceneNode::Animation(instance) => instance.loop_mode(),
            SceneNode::Still(_) => LoopMode::SinglePass,
        }
    }

    pub fn is_translucent(&self) -> bool {
        match self {
            SceneNode::Animation(instance) => instance.is_translucent(),
            SceneNode::Still(still) => still.values.iter().any(|(_, v)| v.is_translucent()),
        }
    }
}

impl From<AnimationInstance> for SceneNode {
    fn from(instance: AnimationInstance) -> Self {
        SceneNode::Animation(instance)
    }
}

impl From<StillScene> for SceneNode {
    fn from(still: StillScene) -> Self {
        SceneNode::Still(still)
    }
}
