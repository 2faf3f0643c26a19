//! Pose: a bundle of named channel values produced by a grid layer.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::blend::blend_values;
use crate::value::Value;

/// Immutable-by-convention set of channel values keyed by target path
/// (e.g. `"rig/arm.rotation"`). Serialized as a plain JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    channels: HashMap<String, Value>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and tests.
    pub fn with(mut self, channel: impl Into<String>, value: Value) -> Self {
        self.channels.insert(channel.into(), value);
        self
    }

    pub fn insert(&mut self, channel: impl Into<String>, value: Value) -> Option<Value> {
        self.channels.insert(channel.into(), value)
    }

    pub fn get(&self, channel: &str) -> Option<&Value> {
        self.channels.get(channel)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.channels.iter()
    }

    /// Channel names in sorted order (stable for logging and diffs).
    pub fn channel_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.channels.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Blend from `self` toward `other` by `t` in [0,1].
    ///
    /// Shared channels blend per value kind. A channel present on one side only
    /// is taken from `self` when `t < 0.5` and from `other` otherwise, so
    /// `interpolate(0, b) == self` and `interpolate(1, b) == b`.
    pub fn interpolate(&self, t: f32, other: &Pose) -> Pose {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mut out: HashMap<String, Value> = if t < 0.5 {
            self.channels.clone()
        } else {
            other.channels.clone()
        };
        for (key, va) in self.channels.iter() {
            if let Some(vb) = other.channels.get(key) {
                out.insert(key.clone(), blend_values(va, vb, t));
            }
        }
        Pose { channels: out }
    }
}

impl FromIterator<(String, Value)> for Pose {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Pose {
            channels: iter.into_iter().collect(),
        }
    }
}
