use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Parameter keys the shading pipeline actually reads. Every other key
// (gridDensity, morphFactor, chaos, hue, saturation, the mouse values, ...)
// is stored on upsert and carried forward-compatibly but has no effect on the
// current programs.
pub const PARAM_SPEED: &str = "speed";
pub const PARAM_INTENSITY: &str = "intensity";
pub const PARAM_ROLE_INTENSITY: &str = "roleIntensity";

const DEFAULT_SPEED: f32 = 1.0;

/// Name-keyed visual parameters with per-key defaults. Upsert only; there is
/// no deletion operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualParams {
    values: HashMap<String, f32>,
}

impl VisualParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn extend<I: IntoIterator<Item = (String, f32)>>(&mut self, entries: I) {
        for (name, value) in entries {
            self.values.insert(name, value);
        }
    }

    /// Missing `speed` resolves to 1.0; every other missing key to 0.0.
    pub fn get(&self, name: &str) -> f32 {
        match self.values.get(name) {
            Some(v) => *v,
            None if name == PARAM_SPEED => DEFAULT_SPEED,
            None => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
