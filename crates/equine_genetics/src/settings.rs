use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeneticsError;

/// Tunables of the engine. Anything left out of a settings file keeps its
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Direct gamete-sampling attempts per locus before falling back.
    pub max_inheritance_attempts: u32,
    /// Base chance of a bloody-shoulder marking on a gray horse, scaled by
    /// the breed's `advanced_markings_bias.bloody_shoulder`.
    pub bloody_shoulder_chance: f64,
    /// Leg cap used when a breed does not set `max_legs_marked`.
    pub default_max_legs_marked: usize,
    /// Age (years) at which leopard-complex roaning turns Moderate, then Heavy.
    pub leopard_age_cutoffs: [f64; 2],
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_inheritance_attempts: 10,
            bloody_shoulder_chance: 0.02,
            default_max_legs_marked: 4,
            leopard_age_cutoffs: [4.0, 8.0],
        }
    }
}

impl EngineSettings {
    pub fn from_ron_str(text: &str) -> Result<Self, GeneticsError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GeneticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GeneticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }
}
