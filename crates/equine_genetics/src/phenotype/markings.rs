//! Face and leg white markings, rolled independently of coat color.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::profile::MarkingBias;
use crate::selector::{chance, select_weighted};
use crate::settings::EngineSettings;

pub const NO_MARKING: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegMarkings {
    #[serde(rename = "LF")]
    pub left_fore: String,
    #[serde(rename = "RF")]
    pub right_fore: String,
    #[serde(rename = "LH")]
    pub left_hind: String,
    #[serde(rename = "RH")]
    pub right_hind: String,
}

impl Default for LegMarkings {
    fn default() -> Self {
        Self {
            left_fore: NO_MARKING.to_string(),
            right_fore: NO_MARKING.to_string(),
            left_hind: NO_MARKING.to_string(),
            right_hind: NO_MARKING.to_string(),
        }
    }
}

impl LegMarkings {
    /// Legs in LF, RF, LH, RH order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.left_fore,
            &self.right_fore,
            &self.left_hind,
            &self.right_hind,
        ]
        .into_iter()
        .map(String::as_str)
    }

    pub fn marked_count(&self) -> usize {
        self.iter().filter(|leg| *leg != NO_MARKING).count()
    }

    fn legs_mut(&mut self) -> [&mut String; 4] {
        [
            &mut self.left_fore,
            &mut self.right_fore,
            &mut self.left_hind,
            &mut self.right_hind,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhenotypicMarkings {
    pub face: String,
    pub legs: LegMarkings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mottling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striping: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_markings: Vec<String>,
}

pub(crate) fn roll_markings(
    bias: &MarkingBias,
    settings: &EngineSettings,
    rng: &mut dyn RngCore,
) -> PhenotypicMarkings {
    let face = select_weighted(&bias.face, &mut *rng)
        .cloned()
        .unwrap_or_else(|| NO_MARKING.to_string());

    let max_legs = bias
        .max_legs_marked
        .unwrap_or(settings.default_max_legs_marked);
    let mut legs = LegMarkings::default();
    let mut marked = 0;
    for leg in legs.legs_mut() {
        if marked >= max_legs || !chance(bias.legs_general_probability, &mut *rng) {
            continue;
        }
        if let Some(marking) = select_weighted(&bias.leg_specific_probabilities, &mut *rng) {
            *leg = marking.clone();
            marked += 1;
        }
    }

    PhenotypicMarkings {
        face,
        legs,
        ..PhenotypicMarkings::default()
    }
}
