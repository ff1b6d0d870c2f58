//! Breed genetic profiles and the breed catalog they are loaded from.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GeneticsError;

/// Relative weights keyed by label, in declaration order.
pub type WeightTable = IndexMap<String, f64>;

/// Genetic configuration of one breed.
///
/// Every field defaults to empty, so a partial profile is still usable:
/// the engine simply has nothing to draw from for the missing parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedGeneticProfile {
    /// locus -> (allele pair -> weight), for generation and inheritance fallback.
    pub allele_weights: IndexMap<String, WeightTable>,
    /// locus -> forbidden allele pairs.
    pub disallowed_combinations: IndexMap<String, Vec<String>>,
    /// locus -> permitted allele pairs for foals. Its keys also decide which
    /// loci a foal of this breed inherits.
    pub allowed_alleles: IndexMap<String, Vec<String>>,
    /// modifier -> probability in [0, 1].
    pub boolean_modifiers_prevalence: IndexMap<String, f64>,
    /// phenotype key or base color -> (shade -> weight).
    pub shade_bias: IndexMap<String, WeightTable>,
    pub marking_bias: MarkingBias,
    pub advanced_markings_bias: AdvancedMarkingsBias,
}

impl BreedGeneticProfile {
    pub fn is_disallowed(&self, locus: &str, pair: &str) -> bool {
        self.disallowed_combinations
            .get(locus)
            .is_some_and(|pairs| pairs.iter().any(|p| p == pair))
    }

    /// `true` when no allowed list is declared for the locus, or the list
    /// contains `pair`.
    pub fn is_allowed(&self, locus: &str, pair: &str) -> bool {
        self.allowed_alleles
            .get(locus)
            .map_or(true, |pairs| pairs.iter().any(|p| p == pair))
    }

    pub fn permits(&self, locus: &str, pair: &str) -> bool {
        self.is_allowed(locus, pair) && !self.is_disallowed(locus, pair)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkingBias {
    /// face marking -> weight
    pub face: WeightTable,
    /// Chance that any single leg is marked.
    pub legs_general_probability: f64,
    /// leg marking -> weight, used once a leg is marked.
    pub leg_specific_probabilities: WeightTable,
    /// Upper bound on marked legs; the engine default applies when unset.
    pub max_legs_marked: Option<usize>,
}

impl Default for MarkingBias {
    fn default() -> Self {
        Self {
            face: WeightTable::new(),
            legs_general_probability: 0.0,
            leg_specific_probabilities: WeightTable::new(),
            max_legs_marked: None,
        }
    }
}

/// Multipliers for rare marking sub-features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedMarkingsBias {
    pub snowflake: f64,
    pub frost: f64,
    pub bloody_shoulder: f64,
}

impl Default for AdvancedMarkingsBias {
    fn default() -> Self {
        Self {
            snowflake: 1.0,
            frost: 1.0,
            bloody_shoulder: 1.0,
        }
    }
}

/// All breed profiles known to the game, keyed by breed name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedCatalog {
    #[serde(default)]
    pub breeds: IndexMap<String, BreedGeneticProfile>,
}

impl BreedCatalog {
    pub fn from_ron_str(text: &str) -> Result<Self, GeneticsError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads a catalog from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GeneticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GeneticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron_str(&text)?;
        info!(
            "Loaded breed catalog from {} ({} breeds)",
            path.display(),
            catalog.breeds.len()
        );
        Ok(catalog)
    }

    pub fn to_ron_string(&self) -> Result<String, GeneticsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn get(&self, breed: &str) -> Option<&BreedGeneticProfile> {
        self.breeds.get(breed)
    }

    pub fn require(&self, breed: &str) -> Result<&BreedGeneticProfile, GeneticsError> {
        self.get(breed)
            .ok_or_else(|| GeneticsError::UnknownBreed(breed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"(
        breeds: {
            "Fjord": (
                allele_weights: {
                    "D_Dun": { "D/D": 0.8, "D/nd2": 0.2 },
                },
                disallowed_combinations: { "D_Dun": ["nd2/nd2"] },
                marking_bias: (legs_general_probability: 0.1),
            ),
        },
    )"#;

    #[test]
    fn test_partial_profile_deserializes_with_defaults() {
        let catalog = BreedCatalog::from_ron_str(PROFILE).unwrap();
        let fjord = catalog.require("Fjord").unwrap();
        let dun = &fjord.allele_weights["D_Dun"];
        assert_eq!(dun.keys().collect::<Vec<_>>(), vec!["D/D", "D/nd2"]);
        assert!(fjord.is_disallowed("D_Dun", "nd2/nd2"));
        assert!(fjord.shade_bias.is_empty());
        assert_eq!(fjord.marking_bias.max_legs_marked, None);
        assert_eq!(fjord.advanced_markings_bias.frost, 1.0);
    }

    #[test]
    fn test_unknown_breed_is_an_error() {
        let catalog = BreedCatalog::default();
        assert!(matches!(
            catalog.require("Unicorn"),
            Err(GeneticsError::UnknownBreed(name)) if name == "Unicorn"
        ));
    }

    #[test]
    fn test_allowed_without_declaration_permits_everything() {
        let mut profile = BreedGeneticProfile::default();
        assert!(profile.permits("E_Extension", "E/e"));
        profile
            .allowed_alleles
            .insert("E_Extension".into(), vec!["e/e".into()]);
        assert!(!profile.permits("E_Extension", "E/e"));
        assert!(profile.permits("E_Extension", "e/e"));
    }
}
