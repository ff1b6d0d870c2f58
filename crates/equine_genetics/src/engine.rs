//! Settings-carrying entry point for the three genetics operations.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Outcome;
use crate::generator::generate_genotype;
use crate::genotype::Genotype;
use crate::inheritance::inherit_genotype_with;
use crate::phenotype::{resolve_phenotype_with, PhenotypeResult};
use crate::profile::{BreedCatalog, BreedGeneticProfile};
use crate::settings::EngineSettings;

/// Bundles [`EngineSettings`] with generation, inheritance and phenotype
/// resolution, so callers configure the engine once.
#[derive(Debug, Clone, Default)]
pub struct GeneticsEngine {
    settings: EngineSettings,
}

/// A horse as the engine sees it: genotype plus resolved phenotype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub breed: String,
    pub genotype: Genotype,
    pub phenotype: PhenotypeResult,
}

impl GeneticsEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        profile: Option<&BreedGeneticProfile>,
        rng: &mut R,
    ) -> Outcome<Genotype> {
        generate_genotype(profile, rng)
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        genotype: &Genotype,
        profile: &BreedGeneticProfile,
        age_in_years: f64,
        rng: &mut R,
    ) -> Outcome<PhenotypeResult> {
        resolve_phenotype_with(genotype, profile, age_in_years, &self.settings, rng)
    }

    pub fn inherit<R: Rng + ?Sized>(
        &self,
        sire: Option<&Genotype>,
        dam: Option<&Genotype>,
        foal_profile: Option<&BreedGeneticProfile>,
        rng: &mut R,
    ) -> Outcome<Genotype> {
        inherit_genotype_with(sire, dam, foal_profile, &self.settings, rng)
    }

    /// Generates a horse of `breed` and resolves its phenotype at `age_in_years`.
    /// An unknown breed is generated without a profile (empty genotype).
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        catalog: &BreedCatalog,
        breed: &str,
        age_in_years: f64,
        rng: &mut R,
    ) -> Outcome<Horse> {
        let profile = catalog.get(breed);
        let generated = self.generate(profile, rng);
        let mut warnings = generated.warnings;
        let default_profile = BreedGeneticProfile::default();
        let resolved = self.resolve(
            &generated.value,
            profile.unwrap_or(&default_profile),
            age_in_years,
            rng,
        );
        warnings.extend(resolved.warnings);
        Outcome::new(
            Horse {
                breed: breed.to_string(),
                genotype: generated.value,
                phenotype: resolved.value,
            },
            warnings,
        )
    }

    /// Breeds a foal of the given breed and resolves it at `age_in_years`
    /// (0 for a newborn).
    pub fn breed<R: Rng + ?Sized>(
        &self,
        catalog: &BreedCatalog,
        sire: &Genotype,
        dam: &Genotype,
        foal_breed: &str,
        age_in_years: f64,
        rng: &mut R,
    ) -> Outcome<Horse> {
        let profile = catalog.get(foal_breed);
        let inherited = self.inherit(Some(sire), Some(dam), profile, rng);
        let mut warnings = inherited.warnings;
        let default_profile = BreedGeneticProfile::default();
        let resolved = self.resolve(
            &inherited.value,
            profile.unwrap_or(&default_profile),
            age_in_years,
            rng,
        );
        warnings.extend(resolved.warnings);
        Outcome::new(
            Horse {
                breed: foal_breed.to_string(),
                genotype: inherited.value,
                phenotype: resolved.value,
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticsWarning;
    use crate::locus::Locus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> BreedCatalog {
        BreedCatalog::from_ron_str(
            r#"(
                breeds: {
                    "Haflinger": (
                        allele_weights: {
                            "E_Extension": { "e/e": 1.0 },
                            "Cr_Cream": { "n/n": 1.0 },
                        },
                        allowed_alleles: {
                            "E_Extension": ["e/e"],
                        },
                        boolean_modifiers_prevalence: { "flaxen": 1.0 },
                    ),
                },
            )"#,
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_known_breed() {
        let engine = GeneticsEngine::default();
        let mut rng = StdRng::seed_from_u64(21);
        let horse = engine
            .spawn(&catalog(), "Haflinger", 4.0, &mut rng)
            .into_value();
        assert_eq!(horse.genotype.pair(Locus::Extension).unwrap().to_string(), "e/e");
        assert_eq!(horse.phenotype.final_display_color, "Chestnut Flaxen");
    }

    #[test]
    fn test_spawn_unknown_breed_warns() {
        let engine = GeneticsEngine::default();
        let mut rng = StdRng::seed_from_u64(22);
        let outcome = engine.spawn(&catalog(), "Unicorn", 4.0, &mut rng);
        assert!(outcome.value.genotype.is_empty());
        assert_eq!(outcome.value.phenotype.final_display_color, "Black");
        assert_eq!(outcome.warnings, vec![GeneticsWarning::MissingProfile]);
    }

    #[test]
    fn test_breed_restricted_foal() {
        let engine = GeneticsEngine::new(EngineSettings::default());
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(23);
        let sire = engine
            .spawn(&catalog, "Haflinger", 6.0, &mut rng)
            .into_value()
            .genotype;
        let dam = Genotype::new().with(Locus::Extension, "E/E").unwrap();

        let foal = engine
            .breed(&catalog, &sire, &dam, "Haflinger", 0.0, &mut rng)
            .into_value();
        // E/E x e/e can only give E/e, which the breed forbids; the breed's
        // weights step in.
        assert_eq!(foal.genotype.pair(Locus::Extension).unwrap().to_string(), "e/e");
        assert!(foal.phenotype.final_display_color.starts_with("Chestnut"));
    }
}
