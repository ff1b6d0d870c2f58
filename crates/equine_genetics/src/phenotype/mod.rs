//! Phenotype resolution: genotype + breed profile + age -> visible coat.
//!
//! The color is built by folding a fixed list of stages over a typed
//! [`ColorState`]. Each stage reads the genotype and the flags set by the
//! stages before it. Only the last step renders the display string.

mod assembly;
mod dilution;
mod markings;
mod overlay;
mod pearl;
mod state;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Diagnostics, Outcome};
use crate::genotype::Genotype;
use crate::locus::Locus;
use crate::profile::BreedGeneticProfile;
use crate::settings::EngineSettings;

pub use markings::{LegMarkings, PhenotypicMarkings, NO_MARKING};
pub use overlay::NEAR_WHITE_ALLELES;
pub use state::{BaseColor, Dose};

use state::{ColorState, Stage, StageContext};

const STAGES: [Stage; 16] = [
    dilution::base_coat,
    dilution::mushroom,
    dilution::cream,
    dilution::dun,
    dilution::champagne,
    dilution::silver,
    pearl::pearl,
    overlay::shade,
    overlay::sooty,
    overlay::flaxen_and_pangare,
    overlay::roan,
    overlay::white_patterns,
    overlay::leopard_complex,
    overlay::gray,
    overlay::rabicano,
    overlay::primitive_markings,
];

/// The visible traits of a horse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeResult {
    pub final_display_color: String,
    pub phenotypic_markings: PhenotypicMarkings,
    /// Shade drawn from the breed's shade bias, "standard" when none applies.
    pub determined_shade: String,
    /// Normalized color name used for shade lookups.
    pub phenotype_key: String,
}

/// Resolves a phenotype with the default [`EngineSettings`].
pub fn resolve_phenotype<R: Rng + ?Sized>(
    genotype: &Genotype,
    profile: &BreedGeneticProfile,
    age_in_years: f64,
    rng: &mut R,
) -> Outcome<PhenotypeResult> {
    resolve_phenotype_with(genotype, profile, age_in_years, &EngineSettings::default(), rng)
}

/// Resolves the display color and markings of `genotype`.
///
/// Unknown loci are ignored and absent loci count as wild type. Negative
/// or non-finite ages are treated as 0.
pub fn resolve_phenotype_with<R: Rng + ?Sized>(
    genotype: &Genotype,
    profile: &BreedGeneticProfile,
    age_in_years: f64,
    settings: &EngineSettings,
    mut rng: &mut R,
) -> Outcome<PhenotypeResult> {
    let age = if age_in_years.is_finite() {
        age_in_years.max(0.0)
    } else {
        0.0
    };
    let mut diagnostics = Diagnostics::default();

    let (state, mut markings) = {
        let mut ctx = StageContext {
            genotype,
            profile,
            age,
            settings,
            rng: &mut rng as &mut dyn RngCore,
            diagnostics: &mut diagnostics,
        };
        let state = STAGES
            .iter()
            .fold(ColorState::default(), |state, stage| stage(state, &mut ctx));
        let markings = markings::roll_markings(&profile.marking_bias, settings, &mut *ctx.rng);
        (state, markings)
    };

    let leopard_carrier = genotype
        .pair(Locus::LeopardComplex)
        .is_some_and(|pair| pair.contains("LP"));
    if leopard_carrier && !state.all_white {
        markings.mottling = Some(true);
        markings.striping = Some(true);
    }
    markings.body_markings = state.body_markings.clone();

    let result = PhenotypeResult {
        final_display_color: assembly::assemble(&state),
        phenotypic_markings: markings,
        determined_shade: state
            .determined_shade
            .clone()
            .unwrap_or_else(|| "standard".to_string()),
        phenotype_key: state.key.clone(),
    };
    debug!(
        "Resolved phenotype {:?} (key {:?}, age {age})",
        result.final_display_color, result.phenotype_key
    );
    diagnostics.finish(result)
}
