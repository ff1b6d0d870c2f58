//! Horse coat genetics for the breeding game.
//!
//! - [`generate_genotype`] draws a new horse's genotype from a breed profile.
//! - [`resolve_phenotype`] turns a genotype into a display color and markings.
//! - [`inherit_genotype`] produces a foal genotype from two parents.
//!
//! Data problems never abort an operation: every entry point returns an
//! [`Outcome`] holding a best-effort value plus the [`GeneticsWarning`]s
//! raised along the way. All randomness comes from a caller-supplied RNG,
//! so a seeded generator gives reproducible results.

pub mod engine;
pub mod error;
pub mod generator;
pub mod genotype;
pub mod inheritance;
pub mod locus;
pub mod phenotype;
pub mod profile;
pub mod selector;
pub mod settings;

pub use engine::{GeneticsEngine, Horse};
pub use error::{GeneticsError, GeneticsWarning, Outcome};
pub use generator::generate_genotype;
pub use genotype::{AllelePair, Genotype};
pub use inheritance::{inherit_genotype, inherit_genotype_with, order_alleles, InheritanceTier};
pub use locus::{Locus, Modifier};
pub use phenotype::{
    resolve_phenotype, resolve_phenotype_with, LegMarkings, PhenotypeResult, PhenotypicMarkings,
};
pub use profile::{AdvancedMarkingsBias, BreedCatalog, BreedGeneticProfile, MarkingBias, WeightTable};
pub use selector::select_weighted;
pub use settings::EngineSettings;
