//! Foal genotypes from two parents.
//!
//! Each locus is resolved by walking [`InheritanceTier`]s in order until one
//! yields a pair the foal's breed permits; boolean modifiers follow their own
//! agreement rules.

use indexmap::IndexSet;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Diagnostics, GeneticsWarning, Outcome};
use crate::generator::prevalence_draw;
use crate::genotype::{AllelePair, Genotype};
use crate::locus::Modifier;
use crate::profile::BreedGeneticProfile;
use crate::selector::select_weighted;
use crate::settings::EngineSettings;

/// Alleles that lose the front slot against anything else (case-insensitive).
const RECESSIVE_ALLELES: [&str; 19] = [
    "n", "w", "patn1", "nd1", "nd2", "lp", "g", "rn", "to", "o", "sb1", "mu", "e", "a", "ch",
    "cr", "z", "prl", "d",
];

const DOMINANT_ALLELES: [&str; 15] = [
    "E", "A", "At", "Cr", "D", "Z", "Ch", "G", "Rn", "TO", "O", "SB1", "LP", "PATN1", "Mu",
];

/// Loci on which a named variant keeps the front slot against a neutral allele.
const ORDER_PRESERVING_PREFIXES: [&str; 3] = ["W", "SW", "EDXW"];

/// Recessive homozygous pairs tried, in order, when nothing else works.
const CANONICAL_RECESSIVE_PAIRS: [&str; 18] = [
    "n/n", "e/e", "a/a", "w/w", "nd2/nd2", "cr/cr", "d/d", "z/z", "ch/ch", "prl/prl", "mu/mu",
    "g/g", "rn/rn", "to/to", "o/o", "sb1/sb1", "lp/lp", "patn1/patn1",
];

/// Strategies for filling one foal locus, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceTier {
    /// Sample one allele from each parent, bounded retries.
    DirectSampling,
    /// Draw from the foal breed's allele weights.
    WeightedTable,
    /// First permitted pair from [`CANONICAL_RECESSIVE_PAIRS`].
    CanonicalRecessive,
    /// First permitted entry of the breed's allowed list.
    FirstAllowed,
}

impl InheritanceTier {
    pub const ORDER: [InheritanceTier; 4] = [
        InheritanceTier::DirectSampling,
        InheritanceTier::WeightedTable,
        InheritanceTier::CanonicalRecessive,
        InheritanceTier::FirstAllowed,
    ];
}

fn is_recessive(allele: &str) -> bool {
    RECESSIVE_ALLELES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(allele))
}

fn is_neutral(allele: &str) -> bool {
    allele == "n" || allele == "w"
}

/// Orders two sampled alleles into the notation used across the game:
/// dominant or named allele first, otherwise a stable byte-order sort.
pub fn order_alleles(locus: &str, a: &str, b: &str) -> AllelePair {
    let (first, second) = match (is_recessive(a), is_recessive(b)) {
        (false, true) => (a, b),
        (true, false) => (b, a),
        _ => {
            let order_preserving = ORDER_PRESERVING_PREFIXES
                .iter()
                .any(|prefix| locus.starts_with(prefix));
            let dominant_over = |d: &str, other: &str| {
                DOMINANT_ALLELES.contains(&d)
                    && (other == "n" || other == d.to_lowercase())
            };
            if order_preserving && is_neutral(b) && !is_neutral(a) {
                (a, b)
            } else if order_preserving && is_neutral(a) && !is_neutral(b) {
                (b, a)
            } else if dominant_over(a, b) {
                (a, b)
            } else if dominant_over(b, a) {
                (b, a)
            } else if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        }
    };
    AllelePair::new(first, second)
}

/// Computes a foal genotype from sire, dam and the foal's breed profile
/// with the default [`EngineSettings`].
///
/// Any missing input yields an empty genotype plus a warning.
pub fn inherit_genotype<R: Rng + ?Sized>(
    sire: Option<&Genotype>,
    dam: Option<&Genotype>,
    foal_profile: Option<&BreedGeneticProfile>,
    rng: &mut R,
) -> Outcome<Genotype> {
    inherit_genotype_with(sire, dam, foal_profile, &EngineSettings::default(), rng)
}

pub fn inherit_genotype_with<R: Rng + ?Sized>(
    sire: Option<&Genotype>,
    dam: Option<&Genotype>,
    foal_profile: Option<&BreedGeneticProfile>,
    settings: &EngineSettings,
    rng: &mut R,
) -> Outcome<Genotype> {
    let mut diagnostics = Diagnostics::default();
    let (sire, dam, profile) = match (sire, dam, foal_profile) {
        (Some(sire), Some(dam), Some(profile)) => (sire, dam, profile),
        (None, _, _) => {
            diagnostics.warn(GeneticsWarning::MissingParent("sire"));
            return diagnostics.finish(Genotype::new());
        }
        (_, None, _) => {
            diagnostics.warn(GeneticsWarning::MissingParent("dam"));
            return diagnostics.finish(Genotype::new());
        }
        (_, _, None) => {
            diagnostics.warn(GeneticsWarning::MissingProfile);
            return diagnostics.finish(Genotype::new());
        }
    };

    let mut foal = Genotype::new();
    for locus in loci_to_inherit(sire, dam, profile) {
        let resolved = InheritanceTier::ORDER.iter().find_map(|tier| {
            let pair = run_tier(*tier, &locus, sire, dam, profile, settings, rng)?;
            trace!("{locus}: {pair} via {tier:?}");
            Some(pair)
        });
        match resolved {
            Some(pair) => foal.insert(locus, pair),
            None => diagnostics.warn(GeneticsWarning::LocusOmitted { locus }),
        }
    }

    inherit_modifiers(&mut foal, sire, dam, profile, rng, &mut diagnostics);

    debug!("Inherited foal genotype with {} loci", foal.loci.len());
    diagnostics.finish(foal)
}

fn loci_to_inherit(sire: &Genotype, dam: &Genotype, profile: &BreedGeneticProfile) -> Vec<String> {
    if !profile.allowed_alleles.is_empty() {
        return profile.allowed_alleles.keys().cloned().collect();
    }
    sire.loci
        .keys()
        .chain(dam.loci.keys())
        .filter(|locus| {
            !Modifier::is_modifier_name(locus)
                && !profile.boolean_modifiers_prevalence.contains_key(*locus)
        })
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn run_tier<R: Rng + ?Sized>(
    tier: InheritanceTier,
    locus: &str,
    sire: &Genotype,
    dam: &Genotype,
    profile: &BreedGeneticProfile,
    settings: &EngineSettings,
    rng: &mut R,
) -> Option<AllelePair> {
    match tier {
        InheritanceTier::DirectSampling => {
            let (sire_pair, dam_pair) = (sire.loci.get(locus)?, dam.loci.get(locus)?);
            (0..settings.max_inheritance_attempts).find_map(|_| {
                let from_sire = sire_pair.alleles()[rng.gen_range(0..2)];
                let from_dam = dam_pair.alleles()[rng.gen_range(0..2)];
                let pair = order_alleles(locus, from_sire, from_dam);
                profile.permits(locus, &pair.to_string()).then_some(pair)
            })
        }
        InheritanceTier::WeightedTable => {
            let raw = select_weighted(profile.allele_weights.get(locus)?, rng)?;
            if !profile.permits(locus, raw) {
                return None;
            }
            raw.parse().ok()
        }
        InheritanceTier::CanonicalRecessive => {
            let allowed = profile.allowed_alleles.get(locus)?;
            CANONICAL_RECESSIVE_PAIRS
                .iter()
                .find(|pair| {
                    allowed.iter().any(|a| a == *pair) && !profile.is_disallowed(locus, pair)
                })
                .and_then(|pair| pair.parse().ok())
        }
        InheritanceTier::FirstAllowed => profile
            .allowed_alleles
            .get(locus)?
            .iter()
            .find(|pair| !profile.is_disallowed(locus, pair))
            .and_then(|pair| pair.parse().ok()),
    }
}

fn inherit_modifiers<R: Rng + ?Sized>(
    foal: &mut Genotype,
    sire: &Genotype,
    dam: &Genotype,
    profile: &BreedGeneticProfile,
    rng: &mut R,
    diagnostics: &mut Diagnostics,
) {
    for (modifier, &prevalence) in &profile.boolean_modifiers_prevalence {
        let value = match (sire.modifiers.get(modifier), dam.modifiers.get(modifier)) {
            (Some(&s), Some(&d)) if s == d => s,
            (Some(_), Some(_)) => rng.gen_bool(0.5),
            (Some(&v), None) | (None, Some(&v)) => {
                if rng.gen_bool(0.5) {
                    v
                } else {
                    prevalence_draw(modifier, prevalence, rng, diagnostics)
                }
            }
            (None, None) => prevalence_draw(modifier, prevalence, rng, diagnostics),
        };
        foal.modifiers.insert(modifier.clone(), value);
    }
}
