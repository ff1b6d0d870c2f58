//! Genotype generation for newly created horses.

use rand::Rng;
use tracing::debug;

use crate::error::{Diagnostics, GeneticsWarning, Outcome};
use crate::genotype::{AllelePair, Genotype};
use crate::profile::BreedGeneticProfile;
use crate::selector::{chance, select_weighted};

/// Builds a complete genotype from a breed's allele-probability profile.
///
/// Loci whose drawn pair is disallowed (or unusable) are left out rather
/// than re-drawn. A missing profile yields an empty genotype.
pub fn generate_genotype<R: Rng + ?Sized>(
    profile: Option<&BreedGeneticProfile>,
    rng: &mut R,
) -> Outcome<Genotype> {
    let mut diagnostics = Diagnostics::default();
    let Some(profile) = profile else {
        diagnostics.warn(GeneticsWarning::MissingProfile);
        return diagnostics.finish(Genotype::new());
    };

    let mut genotype = Genotype::new();
    add_loci(&mut genotype, profile, rng, &mut diagnostics);
    add_modifiers(&mut genotype, profile, rng, &mut diagnostics);

    debug!(
        "Generated genotype with {} loci and {} modifiers",
        genotype.loci.len(),
        genotype.modifiers.len()
    );
    diagnostics.finish(genotype)
}

fn add_loci<R: Rng + ?Sized>(
    genotype: &mut Genotype,
    profile: &BreedGeneticProfile,
    rng: &mut R,
    diagnostics: &mut Diagnostics,
) {
    for (locus, weights) in &profile.allele_weights {
        let Some(raw) = select_weighted(weights, rng) else {
            diagnostics.warn(GeneticsWarning::EmptyWeightTable {
                locus: locus.clone(),
            });
            continue;
        };
        if profile.is_disallowed(locus, raw) {
            diagnostics.warn(GeneticsWarning::DisallowedCombination {
                locus: locus.clone(),
                pair: raw.clone(),
            });
            continue;
        }
        match raw.parse::<AllelePair>() {
            Ok(pair) => genotype.insert(locus.clone(), pair),
            Err(_) => diagnostics.warn(GeneticsWarning::MalformedAllelePair {
                locus: locus.clone(),
                raw: raw.clone(),
            }),
        }
    }
}

fn add_modifiers<R: Rng + ?Sized>(
    genotype: &mut Genotype,
    profile: &BreedGeneticProfile,
    rng: &mut R,
    diagnostics: &mut Diagnostics,
) {
    for (modifier, &prevalence) in &profile.boolean_modifiers_prevalence {
        let value = prevalence_draw(modifier, prevalence, rng, diagnostics);
        genotype.modifiers.insert(modifier.clone(), value);
    }
}

/// Draws a modifier from its breed prevalence. NaN or anything outside
/// [0, 1] gives `false` and a warning.
pub(crate) fn prevalence_draw<R: Rng + ?Sized>(
    modifier: &str,
    prevalence: f64,
    rng: &mut R,
    diagnostics: &mut Diagnostics,
) -> bool {
    if (0.0..=1.0).contains(&prevalence) {
        chance(prevalence, rng)
    } else {
        diagnostics.warn(GeneticsWarning::InvalidPrevalence {
            modifier: modifier.to_string(),
            value: prevalence,
        });
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locus::{Locus, Modifier};
    use indexmap::IndexMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn weights(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    #[test]
    fn test_missing_profile_gives_empty_genotype() {
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = generate_genotype(None, &mut rng);
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.warnings, vec![GeneticsWarning::MissingProfile]);
    }

    #[test]
    fn test_disallowed_pairs_never_appear() {
        let mut profile = BreedGeneticProfile::default();
        profile.allele_weights.insert(
            "O_FrameOvero".into(),
            weights(&[("O/O", 1.0), ("O/n", 1.0), ("n/n", 2.0)]),
        );
        profile
            .disallowed_combinations
            .insert("O_FrameOvero".into(), vec!["O/O".into()]);

        let mut rng = StdRng::seed_from_u64(11);
        let mut omitted = 0;
        for _ in 0..500 {
            let outcome = generate_genotype(Some(&profile), &mut rng);
            match outcome.value.pair(Locus::FrameOvero) {
                Some(pair) => assert_ne!(pair.to_string(), "O/O"),
                None => {
                    omitted += 1;
                    assert!(matches!(
                        outcome.warnings.as_slice(),
                        [GeneticsWarning::DisallowedCombination { .. }]
                    ));
                }
            }
        }
        assert!(omitted > 0, "O/O should have been drawn at least once");
    }

    #[test]
    fn test_prevalence_extremes_and_invalid_values() {
        let mut profile = BreedGeneticProfile::default();
        profile
            .boolean_modifiers_prevalence
            .insert("sooty".into(), 1.0);
        profile
            .boolean_modifiers_prevalence
            .insert("flaxen".into(), 0.0);
        profile
            .boolean_modifiers_prevalence
            .insert("pangare".into(), 1.7);

        let mut rng = StdRng::seed_from_u64(5);
        let outcome = generate_genotype(Some(&profile), &mut rng);
        let genotype = &outcome.value;
        assert!(genotype.modifier(Modifier::Sooty));
        assert!(!genotype.modifier(Modifier::Flaxen));
        assert_eq!(genotype.modifiers.get("pangare"), Some(&false));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_every_weighted_locus_is_generated() {
        let mut profile = BreedGeneticProfile::default();
        profile
            .allele_weights
            .insert("E_Extension".into(), weights(&[("E/e", 1.0)]));
        profile
            .allele_weights
            .insert("A_Agouti".into(), weights(&[("A/a", 0.0), ("a/a", 0.0)]));

        let mut rng = StdRng::seed_from_u64(9);
        let genotype = generate_genotype(Some(&profile), &mut rng).into_value();
        assert_eq!(genotype.pair(Locus::Extension).unwrap().to_string(), "E/e");
        assert_eq!(genotype.pair(Locus::Agouti).unwrap().to_string(), "A/a");
    }
}
