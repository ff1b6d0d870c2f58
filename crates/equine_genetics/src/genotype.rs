//! Allele pairs and genotypes.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Diagnostics, GeneticsError, GeneticsWarning, Outcome};
use crate::locus::{Locus, Modifier};

/// Two allele tokens occupying one locus, written `"first/second"`.
///
/// The order is kept exactly as given: on the white-spotting loci the
/// non-neutral allele is conventionally written first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AllelePair {
    first: String,
    second: String,
}

impl AllelePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn alleles(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }

    /// Number of copies of `allele` (exact, case-sensitive match).
    pub fn count(&self, allele: &str) -> usize {
        self.alleles().iter().filter(|a| **a == allele).count()
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.count(allele) > 0
    }

    pub fn is_homozygous_for(&self, allele: &str) -> bool {
        self.count(allele) == 2
    }

    pub fn any(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.alleles().into_iter().any(predicate)
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

impl FromStr for AllelePair {
    type Err = GeneticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
                Ok(Self::new(first, second))
            }
            _ => Err(GeneticsError::MalformedAllelePair(s.to_string())),
        }
    }
}

impl TryFrom<String> for AllelePair {
    type Error = GeneticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AllelePair> for String {
    fn from(pair: AllelePair) -> Self {
        pair.to_string()
    }
}

/// Complete genetic makeup of one horse.
///
/// Immutable once created by the generator or the inheritance calculator;
/// the phenotype resolver only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    #[serde(default)]
    pub loci: IndexMap<String, AllelePair>,
    #[serde(default)]
    pub modifiers: IndexMap<String, bool>,
}

impl Genotype {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a genotype from loosely typed string pairs. Malformed pairs are
    /// dropped (the locus counts as absent) and reported.
    pub fn from_raw<L, M>(loci: L, modifiers: M) -> Outcome<Self>
    where
        L: IntoIterator<Item = (String, String)>,
        M: IntoIterator<Item = (String, bool)>,
    {
        let mut diagnostics = Diagnostics::default();
        let mut genotype = Genotype::new();
        for (locus, raw) in loci {
            match raw.parse::<AllelePair>() {
                Ok(pair) => {
                    genotype.loci.insert(locus, pair);
                }
                Err(_) => diagnostics.warn(GeneticsWarning::MalformedAllelePair { locus, raw }),
            }
        }
        genotype.modifiers.extend(modifiers);
        diagnostics.finish(genotype)
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty() && self.modifiers.is_empty()
    }

    pub fn pair(&self, locus: Locus) -> Option<&AllelePair> {
        self.loci.get(locus.name())
    }

    pub fn insert(&mut self, locus: impl Into<String>, pair: AllelePair) {
        self.loci.insert(locus.into(), pair);
    }

    /// `true` only when the modifier is present and set.
    pub fn modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.get(modifier.name()).copied().unwrap_or(false)
    }

    /// Convenience for builders and tests: `with(Locus::Cream, "Cr/n")`.
    pub fn with(mut self, locus: Locus, pair: &str) -> Result<Self, GeneticsError> {
        self.loci.insert(locus.name().to_string(), pair.parse()?);
        Ok(self)
    }

    pub fn with_modifier(mut self, modifier: Modifier, value: bool) -> Self {
        self.modifiers.insert(modifier.name().to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allele_pair_parses_and_displays() {
        let pair: AllelePair = "Cr/n".parse().unwrap();
        assert_eq!(pair.first(), "Cr");
        assert_eq!(pair.second(), "n");
        assert_eq!(pair.to_string(), "Cr/n");
        assert_eq!(pair.count("Cr"), 1);
        assert!(!pair.contains("cr"));
        assert!(!pair.is_homozygous_for("Cr"));
        assert!("prl/prl".parse::<AllelePair>().unwrap().is_homozygous_for("prl"));
    }

    #[test]
    fn test_allele_pair_rejects_malformed_input() {
        for raw in ["", "E", "E/", "/e", "E/e/e"] {
            assert!(raw.parse::<AllelePair>().is_err(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_from_raw_drops_malformed_loci() {
        let outcome = Genotype::from_raw(
            vec![
                ("E_Extension".to_string(), "E/e".to_string()),
                ("Cr_Cream".to_string(), "Cr".to_string()),
            ],
            vec![("sooty".to_string(), true)],
        );
        assert_eq!(outcome.warnings.len(), 1);
        let genotype = outcome.value;
        assert!(genotype.pair(Locus::Extension).is_some());
        assert!(genotype.pair(Locus::Cream).is_none());
        assert!(genotype.modifier(Modifier::Sooty));
        assert!(!genotype.modifier(Modifier::Flaxen));
    }

    #[test]
    fn test_genotype_ron_round_trip_keeps_pair_strings() {
        let genotype = Genotype::new()
            .with(Locus::Extension, "e/e")
            .unwrap()
            .with(Locus::DominantWhite, "W20/n")
            .unwrap()
            .with_modifier(Modifier::Flaxen, true);
        let text = ron::to_string(&genotype).unwrap();
        assert!(text.contains("\"W20/n\""));
        let back: Genotype = ron::from_str(&text).unwrap();
        assert_eq!(back, genotype);
    }
}
