//! The accumulator threaded through the phenotype stages.

use std::fmt;

use rand::RngCore;

use crate::error::Diagnostics;
use crate::genotype::Genotype;
use crate::locus::Locus;
use crate::profile::BreedGeneticProfile;
use crate::settings::EngineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseColor {
    Chestnut,
    Bay,
    Black,
}

impl BaseColor {
    pub fn name(self) -> &'static str {
        match self {
            BaseColor::Chestnut => "Chestnut",
            BaseColor::Bay => "Bay",
            BaseColor::Black => "Black",
        }
    }

    /// Color name with one (`Single`) or two (`Double`) cream alleles.
    pub fn cream_name(self, dose: Dose) -> Option<&'static str> {
        match (self, dose) {
            (_, Dose::None) => None,
            (BaseColor::Chestnut, Dose::Single) => Some("Palomino"),
            (BaseColor::Bay, Dose::Single) => Some("Buckskin"),
            (BaseColor::Black, Dose::Single) => Some("Smoky Black"),
            (BaseColor::Chestnut, Dose::Double) => Some("Cremello"),
            (BaseColor::Bay, Dose::Double) => Some("Perlino"),
            (BaseColor::Black, Dose::Double) => Some("Smoky Cream"),
        }
    }

    pub fn champagne_name(self) -> &'static str {
        match self {
            BaseColor::Chestnut => "Gold",
            BaseColor::Bay => "Amber",
            BaseColor::Black => "Classic",
        }
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Copies of a dilution allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dose {
    #[default]
    None,
    Single,
    Double,
}

impl Dose {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Dose::None,
            1 => Dose::Single,
            _ => Dose::Double,
        }
    }

    pub fn is_present(self) -> bool {
        self != Dose::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DunState {
    #[default]
    None,
    /// Dun coloration applied to the color name.
    Dun,
    /// Non-dun allele carried: primitive markings only, no color change.
    Primitive,
}

impl DunState {
    pub fn is_dun(self) -> bool {
        self == DunState::Dun
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartRole {
    Sooty,
    Shade,
    Main,
    /// Flaxen, Pangare, Rabicano, primitive markings.
    Modifier,
    /// White spotting and leopard-complex terms; never the main term.
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub text: String,
    pub role: PartRole,
}

impl Part {
    pub fn new(text: impl Into<String>, role: PartRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

/// Typed color state. Stages read and update the flags; the human-facing
/// string is only assembled at the end.
#[derive(Debug, Clone, Default)]
pub struct ColorState {
    pub base: Option<BaseColor>,
    pub mushroom: bool,
    pub cream: Dose,
    pub dun: DunState,
    pub champagne: bool,
    pub pearl: Dose,
    pub pearl_handled: bool,
    pub silver: bool,
    pub gray: bool,
    pub all_white: bool,

    /// Main color term, e.g. "Buckskin Dun".
    pub color: String,
    /// Normalized key for shade lookup.
    pub key: String,
    pub sooty: bool,
    pub shade: Option<String>,
    pub determined_shade: Option<String>,
    pub descriptors: Vec<Part>,
    pub body_markings: Vec<String>,
}

impl ColorState {
    pub fn base(&self) -> BaseColor {
        self.base.unwrap_or(BaseColor::Black)
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.key = color.clone();
        self.color = color;
    }

    /// Applies the same rewrite to display color and phenotype key.
    pub fn rewrite(&mut self, f: impl Fn(&str) -> String) {
        self.color = f(&self.color);
        self.key = f(&self.key);
    }

    /// Everything rendered so far, for idempotence checks.
    pub fn rendered(&self) -> String {
        let mut text = String::new();
        if self.sooty {
            text.push_str("Sooty ");
        }
        if let Some(shade) = &self.shade {
            text.push_str(shade);
            text.push(' ');
        }
        text.push_str(&self.color);
        for part in &self.descriptors {
            text.push(' ');
            text.push_str(&part.text);
        }
        text
    }

    /// Adds a descriptor unless the rendered color already mentions it.
    pub fn describe(&mut self, text: impl Into<String>, role: PartRole) {
        let text = text.into();
        if !contains_ignore_case(&self.rendered(), &text) {
            self.descriptors.push(Part::new(text, role));
        }
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Read-only inputs plus the mutable side channels (randomness, warnings).
pub(crate) struct StageContext<'a> {
    pub(crate) genotype: &'a Genotype,
    pub(crate) profile: &'a BreedGeneticProfile,
    pub(crate) age: f64,
    pub(crate) settings: &'a EngineSettings,
    pub(crate) rng: &'a mut dyn RngCore,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

impl StageContext<'_> {
    pub(crate) fn count(&self, locus: Locus, allele: &str) -> usize {
        self.genotype.pair(locus).map_or(0, |pair| pair.count(allele))
    }

    pub(crate) fn has(&self, locus: Locus, allele: &str) -> bool {
        self.count(locus, allele) > 0
    }

    pub(crate) fn homozygous(&self, locus: Locus, allele: &str) -> bool {
        self.genotype
            .pair(locus)
            .is_some_and(|pair| pair.is_homozygous_for(allele))
    }

    pub(crate) fn any(&self, locus: Locus, predicate: impl Fn(&str) -> bool) -> bool {
        self.genotype
            .pair(locus)
            .is_some_and(|pair| pair.any(predicate))
    }
}

pub(crate) type Stage = fn(ColorState, &mut StageContext<'_>) -> ColorState;
