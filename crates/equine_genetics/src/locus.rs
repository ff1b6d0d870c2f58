//! Gene loci and boolean modifiers the engine knows how to interpret.
//!
//! Genotypes and breed profiles stay keyed by plain strings so that a breed
//! can carry loci the phenotype pipeline ignores; these enums are the typed
//! view the engine uses for its own lookups.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Locus {
    #[strum(serialize = "E_Extension")]
    Extension,
    #[strum(serialize = "A_Agouti")]
    Agouti,
    #[strum(serialize = "Cr_Cream")]
    Cream,
    #[strum(serialize = "D_Dun")]
    Dun,
    #[strum(serialize = "Z_Silver")]
    Silver,
    #[strum(serialize = "CH_Champagne")]
    Champagne,
    #[strum(serialize = "PRL_Pearl")]
    Pearl,
    #[strum(serialize = "MFSD12_Mushroom")]
    Mushroom,
    #[strum(serialize = "G_Gray")]
    Gray,
    #[strum(serialize = "Rn_Roan")]
    Roan,
    #[strum(serialize = "W_DominantWhite")]
    DominantWhite,
    #[strum(serialize = "TO_Tobiano")]
    Tobiano,
    #[strum(serialize = "O_FrameOvero")]
    FrameOvero,
    #[strum(serialize = "SB1_Sabino1")]
    Sabino1,
    #[strum(serialize = "SW_SplashWhite")]
    SplashWhite,
    #[strum(serialize = "EDXW_EdenWhite")]
    EdenWhite,
    #[strum(serialize = "LP_LeopardComplex")]
    LeopardComplex,
    #[strum(serialize = "PATN1_Pattern1")]
    Pattern1,
}

impl Locus {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Non-Mendelian traits stored as plain booleans on a genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Sooty,
    Flaxen,
    Pangare,
    Rabicano,
}

impl Modifier {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_modifier_name(name: &str) -> bool {
        name.parse::<Modifier>().is_ok()
    }
}
