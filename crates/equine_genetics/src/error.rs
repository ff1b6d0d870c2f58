use std::path::PathBuf;

use thiserror::Error;

/// Hard failures: contract violations and configuration I/O.
///
/// Problems with the genetic data itself never end up here, they are
/// reported as [`GeneticsWarning`]s next to a best-effort result.
#[derive(Error, Debug)]
pub enum GeneticsError {
    #[error("malformed allele pair {0:?} (expected two alleles joined by '/')")]
    MalformedAllelePair(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ron error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("serialization error: {0}")]
    Serialization(#[from] ron::Error),

    #[error("unknown breed: {0}")]
    UnknownBreed(String),
}

/// Domain-level diagnostics. Each one is logged when raised and handed back
/// to the caller inside an [`Outcome`](crate::Outcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticsWarning {
    #[error("no breed genetic profile supplied, returning an empty result")]
    MissingProfile,

    #[error("missing {0} genotype, returning an empty genotype")]
    MissingParent(&'static str),

    #[error("locus {locus}: no selectable allele pair in weight table")]
    EmptyWeightTable { locus: String },

    #[error("locus {locus}: malformed allele pair {raw:?}, treating locus as absent")]
    MalformedAllelePair { locus: String, raw: String },

    #[error("locus {locus}: chosen pair {pair} is disallowed, omitting locus")]
    DisallowedCombination { locus: String, pair: String },

    #[error("modifier {modifier}: invalid prevalence {value}, defaulting to false")]
    InvalidPrevalence { modifier: String, value: f64 },

    #[error("locus {locus}: no inheritance strategy produced a valid pair, omitting locus")]
    LocusOmitted { locus: String },

    #[error("unhandled champagne combination {combination}, falling back to {fallback}")]
    UnhandledChampagne {
        combination: String,
        fallback: String,
    },
}

/// A result together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<GeneticsWarning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, warnings: Vec<GeneticsWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Collects warnings and mirrors each one into the log.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<GeneticsWarning>,
}

impl Diagnostics {
    pub(crate) fn warn(&mut self, warning: GeneticsWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn finish<T>(self, value: T) -> Outcome<T> {
        Outcome::new(value, self.warnings)
    }
}
