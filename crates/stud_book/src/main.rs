mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use equine_genetics::{BreedCatalog, EngineSettings, GeneticsEngine, Genotype, Horse, Outcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Cmd};

fn init_logging() {
    #[cfg(debug_assertions)]
    let level = LevelFilter::INFO;

    #[cfg(not(debug_assertions))]
    let level = LevelFilter::WARN;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout carries the RON output, logs go to stderr
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_genotype(path: &Path) -> Result<Genotype> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading genotype {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing genotype {}", path.display()))
}

fn print_horse(outcome: Outcome<Horse>) -> Result<()> {
    if outcome.has_warnings() {
        warn!("{} warning(s) while processing {}", outcome.warnings.len(), outcome.value.breed);
    }
    let text = ron::ser::to_string_pretty(&outcome.value, ron::ser::PrettyConfig::default())?;
    println!("{text}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging();

    let catalog = BreedCatalog::load(&args.catalog)
        .with_context(|| format!("loading breed catalog {}", args.catalog.display()))?;
    let settings = match &args.settings {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading engine settings {}", path.display()))?,
        None => EngineSettings::default(),
    };
    let engine = GeneticsEngine::new(settings);
    debug!("Engine settings: {:?}", engine.settings());

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    match args.cmd {
        Cmd::Generate { breed, age } => {
            catalog.require(&breed)?;
            print_horse(engine.spawn(&catalog, &breed, age, &mut rng))
        }
        Cmd::Resolve {
            genotype,
            breed,
            age,
        } => {
            let profile = catalog.require(&breed)?;
            let genotype = load_genotype(&genotype)?;
            let resolved = engine.resolve(&genotype, profile, age, &mut rng);
            print_horse(Outcome::new(
                Horse {
                    breed,
                    genotype,
                    phenotype: resolved.value,
                },
                resolved.warnings,
            ))
        }
        Cmd::Breed {
            sire,
            dam,
            breed,
            age,
        } => {
            catalog.require(&breed)?;
            let sire = load_genotype(&sire)?;
            let dam = load_genotype(&dam)?;
            print_horse(engine.breed(&catalog, &sire, &dam, &breed, age, &mut rng))
        }
    }
}
