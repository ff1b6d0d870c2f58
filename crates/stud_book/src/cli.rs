use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stud_book", version, about = "Horse coat genetics from the command line")]
pub struct Cli {
    /// Breed catalog (RON)
    #[arg(long, global = true, default_value = "assets/breeds.ron")]
    pub catalog: PathBuf,

    /// Engine settings (RON); built-in defaults when omitted
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Generate a new horse of a breed
    Generate {
        #[arg(long)]
        breed: String,
        #[arg(long, default_value_t = 4.0)]
        age: f64,
    },
    /// Resolve the phenotype of a stored genotype
    Resolve {
        /// Genotype file (RON)
        #[arg(long)]
        genotype: PathBuf,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        age: f64,
    },
    /// Breed a foal from two stored genotypes
    Breed {
        #[arg(long)]
        sire: PathBuf,
        #[arg(long)]
        dam: PathBuf,
        /// Breed of the foal
        #[arg(long)]
        breed: String,
        #[arg(long, default_value_t = 0.0)]
        age: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_breed_with_global_options() {
        let cli = Cli::parse_from([
            "stud_book",
            "breed",
            "--sire",
            "sire.ron",
            "--dam",
            "dam.ron",
            "--breed",
            "Appaloosa",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.catalog, PathBuf::from("assets/breeds.ron"));
        match cli.cmd {
            Cmd::Breed { breed, age, .. } => {
                assert_eq!(breed, "Appaloosa");
                assert_eq!(age, 0.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
