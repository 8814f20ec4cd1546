use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;

use finite_lattice::lattice::{Lattice, sort_neighbor_table};
use finite_lattice::lattice_config::{JobConfig, load_config};

#[derive(Parser)]
#[command(name = "finite-lattice")]
#[command(about = "Finite periodic lattices: site indexing, neighbor tables and k-point meshes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the size of the lattice described by a job file
    Summary {
        /// Job configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the neighbor table of all configured bonds as JSON
    Neighbors {
        /// Job configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Canonicalize and sort the table, also printing the permutation
        #[arg(short, long)]
        sort: bool,
    },
    /// Print the Monkhorst–Pack k-point mesh as JSON
    Kpoints {
        /// Job configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Summarize the translational-equivalence classes of site pairs
    EquivalentSets {
        /// Job configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to set thread pool size")?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    info!("Starting finite-lattice v{}", finite_lattice::VERSION);

    match cli.command {
        Commands::Summary { config } => {
            let (_, lattice) = load_lattice(&config)?;
            print_summary(&lattice);
            Ok(())
        }
        Commands::Neighbors { config, sort } => {
            let (job, lattice) = load_lattice(&config)?;
            if job.bonds.is_empty() {
                warn!("No bonds configured in {}", config.display());
            }
            let mut table = lattice.calc_bond_neighbor_table(&job.bonds)?;
            let permutation = sort.then(|| sort_neighbor_table(&mut table));
            print_json(&NeighborOutput {
                pairs: table.pairs(),
                permutation,
            })
        }
        Commands::Kpoints { config } => {
            let (_, lattice) = load_lattice(&config)?;
            let kpoints: Vec<[f64; 3]> = lattice.kpoints().iter().map(|k| [k.x, k.y, k.z]).collect();
            print_json(&kpoints)
        }
        Commands::EquivalentSets { config } => {
            let (_, lattice) = load_lattice(&config)?;
            let sets = lattice.translationally_equivalent_sets()?;
            println!("Translational classes: {}", sets.len());
            println!("Pairs per class:       {}", lattice.ncells());
            for class in sets.iter().filter(|c| c.key.displacement == [0, 0, 0]) {
                println!(
                    "  orbitals ({}, {}) on-cell: {} pairs",
                    class.key.orbit1,
                    class.key.orbit2,
                    class.pairs.len()
                );
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct NeighborOutput<'a> {
    pairs: &'a [[usize; 2]],
    #[serde(skip_serializing_if = "Option::is_none")]
    permutation: Option<Vec<usize>>,
}

fn load_lattice(path: &Path) -> anyhow::Result<(JobConfig, Lattice)> {
    info!("Loading job configuration from {}", path.display());
    let job = load_config(path)?;
    let lattice = job
        .build_lattice()
        .with_context(|| format!("Invalid lattice in {}", path.display()))?;
    Ok((job, lattice))
}

fn print_summary(lattice: &Lattice) {
    let [l1, l2, l3] = lattice.dims();
    println!("Dimensions:    {}", lattice.ndim());
    println!("Orbitals:      {}", lattice.norbits());
    println!("Extent:        {} x {} x {}", l1, l2, l3);
    println!("Cells:         {}", lattice.ncells());
    println!("Sites:         {}", lattice.nsites());
    println!("Cell volume:   {:.6}", lattice.geometry().cell_volume());
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
