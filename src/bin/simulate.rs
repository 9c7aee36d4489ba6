use std::path::PathBuf;

use clap::Parser;

use lunch_picker_rs::catalog::{Catalog, load_catalog};
use lunch_picker_rs::cli::FilterArgs;
use lunch_picker_rs::engine::DEFAULT_TICK_COUNT;
use lunch_picker_rs::simulate::{SimulationConfig, print_report, run_simulation, write_csv};

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Run many spins offline and report how often each item wins")]
struct Args {
    /// Number of spins to run
    #[arg(long, default_value = "1000")]
    spins: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Cosmetic draws per spin
    #[arg(long, default_value_t = DEFAULT_TICK_COUNT)]
    ticks: u32,

    /// Path to a catalog JSON file (built-in catalog when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(flatten)]
    filters: FilterArgs,

    /// Output CSV file for the distribution
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error loading catalog {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };

    println!("Loaded {} items", catalog.len());

    let preferences = match args.filters.to_preferences(&catalog) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = SimulationConfig {
        spins: args.spins,
        seed: args.seed,
        tick_count: args.ticks,
        preferences,
        crowd: args.filters.crowd,
    };

    let report = match run_simulation(&catalog, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_report(&report);

    if let Some(path) = &args.csv {
        if let Err(e) = write_csv(&report, path) {
            eprintln!("Error writing CSV: {}", e);
        } else {
            println!("Wrote distribution to {:?}", path);
        }
    }
}
