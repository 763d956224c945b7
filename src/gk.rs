//! `gk` binary: runs a few demonstration circuits through the stabilizer
//! simulator and prints the sampled register counts or final stabilizer
//! groups.
//!
//! ```bash
//! gk ghz --shots 100
//! gk grover --seed 5
//! gk --returns stabilizers chain --qubits 10
//! ```

use anyhow::Result;
use clap::{ Parser, Subcommand, ValueEnum };
use gk_sim::{
    circuit::Circuit,
    shots::{ sample, Returns, ShotConfig, ShotResult },
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "gk",
    version,
    about = "Gottesman-Knill stabilizer simulation of small Clifford circuits",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Number of shots [default: 100 for counts, 1 for stabilizers].
    #[arg(long, global = true)]
    shots: Option<usize>,

    /// Base seed for the per-shot random number generators.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// What to print for each circuit.
    #[arg(long, value_enum, default_value_t = ReturnsArg::Counts, global = true)]
    returns: ReturnsArg,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare and measure a GHZ state.
    Ghz {
        #[arg(long, default_value_t = 3)]
        qubits: usize,
    },
    /// Two-qubit Grover search for ∣11⟩.
    Grover,
    /// H/CX ladder, Y on every qubit, reversed CX ladder, then H.
    Chain {
        #[arg(long, default_value_t = 4)]
        qubits: usize,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReturnsArg {
    Counts,
    Stabilizers,
}

impl From<ReturnsArg> for Returns {
    fn from(arg: ReturnsArg) -> Self {
        match arg {
            ReturnsArg::Counts => Self::Counts,
            ReturnsArg::Stabilizers => Self::Stabilizers,
        }
    }
}

fn ghz(n: usize) -> Circuit {
    let mut circuit = Circuit::new(n);
    circuit.h(0);
    (1..n).for_each(|k| { circuit.cx(0, k); });
    circuit.measure_all();
    circuit
}

fn grover() -> Circuit {
    let mut circuit = Circuit::new(2);
    circuit
        .h_all()
        .h(1).cx(0, 1).h(1)
        .h_all().x_all()
        .h(1).cx(0, 1).h(1)
        .x_all().h_all()
        .measure_all();
    circuit
}

fn chain(n: usize) -> Circuit {
    let mut circuit = Circuit::new(n);
    circuit.h_all();
    (0..n.saturating_sub(1)).for_each(|k| { circuit.cx(k, k + 1); });
    circuit.y_all();
    (0..n.saturating_sub(1)).for_each(|k| { circuit.cx(k + 1, k); });
    circuit.h_all().measure_all();
    circuit
}

fn print_result(result: &ShotResult) {
    match result {
        ShotResult::Counts(_) => {
            for (register, count) in result.sorted_counts() {
                println!("{register}: {count}");
            }
        },
        ShotResult::Stabilizers(groups) => {
            for (shot, group) in groups.iter().enumerate() {
                println!("shot {shot}:");
                println!("{group:#}");
            }
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(
            cli.log_level
                .parse::<tracing_subscriber::filter::LevelFilter>()
                .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .with_target(false)
        .init();

    let circuit
        = match cli.command {
            Commands::Ghz { qubits } => {
                anyhow::ensure!(qubits > 0, "GHZ circuit needs at least one qubit");
                ghz(qubits)
            },
            Commands::Grover => grover(),
            Commands::Chain { qubits } => chain(qubits),
        };
    debug!(circuit = %circuit, "built circuit");

    let config = ShotConfig {
        shots: cli.shots,
        seed: cli.seed,
        returns: cli.returns.into(),
    };
    let result = sample(&circuit, &config)?;
    print_result(&result);
    Ok(())
}
