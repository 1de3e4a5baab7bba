//! QNS CLI
//!
//! Generates QUEKNO-style synthetic routing-benchmark circuits: build a
//! single circuit from explicit parameters, or sweep a parameter grid the
//! way the original benchmark suite does.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use qns_core::archgraphs::graph_from_name;
use qns_core::config::{BuilderConfig, OptType, RuntimeConstants};
use qns_cli::sweep::SweepGrid;
use qns_rewire::QueknoBuilder;

#[derive(Parser)]
#[command(name = "qns")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single routing-benchmark circuit
    Build {
        /// Architecture graph name (tokyo, rochester, grid:RxC, line:N, ring:N, star:N)
        #[arg(short, long, default_value = "tokyo")]
        archgraph: String,

        /// Permutation-source regime
        #[arg(short, long, value_enum, default_value = "opt1")]
        opt_type: OptTypeArg,

        /// Target routing cost
        #[arg(short, long, default_value = "5")]
        target_cost: usize,

        /// Mean subgraph edge count
        #[arg(short, long, default_value = "5")]
        subgraph_size: usize,

        /// One-qubit/two-qubit gate ratio
        #[arg(short, long, default_value = "1.5")]
        qbg_ratio: f64,

        /// Add barrier markers between glinks
        #[arg(long)]
        add_barriers: bool,

        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Write the circuit as OpenQASM 2.0 to this path
        #[arg(long)]
        qasm_out: Option<PathBuf>,

        /// Write build metrics as JSON to this path (stdout if omitted)
        #[arg(long)]
        metrics_out: Option<PathBuf>,
    },

    /// Sweep a parameter grid, mirroring the reference benchmark suite
    Sweep {
        /// Architecture graph name
        #[arg(short, long, default_value = "tokyo")]
        archgraph: String,

        /// "gate" sweeps opt1/opt2 over gate-count targets; "depth" sweeps
        /// the depth regime over depth targets
        #[arg(short, long, default_value = "gate")]
        objective: String,

        /// Repeats per parameter combination
        #[arg(short, long, default_value = "10")]
        repeats: usize,

        /// Add barrier markers between glinks
        #[arg(long)]
        add_barriers: bool,

        /// Base RNG seed; each grid point derives its own seed from this
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Directory to write one .qasm and one .json per circuit into
        #[arg(short, long)]
        out_dir: PathBuf,
    },

    /// Show supported architecture graphs and opt types
    Info,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OptTypeArg {
    Opt1,
    Opt2,
    Depth,
}

impl From<OptTypeArg> for OptType {
    fn from(value: OptTypeArg) -> Self {
        match value {
            OptTypeArg::Opt1 => OptType::Opt1,
            OptTypeArg::Opt2 => OptType::Opt2,
            OptTypeArg::Depth => OptType::Depth,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    match cli.command {
        Commands::Build {
            archgraph,
            opt_type,
            target_cost,
            subgraph_size,
            qbg_ratio,
            add_barriers,
            seed,
            qasm_out,
            metrics_out,
        } => cmd_build(
            &archgraph,
            opt_type.into(),
            target_cost,
            subgraph_size,
            qbg_ratio,
            add_barriers,
            seed,
            qasm_out,
            metrics_out,
        ),
        Commands::Sweep {
            archgraph,
            objective,
            repeats,
            add_barriers,
            seed,
            out_dir,
        } => cmd_sweep(&archgraph, &objective, repeats, add_barriers, seed, &out_dir),
        Commands::Info => cmd_info(),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_build(
    archgraph_name: &str,
    opt_type: OptType,
    target_cost: usize,
    subgraph_size: usize,
    qbg_ratio: f64,
    add_barriers: bool,
    seed: u64,
    qasm_out: Option<PathBuf>,
    metrics_out: Option<PathBuf>,
) -> Result<()> {
    let start = Instant::now();
    let archgraph = graph_from_name(archgraph_name).with_context(|| format!("unknown architecture graph '{archgraph_name}'"))?;

    let mut config = BuilderConfig::new(opt_type, target_cost, archgraph, subgraph_size, qbg_ratio);
    config.add_barriers = add_barriers;

    let mut rng = StdRng::seed_from_u64(seed);
    let output = QueknoBuilder::new(&config).run(&mut rng).with_context(|| "build failed")?;

    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "build finished");

    if let Some(path) = qasm_out {
        let qasm = qns_qasm::to_qasm2(&output.circuit).with_context(|| "QASM export failed")?;
        fs::write(&path, qasm).with_context(|| format!("failed to write {}", path.display()))?;
    }

    let metrics_json = output.metrics.to_json().with_context(|| "metrics serialization failed")?;
    match metrics_out {
        Some(path) => fs::write(&path, &metrics_json).with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{metrics_json}"),
    }

    Ok(())
}

fn cmd_sweep(archgraph_name: &str, objective: &str, repeats: usize, add_barriers: bool, seed: u64, out_dir: &PathBuf) -> Result<()> {
    let archgraph = graph_from_name(archgraph_name).with_context(|| format!("unknown architecture graph '{archgraph_name}'"))?;

    let grid = match objective {
        "gate" => SweepGrid {
            opt_types: vec![OptType::Opt1, OptType::Opt2],
            target_costs: vec![0, 1, 2, 3, 4, 5, 10, 15, 20, 25],
            qbg_ratios: vec![1.5],
            subgraph_sizes: vec![5, 8, 16],
            repeats,
        },
        "depth" => SweepGrid {
            opt_types: vec![OptType::Depth],
            target_costs: vec![1, 2, 3, 4, 5, 10],
            qbg_ratios: vec![1.5, 2.55],
            subgraph_sizes: vec![5, 8, 16],
            repeats,
        },
        other => anyhow::bail!("objective must be 'gate' or 'depth', got '{other}'"),
    };

    info!(num_circuits = grid.len(), "starting sweep");
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let start = Instant::now();
    let results = qns_cli::sweep::run_sweep(&archgraph, &grid, add_barriers, seed);

    let mut failures = 0usize;
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(sweep_result) => {
                let name = format!(
                    "{archgraph_name}_{objective}_{:?}_{}_{}_no{}",
                    sweep_result.point.opt_type, sweep_result.point.target_cost, sweep_result.point.subgraph_size, sweep_result.point.repeat
                );
                let qasm = qns_qasm::to_qasm2(&sweep_result.output.circuit)?;
                fs::write(out_dir.join(format!("{name}.qasm")), qasm)?;
                let metrics_json = sweep_result.output.metrics.to_json()?;
                fs::write(out_dir.join(format!("{name}.json")), metrics_json)?;
            },
            Err(err) => {
                failures += 1;
                tracing::warn!(index, %err, "sweep point failed");
            },
        }
    }

    info!(
        elapsed_s = start.elapsed().as_secs_f64(),
        failures, "sweep finished"
    );
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("qns {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Architecture graphs: tokyo, rochester, grid:RxC, line:N, ring:N, star:N");
    println!("Opt types: opt1 (single swap), opt2 (1-2 consecutive swaps), depth (parallel layers)");
    println!();
    let constants = RuntimeConstants::default();
    println!("Default runtime constants: {constants:?}");
    Ok(())
}
