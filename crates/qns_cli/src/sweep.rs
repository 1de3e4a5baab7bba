//! Parameter-grid sweeps over the routing-benchmark builder.
//!
//! Grounded on `original_source/main.py`'s `it.product(subgraph_sizes,
//! opt_types, target_costs, qbg_ratios, range(10))` parameter grid: this
//! module owns the grid enumeration, `main.rs` owns naming and export.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use qns_core::config::{BuilderConfig, OptType};
use qns_core::error::Result;
use qns_core::types::Graph;
use qns_rewire::{BuildOutput, QueknoBuilder};

/// One point in a parameter-grid sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    pub opt_type: OptType,
    pub target_cost: usize,
    pub qbg_ratio: f64,
    pub subgraph_size: usize,
    /// Which repeat (0-based) of this parameter combination this is.
    pub repeat: usize,
}

/// The axes of a parameter-grid sweep. Each field is the list of values to
/// cross; `repeats` controls how many independently-seeded circuits are
/// generated per combination.
#[derive(Debug, Clone)]
pub struct SweepGrid {
    pub opt_types: Vec<OptType>,
    pub target_costs: Vec<usize>,
    pub qbg_ratios: Vec<f64>,
    pub subgraph_sizes: Vec<usize>,
    pub repeats: usize,
}

impl SweepGrid {
    /// Enumerates every point in the Cartesian product of the grid's axes.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        self.subgraph_sizes.iter().flat_map(move |&subgraph_size| {
            self.opt_types.iter().flat_map(move |&opt_type| {
                self.target_costs.iter().flat_map(move |&target_cost| {
                    self.qbg_ratios.iter().flat_map(move |&qbg_ratio| {
                        (0..self.repeats).map(move |repeat| SweepPoint {
                            opt_type,
                            target_cost,
                            qbg_ratio,
                            subgraph_size,
                            repeat,
                        })
                    })
                })
            })
        })
    }

    /// Total number of circuits this grid will produce.
    pub fn len(&self) -> usize {
        self.opt_types.len() * self.target_costs.len() * self.qbg_ratios.len() * self.subgraph_sizes.len() * self.repeats
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One completed sweep run: the point that produced it and its build
/// output, seeded deterministically from `(seed, index)` so a sweep is
/// reproducible end to end.
pub struct SweepResult {
    pub point: SweepPoint,
    pub output: BuildOutput,
}

/// Runs every point of `grid` against `archgraph`, in parallel, each seeded
/// deterministically from `base_seed` and the point's position in the
/// enumeration order.
pub fn run_sweep(archgraph: &Graph, grid: &SweepGrid, add_barriers: bool, base_seed: u64) -> Vec<Result<SweepResult>> {
    let points: Vec<SweepPoint> = grid.points().collect();

    points
        .into_par_iter()
        .enumerate()
        .map(|(index, point)| {
            let config = BuilderConfig {
                opt_type: point.opt_type,
                target_cost: point.target_cost,
                archgraph: archgraph.clone(),
                subgraph_size: point.subgraph_size,
                qbg_ratio: point.qbg_ratio,
                add_barriers,
                constants: Default::default(),
            };
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
            let output = QueknoBuilder::new(&config).run(&mut rng)?;
            Ok(SweepResult { point, output })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qns_core::archgraphs;
    use qns_core::config::subgraph_size;

    fn small_grid() -> SweepGrid {
        SweepGrid {
            opt_types: vec![OptType::Opt1, OptType::Opt2],
            target_costs: vec![1, 2],
            qbg_ratios: vec![1.5],
            subgraph_sizes: vec![subgraph_size::SMALL.min(4)],
            repeats: 1,
        }
    }

    #[test]
    fn test_points_len_matches_len() {
        let grid = small_grid();
        assert_eq!(grid.points().count(), grid.len());
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_run_sweep_produces_one_result_per_point() {
        let archgraph = archgraphs::grid(3, 3);
        let grid = small_grid();
        let results = run_sweep(&archgraph, &grid, true, 7);
        assert_eq!(results.len(), grid.len());
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_run_sweep_is_reproducible() {
        let archgraph = archgraphs::grid(3, 3);
        let grid = small_grid();
        let a = run_sweep(&archgraph, &grid, false, 42);
        let b = run_sweep(&archgraph, &grid, false, 42);
        let costs_a: Vec<usize> = a.iter().map(|r| r.as_ref().unwrap().output.metrics.predicted_cost).collect();
        let costs_b: Vec<usize> = b.iter().map(|r| r.as_ref().unwrap().output.metrics.predicted_cost).collect();
        assert_eq!(costs_a, costs_b);
    }
}
