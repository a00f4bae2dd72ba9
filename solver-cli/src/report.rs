//! Solve report, printed as text or JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use solver_ilp::{IlpSolution, SearchStats};

/// Outcome of one solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Status name.
    pub status: String,

    /// Status code `0..=3`.
    pub status_code: u8,

    /// Best objective; `None` when no integer solution was found.
    pub objective: Option<f64>,

    /// Best solution; zeros when no integer solution was found.
    pub solution: Vec<f64>,

    /// Search counters.
    pub stats: SearchStats,
}

impl SolveReport {
    pub fn new(sol: &IlpSolution) -> Self {
        Self {
            status: sol.status.to_string(),
            status_code: sol.status_code(),
            objective: sol.obj_val.is_finite().then_some(sol.obj_val),
            solution: sol.x.clone(),
            stats: sol.stats.clone(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let objective = match self.objective {
            Some(v) => format!("{}", v),
            None => "inf".to_string(),
        };
        let solution = self
            .solution
            .iter()
            .map(|v| format!("{}", v))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = format!(
            "Status:    {} ({})\nObjective: {}\nSolution:  [{}]\n",
            self.status, self.status_code, objective, solution
        );
        out.push_str(&format!(
            "Nodes:     {} explored, {} pruned, {} branched, max depth {}\n",
            self.stats.nodes_explored,
            self.stats.nodes_pruned,
            self.stats.nodes_branched,
            self.stats.max_depth
        ));
        if self.stats.node_limit_reached {
            out.push_str("Node limit reached\n");
        }
        out.push_str(&format!("Time:      {} ms\n", self.stats.elapsed_ms));
        out
    }

    /// Print the report, or write it to `output` if given.
    pub fn emit(&self, json: bool, output: Option<&Path>) -> Result<()> {
        let rendered = if json { self.to_json()? + "\n" } else { self.to_text() };

        match output {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display())),
            None => {
                print!("{}", rendered);
                Ok(())
            }
        }
    }
}
