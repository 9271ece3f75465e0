//! Driver settings.
//!
//! Every knob has a flag, most also read an environment variable, and the
//! defaults are defined here only.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::CliError;

/// Cost given to every edge when the input carries no weights.
pub const DEFAULT_EDGE_COST: f64 = 6.0;

/// Largest node count a single test case may declare.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Which core entry point answers each (source, destination) query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
    /// `Graph::find_shortest_path`, one search per destination
    ShortestPath,
    /// `Graph::breadth_first_search`, one search per destination
    Bfs,
    /// `costs_from`, one traversal per test case
    Sweep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line of space-separated integer costs per test case
    Plain,
    /// A single JSON document with per-case reports
    Json,
}

/// hopcost - per-node traversal costs for batches of small undirected graphs
#[derive(Parser, Debug, Clone)]
#[command(name = "hopcost")]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Read test cases from this file instead of stdin
    #[arg(long, short, env = "HOPCOST_INPUT")]
    pub input: Option<PathBuf>,

    /// Cost of every edge when edges are given as `u v` pairs
    #[arg(long, env = "HOPCOST_EDGE_COST", default_value_t = DEFAULT_EDGE_COST)]
    pub edge_cost: f64,

    /// Edges are given as `u v w` triples with an explicit cost
    #[arg(long, env = "HOPCOST_WEIGHTED")]
    pub weighted: bool,

    /// Cases declaring more nodes than this fail without being built
    #[arg(long, env = "HOPCOST_MAX_NODES", default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Search routine used for each query
    #[arg(long, value_enum, env = "HOPCOST_SEARCH", default_value = "shortest-path")]
    pub search: SearchMode,

    /// Output format. Plain prints an empty line both for a failed case and
    /// for a single-node case; json reports failures in an `error` field
    #[arg(long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Log debug events for both crates
    #[arg(long, short)]
    pub verbose: bool,

    /// Explicit log filter (e.g. `debug` or `hopcost_core=trace`)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: None,
            edge_cost: DEFAULT_EDGE_COST,
            weighted: false,
            max_nodes: DEFAULT_MAX_NODES,
            search: SearchMode::ShortestPath,
            format: OutputFormat::Plain,
            verbose: false,
            log_level: None,
            log_json: false,
        }
    }
}

impl Settings {
    /// Reject settings the graph would refuse later anyway.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.edge_cost.is_finite() || self.edge_cost < 0.0 {
            return Err(CliError::Usage(format!(
                "--edge-cost must be finite and non-negative, got {}",
                self.edge_cost
            )));
        }
        Ok(())
    }
}
