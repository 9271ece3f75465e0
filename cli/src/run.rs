use std::time::Instant;

use hopcost_core::{costs_from, Graph, GraphError, PathCost};
use serde::Serialize;

use crate::config::{SearchMode, Settings};
use crate::input::TestCase;

/// Cost from the case's source to one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEntry {
    pub node: String,
    /// Accumulated cost, or -1 when unreachable.
    pub cost: f64,
    pub reachable: bool,
}

impl CostEntry {
    fn new(node: String, cost: PathCost) -> Self {
        Self {
            node,
            cost: cost.value(),
            reachable: cost.is_reached(),
        }
    }
}

/// Build-phase counters for one case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub nodes: usize,
    pub edges: usize,
    pub duplicate_edges: usize,
    pub rejected_edges: usize,
}

/// Result of one test case. A case that fails carries `error` and no costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub case: usize,
    pub source: String,
    pub costs: Vec<CostEntry>,
    pub build: BuildStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the graph for one case. Duplicates and edges naming unknown nodes
/// are logged and skipped.
pub fn build_graph(case: &TestCase) -> (Graph, BuildStats) {
    let mut graph = Graph::with_capacity(case.node_count, case.edges.len());
    let mut stats = BuildStats::default();

    for name in case.node_names() {
        if let Err(e) = graph.add_node(name) {
            tracing::warn!(case = case.index, "{}", e);
        }
    }

    for edge in &case.edges {
        match graph.add_edge(&edge.from, &edge.to, edge.cost) {
            Ok(()) => {}
            Err(e @ GraphError::DuplicateEdge { .. }) => {
                stats.duplicate_edges += 1;
                tracing::warn!(case = case.index, "discarding {}", e);
            }
            Err(e) => {
                stats.rejected_edges += 1;
                tracing::warn!(case = case.index, "skipping edge: {}", e);
            }
        }
    }

    stats.nodes = graph.node_count();
    stats.edges = graph.edge_count();
    (graph, stats)
}

/// Costs from the source to every other node, in node order.
pub fn query_costs(
    graph: &Graph,
    source: &str,
    mode: SearchMode,
) -> Result<Vec<CostEntry>, GraphError> {
    if mode == SearchMode::Sweep {
        return Ok(costs_from(graph, source)?
            .into_iter()
            .map(|nc| CostEntry::new(nc.name, nc.cost))
            .collect());
    }

    // Resolve up front so an unknown source fails even on single-node graphs.
    let source_id = graph
        .resolve(source)
        .ok_or_else(|| GraphError::NodeNotFound {
            name: source.to_string(),
        })?;

    graph
        .nodes_iter()
        .filter(|&(id, _)| id != source_id)
        .map(|(_, node)| -> Result<CostEntry, GraphError> {
            let cost = match mode {
                SearchMode::Bfs => graph.breadth_first_search(source, &node.name)?,
                SearchMode::ShortestPath | SearchMode::Sweep => {
                    graph.find_shortest_path(source, &node.name)?
                }
            };
            Ok(CostEntry::new(node.name.clone(), cost))
        })
        .collect()
}

/// Build and query one case. Failures stay inside the report.
pub fn run_case(case: &TestCase, settings: &Settings) -> CaseReport {
    if case.node_count > settings.max_nodes {
        let reason = format!(
            "node count {} exceeds --max-nodes {}",
            case.node_count, settings.max_nodes
        );
        tracing::error!(case = case.index, "test case failed: {}", reason);
        return CaseReport {
            case: case.index,
            source: case.source.clone(),
            costs: Vec::new(),
            build: BuildStats::default(),
            error: Some(reason),
        };
    }

    let start = Instant::now();
    let (graph, build) = build_graph(case);

    let (costs, error) = match query_costs(&graph, &case.source, settings.search) {
        Ok(costs) => (costs, None),
        Err(e) => {
            tracing::error!(case = case.index, "test case failed: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    tracing::debug!(
        case = case.index,
        nodes = build.nodes,
        edges = build.edges,
        elapsed = ?start.elapsed(),
        "case complete"
    );

    CaseReport {
        case: case.index,
        source: case.source.clone(),
        costs,
        build,
        error,
    }
}
