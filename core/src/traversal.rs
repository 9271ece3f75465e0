use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};

/// Numeric value reported for a destination that cannot be reached.
pub const UNREACHABLE: f64 = -1.0;

/// Outcome of a single-destination query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCost {
    /// Accumulated edge cost along the first-discovered path.
    Reached(f64),
    /// Destination has no edges at all; no search was run.
    NoEdges,
    /// Search exhausted the source's component without meeting the destination.
    Unreachable,
}

impl PathCost {
    /// The cost, or [`UNREACHABLE`] for both unreachable variants.
    pub fn value(self) -> f64 {
        match self {
            PathCost::Reached(cost) => cost,
            PathCost::NoEdges | PathCost::Unreachable => UNREACHABLE,
        }
    }

    pub fn cost(self) -> Option<f64> {
        match self {
            PathCost::Reached(cost) => Some(cost),
            _ => None,
        }
    }

    pub fn is_reached(self) -> bool {
        matches!(self, PathCost::Reached(_))
    }
}

/// Cost from a sweep's source to one other node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCost {
    pub node_id: NodeId,
    pub name: String,
    pub cost: PathCost,
}

/// A single step on a traced route.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub node_id: NodeId,
    pub name: String,
    /// Cost of the edge used to reach this node. None for the source.
    pub edge_cost: Option<f64>,
    /// Accumulated cost from the source up to and including this step.
    pub total_cost: f64,
}

/// Path from source to destination on the traversal tree, both endpoints included.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub steps: Vec<PathStep>,
    pub cost: f64,
}

impl Route {
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Per-traversal scratch state, indexed by `NodeId`.
///
/// Every search begins with a reset pass over all registered nodes of the
/// graph being searched, so one `Traversal` can be reused across queries
/// and across graphs without leaking state from a previous run.
///
/// The search itself is breadth-first in hop order. Edge costs are summed
/// along the way, and a node's cost is fixed the first time it is
/// discovered. The result is the true minimum cost only when every edge has
/// the same cost; with mixed costs it is the cost of the fewest-hop path
/// found first in adjacency order.
#[derive(Debug, Default)]
pub struct Traversal {
    tot_cost: Vec<Option<f64>>,
    /// Predecessor and the cost of the edge used to reach the node.
    parent: Vec<Option<(NodeId, f64)>>,
    queue: VecDeque<(NodeId, f64)>,
    source: Option<NodeId>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, graph: &Graph) {
        let n = graph.node_count();
        self.tot_cost.clear();
        self.tot_cost.resize(n, None);
        self.parent.clear();
        self.parent.resize(n, None);
        self.queue.clear();
        self.source = None;
    }

    /// Reset, then BFS from `source`. Stops as soon as `target` is dequeued.
    fn run(&mut self, graph: &Graph, source: NodeId, target: Option<NodeId>) -> Option<f64> {
        self.reset(graph);
        self.source = Some(source);
        self.tot_cost[source] = Some(0.0);
        self.queue.push_back((source, 0.0));

        while let Some((current, current_cost)) = self.queue.pop_front() {
            if Some(current) == target {
                return Some(current_cost);
            }

            for edge in graph.neighbors(current) {
                if self.tot_cost[edge.target].is_none() {
                    let cost = current_cost + edge.cost;
                    self.tot_cost[edge.target] = Some(cost);
                    self.parent[edge.target] = Some((current, edge.cost));
                    self.queue.push_back((edge.target, cost));
                }
            }
        }

        None
    }

    /// Cost from `from` to `to`.
    ///
    /// A destination without edges short-circuits to [`PathCost::NoEdges`]
    /// before anything else, including the `from == to` case.
    pub fn search(&mut self, graph: &Graph, from: &str, to: &str) -> Result<PathCost> {
        let source = resolve(graph, from)?;
        let destination = resolve(graph, to)?;

        if graph.degree(destination) == 0 {
            tracing::debug!(node = to, "destination has no edges, unreachable");
            self.source = None;
            return Ok(PathCost::NoEdges);
        }

        Ok(match self.run(graph, source, Some(destination)) {
            Some(cost) => PathCost::Reached(cost),
            None => PathCost::Unreachable,
        })
    }

    /// Traverse the whole component of `from`. Returns the source handle.
    pub fn sweep(&mut self, graph: &Graph, from: &str) -> Result<NodeId> {
        let source = resolve(graph, from)?;
        self.run(graph, source, None);
        tracing::trace!(
            source = from,
            discovered = self.tot_cost.iter().filter(|c| c.is_some()).count(),
            "sweep complete"
        );
        Ok(source)
    }

    /// Cost assigned to `node` by the last search, if it was discovered.
    pub fn cost_of(&self, node: NodeId) -> Option<f64> {
        self.source?;
        self.tot_cost.get(node).copied().flatten()
    }

    /// Predecessor of `node` on the last search's traversal tree.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.source?;
        self.parent.get(node).copied().flatten().map(|(p, _)| p)
    }

    /// Walk parent links from `target` back to the last search's source.
    pub fn route_to(&self, graph: &Graph, target: NodeId) -> Option<Route> {
        let source = self.source?;
        let cost = self.cost_of(target)?;

        let mut steps = Vec::new();
        let mut current = target;
        loop {
            let total_cost = self.tot_cost[current]?;
            let parent = self.parent[current];
            let edge_cost = parent.map(|(_, cost)| cost);

            steps.push(PathStep {
                node_id: current,
                name: graph.name(current).to_string(),
                edge_cost,
                total_cost,
            });

            if current == source {
                break;
            }
            current = parent?.0;
        }

        steps.reverse();
        Some(Route { steps, cost })
    }
}

fn resolve(graph: &Graph, name: &str) -> Result<NodeId> {
    graph.resolve(name).ok_or_else(|| GraphError::not_found(name))
}

/// Breadth-first search from `from` to `to`, accumulating edge cost.
pub fn breadth_first_search(graph: &Graph, from: &str, to: &str) -> Result<PathCost> {
    Traversal::new().search(graph, from, to)
}

/// Cost of the first path found from `from` to `to`.
///
/// Same hop-order traversal as [`breadth_first_search`]. It is the
/// minimum-cost path only when all edges carry equal cost.
pub fn find_shortest_path(graph: &Graph, from: &str, to: &str) -> Result<PathCost> {
    Traversal::new().search(graph, from, to)
}

/// Costs from `source` to every other node, in registration order.
///
/// One traversal serves every destination. Each entry matches what
/// [`find_shortest_path`] returns for that destination, since a node's cost
/// is fixed at discovery regardless of where a search stops.
pub fn costs_from(graph: &Graph, source: &str) -> Result<Vec<NodeCost>> {
    let mut traversal = Traversal::new();
    let source_id = traversal.sweep(graph, source)?;

    let costs = graph
        .nodes_iter()
        .filter(|&(id, _)| id != source_id)
        .map(|(id, node)| {
            let cost = if node.adj.is_empty() {
                PathCost::NoEdges
            } else {
                match traversal.cost_of(id) {
                    Some(cost) => PathCost::Reached(cost),
                    None => PathCost::Unreachable,
                }
            };
            NodeCost {
                node_id: id,
                name: node.name.clone(),
                cost,
            }
        })
        .collect();

    Ok(costs)
}

/// Traversal-tree route from `from` to `to`. None if unreachable.
pub fn trace_path(graph: &Graph, from: &str, to: &str) -> Result<Option<Route>> {
    let mut traversal = Traversal::new();
    match traversal.search(graph, from, to)? {
        PathCost::Reached(_) => Ok(resolve(graph, to)
            .ok()
            .and_then(|destination| traversal.route_to(graph, destination))),
        PathCost::NoEdges | PathCost::Unreachable => Ok(None),
    }
}

impl Graph {
    /// See [`find_shortest_path`].
    pub fn find_shortest_path(&self, from: &str, to: &str) -> Result<PathCost> {
        find_shortest_path(self, from, to)
    }

    /// See [`breadth_first_search`].
    pub fn breadth_first_search(&self, from: &str, to: &str) -> Result<PathCost> {
        breadth_first_search(self, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nodes "1".."=n", edges at the given cost.
    fn numbered(n: usize, edges: &[(usize, usize, f64)]) -> Graph {
        let mut g = Graph::new();
        for i in 1..=n {
            g.add_node(i.to_string()).unwrap();
        }
        for &(from, to, cost) in edges {
            g.add_edge(&from.to_string(), &to.to_string(), cost).unwrap();
        }
        g
    }

    fn make_chain(n: usize, cost: f64) -> Graph {
        let edges: Vec<_> = (1..n).map(|i| (i, i + 1, cost)).collect();
        numbered(n, &edges)
    }

    fn make_cycle(n: usize, cost: f64) -> Graph {
        let edges: Vec<_> = (1..=n).map(|i| (i, i % n + 1, cost)).collect();
        numbered(n, &edges)
    }

    // --- Single-destination search ---

    #[test]
    fn test_chain_costs() {
        let g = make_chain(4, 6.0);
        assert_eq!(g.find_shortest_path("1", "2").unwrap(), PathCost::Reached(6.0));
        assert_eq!(g.find_shortest_path("1", "3").unwrap(), PathCost::Reached(12.0));
        assert_eq!(g.find_shortest_path("1", "4").unwrap(), PathCost::Reached(18.0));
    }

    #[test]
    fn test_destination_without_edges() {
        let g = numbered(3, &[(1, 2, 6.0)]);
        assert_eq!(g.find_shortest_path("1", "2").unwrap().value(), 6.0);
        let cost = g.find_shortest_path("1", "3").unwrap();
        assert_eq!(cost, PathCost::NoEdges);
        assert_eq!(cost.value(), -1.0);
    }

    #[test]
    fn test_disjoint_components() {
        let g = numbered(4, &[(1, 2, 6.0), (3, 4, 6.0)]);
        assert_eq!(g.find_shortest_path("1", "2").unwrap().value(), 6.0);
        let cost = g.find_shortest_path("1", "4").unwrap();
        assert_eq!(cost, PathCost::Unreachable);
        assert_eq!(cost.value(), -1.0);
    }

    #[test]
    fn test_source_equals_destination() {
        let g = make_chain(3, 6.0);
        assert_eq!(g.find_shortest_path("2", "2").unwrap(), PathCost::Reached(0.0));
        assert_eq!(g.breadth_first_search("2", "2").unwrap(), PathCost::Reached(0.0));
    }

    #[test]
    fn test_isolated_source_equals_destination() {
        // The no-edges check runs before anything else
        let g = numbered(2, &[]);
        assert_eq!(g.find_shortest_path("1", "1").unwrap(), PathCost::NoEdges);
    }

    #[test]
    fn test_isolated_source_to_connected_destination() {
        let g = numbered(3, &[(2, 3, 6.0)]);
        assert_eq!(g.find_shortest_path("1", "3").unwrap(), PathCost::Unreachable);
    }

    #[test]
    fn test_bfs_and_shortest_path_agree() {
        let g = numbered(
            6,
            &[(1, 2, 6.0), (1, 3, 2.0), (3, 4, 6.0), (2, 4, 1.0), (4, 5, 3.0)],
        );
        for to in 1..=6 {
            let to = to.to_string();
            assert_eq!(
                g.breadth_first_search("1", &to).unwrap(),
                g.find_shortest_path("1", &to).unwrap()
            );
        }
    }

    #[test]
    fn test_hop_order_not_weighted_minimum() {
        // Direct edge costs 10, the two-hop detour costs 2: hop order wins.
        let g = numbered(3, &[(1, 2, 1.0), (2, 3, 1.0), (1, 3, 10.0)]);
        assert_eq!(g.find_shortest_path("1", "3").unwrap(), PathCost::Reached(10.0));
    }

    #[test]
    fn test_sibling_order_follows_edge_insertion() {
        // Two 2-hop routes to 4; the one through the first-inserted edge is found.
        let g = numbered(4, &[(1, 2, 1.0), (1, 3, 5.0), (2, 4, 1.0), (3, 4, 1.0)]);
        assert_eq!(g.find_shortest_path("1", "4").unwrap(), PathCost::Reached(2.0));

        let g = numbered(4, &[(1, 3, 5.0), (1, 2, 1.0), (2, 4, 1.0), (3, 4, 1.0)]);
        assert_eq!(g.find_shortest_path("1", "4").unwrap(), PathCost::Reached(6.0));
    }

    #[test]
    fn test_parallel_edges_first_inserted_cost_used() {
        let g = numbered(2, &[(1, 2, 6.0), (1, 2, 2.0)]);
        assert_eq!(g.find_shortest_path("1", "2").unwrap(), PathCost::Reached(6.0));
    }

    #[test]
    fn test_zero_cost_edges() {
        let g = make_chain(3, 0.0);
        assert_eq!(g.find_shortest_path("1", "3").unwrap(), PathCost::Reached(0.0));
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let g = make_cycle(6, 6.0);
        assert_eq!(g.find_shortest_path("1", "4").unwrap(), PathCost::Reached(18.0));
        assert_eq!(g.find_shortest_path("1", "6").unwrap(), PathCost::Reached(6.0));
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut g = make_chain(2, 6.0);
        g.add_edge("1", "1", 1.0).unwrap();
        assert_eq!(g.find_shortest_path("1", "2").unwrap(), PathCost::Reached(6.0));
        assert_eq!(g.find_shortest_path("1", "1").unwrap(), PathCost::Reached(0.0));
    }

    #[test]
    fn test_unknown_names() {
        let g = make_chain(3, 6.0);
        assert_eq!(
            g.find_shortest_path("1", "99").unwrap_err(),
            GraphError::NodeNotFound { name: "99".into() }
        );
        assert_eq!(
            g.breadth_first_search("99", "1").unwrap_err(),
            GraphError::NodeNotFound { name: "99".into() }
        );
    }

    #[test]
    fn test_non_numeric_names() {
        let mut g = Graph::new();
        for name in ["home", "work", "gym"] {
            g.add_node(name).unwrap();
        }
        g.add_edge("home", "work", 4.0).unwrap();
        g.add_edge("work", "gym", 2.5).unwrap();
        assert_eq!(g.find_shortest_path("home", "gym").unwrap(), PathCost::Reached(6.5));
    }

    // --- Reset protocol ---

    #[test]
    fn test_repeated_query_is_idempotent() {
        let g = numbered(5, &[(1, 2, 6.0), (2, 3, 6.0), (4, 5, 6.0)]);
        let first = g.find_shortest_path("1", "3").unwrap();
        let second = g.find_shortest_path("1", "3").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, PathCost::Reached(12.0));
    }

    #[test]
    fn test_reused_traversal_resets_between_queries() {
        let g = numbered(5, &[(1, 2, 6.0), (2, 3, 6.0), (4, 5, 6.0)]);
        let mut t = Traversal::new();

        assert_eq!(t.search(&g, "1", "3").unwrap(), PathCost::Reached(12.0));
        assert_eq!(t.search(&g, "3", "1").unwrap(), PathCost::Reached(12.0));
        assert_eq!(t.search(&g, "4", "5").unwrap(), PathCost::Reached(6.0));
        // Nodes discovered by earlier runs must not leak into this one
        assert_eq!(t.search(&g, "4", "2").unwrap(), PathCost::Unreachable);
        assert_eq!(t.search(&g, "1", "3").unwrap(), PathCost::Reached(12.0));
    }

    #[test]
    fn test_traversal_reused_across_graphs() {
        let small = make_chain(2, 1.0);
        let large = make_chain(8, 1.0);
        let mut t = Traversal::new();

        assert_eq!(t.search(&large, "1", "8").unwrap(), PathCost::Reached(7.0));
        assert_eq!(t.search(&small, "1", "2").unwrap(), PathCost::Reached(1.0));
        assert_eq!(t.search(&large, "8", "1").unwrap(), PathCost::Reached(7.0));
    }

    #[test]
    fn test_early_exit_clears_previous_state() {
        let g = numbered(3, &[(1, 2, 6.0)]);
        let mut t = Traversal::new();
        t.search(&g, "1", "2").unwrap();
        assert_eq!(t.cost_of(1), Some(6.0));

        assert_eq!(t.search(&g, "1", "3").unwrap(), PathCost::NoEdges);
        assert_eq!(t.cost_of(1), None);
        assert!(t.route_to(&g, 1).is_none());
    }

    #[test]
    fn test_parent_links() {
        let g = make_chain(3, 6.0);
        let mut t = Traversal::new();
        t.sweep(&g, "1").unwrap();
        assert_eq!(t.parent_of(0), None);
        assert_eq!(t.parent_of(1), Some(0));
        assert_eq!(t.parent_of(2), Some(1));
    }

    // --- Sweeps ---

    #[test]
    fn test_costs_from_chain() {
        let g = make_chain(4, 6.0);
        let costs = costs_from(&g, "1").unwrap();
        let values: Vec<f64> = costs.iter().map(|c| c.cost.value()).collect();
        assert_eq!(values, vec![6.0, 12.0, 18.0]);
        let names: Vec<&str> = costs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_costs_from_skips_source_only() {
        let g = make_chain(4, 6.0);
        let costs = costs_from(&g, "3").unwrap();
        let names: Vec<&str> = costs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2", "4"]);
        let values: Vec<f64> = costs.iter().map(|c| c.cost.value()).collect();
        assert_eq!(values, vec![12.0, 6.0, 6.0]);
    }

    #[test]
    fn test_costs_from_matches_single_queries() {
        let g = numbered(
            9,
            &[
                (1, 2, 6.0),
                (1, 3, 2.0),
                (3, 4, 6.0),
                (2, 4, 1.0),
                (4, 5, 3.0),
                (6, 7, 6.0),
                (5, 5, 1.0),
                (2, 3, 4.0),
            ],
        );
        for source in 1..=9 {
            let source = source.to_string();
            for entry in costs_from(&g, &source).unwrap() {
                assert_eq!(
                    entry.cost,
                    g.find_shortest_path(&source, &entry.name).unwrap(),
                    "{} -> {}",
                    source,
                    entry.name
                );
            }
        }
    }

    #[test]
    fn test_costs_from_unknown_source() {
        let g = make_chain(2, 6.0);
        assert!(matches!(
            costs_from(&g, "0"),
            Err(GraphError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_costs_from_single_node() {
        let g = numbered(1, &[]);
        assert!(costs_from(&g, "1").unwrap().is_empty());
    }

    // --- Routes ---

    #[test]
    fn test_trace_path_chain() {
        let g = make_chain(4, 6.0);
        let route = trace_path(&g, "1", "4").unwrap().unwrap();
        assert_eq!(route.hops(), 3);
        assert_eq!(route.cost, 18.0);
        let names: Vec<&str> = route.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2", "3", "4"]);
        assert_eq!(route.steps[0].edge_cost, None);
        assert_eq!(route.steps[0].total_cost, 0.0);
        assert_eq!(route.steps[2].edge_cost, Some(6.0));
        assert_eq!(route.steps[2].total_cost, 12.0);
    }

    #[test]
    fn test_trace_path_mixed_costs() {
        let g = numbered(3, &[(1, 2, 2.5), (2, 3, 4.0)]);
        let route = trace_path(&g, "3", "1").unwrap().unwrap();
        let edge_costs: Vec<Option<f64>> = route.steps.iter().map(|s| s.edge_cost).collect();
        assert_eq!(edge_costs, vec![None, Some(4.0), Some(2.5)]);
        assert_eq!(route.cost, 6.5);
    }

    #[test]
    fn test_trace_path_reports_traversed_edge_costs() {
        let mut g = Graph::new();
        for name in ["a", "b", "c"] {
            g.add_node(name).unwrap();
        }
        g.add_edge("a", "b", 0.1).unwrap();
        g.add_edge("b", "c", 0.2).unwrap();

        let route = trace_path(&g, "a", "c").unwrap().unwrap();
        let edge_costs: Vec<Option<f64>> = route.steps.iter().map(|s| s.edge_cost).collect();
        assert_eq!(edge_costs, vec![None, Some(0.1), Some(0.2)]);
        assert_eq!(route.cost, 0.1 + 0.2);
    }

    #[test]
    fn test_trace_path_parallel_edge_uses_first_inserted() {
        let g = numbered(2, &[(1, 2, 6.0), (1, 2, 2.0)]);
        let route = trace_path(&g, "1", "2").unwrap().unwrap();
        assert_eq!(route.steps[1].edge_cost, Some(6.0));
    }

    #[test]
    fn test_trace_path_self() {
        let g = make_chain(2, 6.0);
        let route = trace_path(&g, "2", "2").unwrap().unwrap();
        assert_eq!(route.hops(), 0);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_trace_path_unreachable() {
        let g = numbered(5, &[(1, 2, 6.0), (3, 4, 6.0)]);
        assert!(trace_path(&g, "1", "4").unwrap().is_none());
        assert!(trace_path(&g, "1", "5").unwrap().is_none());
    }

    #[test]
    fn test_route_to_undiscovered_node() {
        let g = numbered(4, &[(1, 2, 6.0), (3, 4, 6.0)]);
        let mut t = Traversal::new();
        t.sweep(&g, "1").unwrap();
        assert!(t.route_to(&g, 3).is_none());
        assert!(t.route_to(&g, 99).is_none());
    }

    #[test]
    fn test_path_cost_accessors() {
        assert_eq!(PathCost::Reached(3.0).cost(), Some(3.0));
        assert!(PathCost::Reached(3.0).is_reached());
        assert_eq!(PathCost::NoEdges.cost(), None);
        assert_eq!(PathCost::Unreachable.value(), UNREACHABLE);
        assert!(!PathCost::Unreachable.is_reached());
    }
}
