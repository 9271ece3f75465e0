//! hopcost-core: In-memory undirected graph with cost-accumulating BFS.
//!
//! Nodes are registered by unique name and own their adjacency lists.
//! Searches run breadth-first in hop order and sum edge costs along the
//! first path that reaches each node, so results are minimal-cost only
//! for uniformly weighted graphs.
//!
//! Used by the `hopcost` batch driver and the benchmark binary.

mod error;
mod graph;
mod traversal;

pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, Node, NodeId};
pub use traversal::{
    breadth_first_search, costs_from, find_shortest_path, trace_path, NodeCost, PathCost,
    PathStep, Route, Traversal, UNREACHABLE,
};
