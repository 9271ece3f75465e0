use std::collections::HashMap;

use crate::error::{GraphError, Result};

/// Handle into a graph's node arena. Only valid for the graph that issued it.
pub type NodeId = usize;

/// An undirected edge as seen from one endpoint's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub cost: f64,
    pub target: NodeId,
}

/// A named vertex and its adjacency list, in edge insertion order.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub adj: Vec<Edge>,
}

/// Upper bound on the adjacency capacity reserved for each new node.
pub const MAX_ADJ_HINT: usize = 64;

/// In-memory undirected graph: node arena + name index.
///
/// The graph owns every node by value. Adjacency entries refer to other
/// nodes by `NodeId`, so dropping the graph releases everything once.
/// Each accepted edge is stored in both endpoints' lists.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edge_count: usize,
    /// Initial adjacency capacity for new nodes.
    adj_hint: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
            adj_hint: 0,
        }
    }

    /// Pre-allocate for a known graph size. The per-node adjacency reservation
    /// is the average degree, capped at [`MAX_ADJ_HINT`].
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            edge_count: 0,
            adj_hint: edge_count
                .saturating_mul(2)
                .checked_div(node_count)
                .unwrap_or(0)
                .min(MAX_ADJ_HINT),
        }
    }

    /// Register a node under `name`.
    ///
    /// A name that is already registered is rejected with
    /// [`GraphError::DuplicateNode`] and the existing node is left untouched.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateNode { name });
        }
        let id = self.nodes.len();
        self.index.insert(name.clone(), id);
        self.nodes.push(Node {
            name,
            adj: Vec::with_capacity(self.adj_hint),
        });
        Ok(id)
    }

    /// Add an undirected edge between two registered nodes.
    ///
    /// Only `from`'s list is scanned for an entry with the same neighbor and
    /// the same cost. Since insertion is symmetric this also catches the same
    /// edge added in the reverse direction. Parallel edges with a different
    /// cost are accepted.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) -> Result<()> {
        let f = self.resolve(from).ok_or_else(|| GraphError::not_found(from))?;
        let t = self.resolve(to).ok_or_else(|| GraphError::not_found(to))?;

        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        }

        if self.nodes[f]
            .adj
            .iter()
            .any(|e| e.target == t && e.cost == cost)
        {
            return Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            });
        }

        self.nodes[f].adj.push(Edge { cost, target: t });
        self.nodes[t].adj.push(Edge { cost, target: f });
        self.edge_count += 1;
        Ok(())
    }

    /// Look up a node by name.
    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Name of a node. Empty for a handle this graph never issued.
    pub fn name(&self, id: NodeId) -> &str {
        self.nodes.get(id).map(|n| n.name.as_str()).unwrap_or("")
    }

    /// Adjacency list of a node, in insertion order.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.nodes.get(id).map(|n| n.adj.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// All nodes in registration order.
    pub fn nodes_iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of accepted undirected edges (each stored twice internally).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem: usize = self
            .nodes
            .iter()
            .map(|n| size_of::<Node>() + n.name.capacity() + n.adj.capacity() * size_of::<Edge>())
            .sum();
        let index_mem: usize = self
            .index
            .keys()
            .map(|k| k.capacity() + size_of::<String>() + size_of::<NodeId>() + 8)
            .sum();

        nodes_mem + index_mem
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
