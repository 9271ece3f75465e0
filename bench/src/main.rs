use hopcost_core::{costs_from, trace_path, Graph, GraphError, Traversal};
use std::collections::VecDeque;
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: hopcost-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  chain     Single path (deepest possible BFS)");
        println!("  star      One hub, every other node a leaf");
        println!("  random    Erdos-Renyi uniform random edges");
        println!("  barbell   Two dense clusters connected by a thin bridge");
        println!("  dla       Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 200000");
        return;
    }

    if node_count < 2 {
        eprintln!("node_count must be at least 2");
        return;
    }

    println!("hopcost-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "star" => vec![("Star", gen_star)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Chain", gen_chain as Generator),
            ("Star", gen_star),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, node_count) {
            eprintln!("{}: {}", name, e);
        }
    }
}

/// Destinations sampled for the per-destination timing.
const QUERY_SAMPLE: usize = 100;

type Generator = fn(u64) -> Result<Graph, GraphError>;

fn run_benchmark(name: &str, generator: Generator, node_count: u64) -> Result<(), GraphError> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Full sweep from node 0 (typically a hub or root)
    let t = Instant::now();
    let costs = costs_from(&graph, "0")?;
    let elapsed = t.elapsed();
    let reached = costs.iter().filter(|c| c.cost.is_reached()).count();
    println!(
        "Sweep from 0: {} of {} reached in {:.1}ms",
        reached,
        costs.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    // Per-destination queries with one reused traversal, evenly spaced ids
    let step = (graph.node_count() / QUERY_SAMPLE).max(1);
    let mut traversal = Traversal::new();
    let t = Instant::now();
    let mut queries = 0usize;
    for id in (1..graph.node_count()).step_by(step).take(QUERY_SAMPLE) {
        traversal.search(&graph, "0", graph.name(id))?;
        queries += 1;
    }
    let elapsed = t.elapsed();
    println!(
        "{} single-destination queries in {:.1}ms ({:.3}ms each)",
        queries,
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / queries.max(1) as f64
    );

    // Route: node 0 to last node
    let far_node = (graph.node_count() - 1).to_string();
    let t = Instant::now();
    let route = trace_path(&graph, "0", &far_node)?;
    let elapsed = t.elapsed();
    match route {
        Some(r) => println!(
            "Route 0 -> {}: {} hops, cost {} in {:.1}ms",
            far_node,
            r.hops(),
            r.cost,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!(
            "Route 0 -> {}: no path ({:.1}ms)",
            far_node,
            elapsed.as_secs_f64() * 1000.0
        ),
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

/// Edge costs drawn by the generators. Uniform 6 dominates so most
/// first-discovered paths are also minimum-cost.
const COSTS: [f64; 5] = [6.0, 6.0, 6.0, 1.0, 10.0];

fn add_nodes(graph: &mut Graph, range: std::ops::Range<u64>) -> Result<(), GraphError> {
    for i in range {
        graph.add_node(i.to_string())?;
    }
    Ok(())
}

/// Add an edge. Duplicate draws from the random generators are dropped,
/// any other rejection is a generator bug and propagates.
fn link(graph: &mut Graph, rng: &mut FastRng, from: u64, to: u64) -> Result<(), GraphError> {
    let cost = COSTS[rng.next(COSTS.len() as u64) as usize];
    match graph.add_edge(&from.to_string(), &to.to_string(), cost) {
        Ok(()) | Err(GraphError::DuplicateEdge { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Path 0-1-2-...-(n-1). Worst case for depth and queue turnover.
fn gen_chain(node_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(42);
    add_nodes(&mut graph, 0..node_count)?;
    for i in 1..node_count {
        link(&mut graph, &mut rng, i - 1, i)?;
    }
    Ok(graph)
}

/// Hub 0 with every other node attached. One BFS level, huge fan-out.
fn gen_star(node_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(7);
    add_nodes(&mut graph, 0..node_count)?;
    for i in 1..node_count {
        link(&mut graph, &mut rng, 0, i)?;
    }
    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, ~5 per node on average.
/// Leaves some nodes isolated, which exercises the no-edges short circuit.
fn gen_random(node_count: u64) -> Result<Graph, GraphError> {
    let target_edges = node_count * 5;
    let mut graph = Graph::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);
    add_nodes(&mut graph, 0..node_count)?;

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            link(&mut graph, &mut rng, from, to)?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense clusters joined by a chain of bridge nodes.
fn gen_barbell(node_count: u64) -> Result<Graph, GraphError> {
    let bridge_len = 10u64.min(node_count.saturating_sub(2));
    let cluster_size = ((node_count - bridge_len) / 2).max(1);
    let mut graph = Graph::with_capacity(node_count as usize, (cluster_size * 20 + bridge_len) as usize);
    let mut rng = FastRng::new(99999);

    // Cluster A: 0..cluster_size
    add_nodes(&mut graph, 0..cluster_size)?;
    for i in 0..cluster_size {
        for _ in 0..10u64.min(cluster_size - 1) {
            let target = rng.next(cluster_size);
            if target != i {
                link(&mut graph, &mut rng, i, target)?;
            }
        }
    }

    // Bridge: chain from the last node of A
    let bridge_start = cluster_size;
    add_nodes(&mut graph, bridge_start..bridge_start + bridge_len)?;
    let mut prev = cluster_size - 1;
    for id in bridge_start..bridge_start + bridge_len {
        link(&mut graph, &mut rng, prev, id)?;
        prev = id;
    }

    // Cluster B: remaining ids, first one tied to the bridge
    let b_start = bridge_start + bridge_len;
    add_nodes(&mut graph, b_start..node_count)?;
    if b_start < node_count {
        link(&mut graph, &mut rng, prev, b_start)?;
    }
    let b_size = node_count - b_start;
    for i in 0..b_size {
        for _ in 0..10u64.min(b_size.saturating_sub(1)) {
            let target = rng.next(b_size);
            if target != i {
                link(&mut graph, &mut rng, b_start + i, b_start + target)?;
            }
        }
    }

    Ok(graph)
}

/// DLA (Diffusion-Limited Aggregation): each new node sticks to a recent
/// "surface" node, with occasional shortcuts back into the structure.
fn gen_dla(node_count: u64) -> Result<Graph, GraphError> {
    let mut graph = Graph::with_capacity(node_count as usize, (node_count * 2) as usize);
    let mut rng = FastRng::new(77777);
    add_nodes(&mut graph, 0..node_count)?;

    // VecDeque for O(1) eviction of the oldest surface nodes.
    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        link(&mut graph, &mut rng, new_node, attach_to)?;

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                link(&mut graph, &mut rng, new_node, other)?;
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Ok(graph)
}
