use postman_core::{find_odd_vertices, floyd_warshall, solve_eulerian, Graph, Result};
use serde_json::json;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Floyd-Warshall is cubic; larger graphs are truncated to this many vertices.
const FLOYD_MAX_VERTICES: usize = 400;

type Generator = fn(usize) -> Result<Graph<u32>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .map(|s| s.as_str())
        .filter(|s| !s.starts_with("--") || *s == "--help")
        .collect();

    let mode = positional.first().copied().unwrap_or("all");
    let node_count: usize = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: postman-bench [mode] [node_count] [--json]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  ring      Single cycle (Eulerian circuit, no branching)");
        println!("  lattice   Ring lattice, 3 neighbors per side (degree 6)");
        println!("  torus     Wrap-around grid (degree 4)");
        println!("  tree      Branching tree with every edge doubled (deep splicing)");
        println!("  path      Open chain (Eulerian path between the two ends)");
        println!("  random    Erdos-Renyi random edges (usually infeasible)");
        println!();
        println!("Default node_count: 1000000");
        println!("Floyd-Warshall runs on at most {} vertices.", FLOYD_MAX_VERTICES);
        println!("Set RUST_LOG=postman_core=debug for solver logs.");
        return;
    }

    let generators: Vec<(&str, Generator)> = match mode {
        "ring" => vec![("Ring", gen_ring)],
        "lattice" => vec![("Ring lattice", gen_lattice)],
        "torus" => vec![("Torus grid", gen_torus)],
        "tree" => vec![("Doubled tree", gen_doubled_tree)],
        "path" => vec![("Open chain", gen_path)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "all" => vec![
            ("Ring", gen_ring as Generator),
            ("Ring lattice", gen_lattice),
            ("Torus grid", gen_torus),
            ("Doubled tree", gen_doubled_tree),
            ("Open chain", gen_path),
            ("Erdos-Renyi random", gen_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    if !json_output {
        println!("postman-bench");
        println!("=============");
        println!();
    }

    let mut reports = Vec::new();
    for (name, generator) in generators {
        let report = run_benchmark(name, generator, node_count, !json_output);
        reports.push(report);
    }

    if json_output {
        println!("{}", serde_json::Value::Array(reports));
    }
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    node_count: usize,
    verbose: bool,
) -> serde_json::Value {
    if verbose {
        println!("--- {} ---", name);
        println!("Target: {} nodes", node_count);
    }

    tracing::debug!(generator = name, node_count, "starting benchmark");

    let t = Instant::now();
    let mut graph = match generator(node_count) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}: generator failed: {}", name, e);
            return json!({ "generator": name, "error": e.to_string() });
        }
    };
    let gen_time = t.elapsed();
    if verbose {
        println!(
            "Generated in {:.2}s — {} nodes, {} edges, ~{:.0}MB",
            gen_time.as_secs_f64(),
            graph.vertex_count(),
            graph.edge_count(),
            graph.memory_usage() as f64 / 1_048_576.0
        );
    }

    let t = Instant::now();
    let odd = find_odd_vertices(&graph);
    let odd_time = t.elapsed();

    let t = Instant::now();
    let solved = solve_eulerian(&mut graph);
    let solve_time = t.elapsed();

    let walk_report = match &solved {
        Ok(walk) => {
            let covered = walk.arc_count() == graph.edge_count();
            if verbose {
                println!(
                    "Eulerian {}: {} arcs, closed={}, covers all edges={} in {:.1}ms",
                    if walk.is_closed() { "circuit" } else { "path" },
                    walk.arc_count(),
                    walk.is_closed(),
                    covered,
                    solve_time.as_secs_f64() * 1000.0
                );
            }
            json!({
                "feasible": true,
                "arcs": walk.arc_count(),
                "closed": walk.is_closed(),
                "covers_all_edges": covered,
                "total_weight": walk.total_weight(),
            })
        }
        Err(e) => {
            if verbose {
                println!(
                    "Eulerian: {} ({:.1}ms)",
                    e,
                    solve_time.as_secs_f64() * 1000.0
                );
            }
            json!({ "feasible": false, "error": e.to_string() })
        }
    };

    if verbose {
        println!(
            "Odd-degree scan: {} vertices in {:.1}ms",
            odd.len(),
            odd_time.as_secs_f64() * 1000.0
        );
    }

    let floyd_size = node_count.min(FLOYD_MAX_VERTICES);
    let floyd = generator(floyd_size).and_then(|small| {
        let t = Instant::now();
        let m = floyd_warshall(&small)?;
        Ok((m, small, t.elapsed()))
    });

    let floyd_report = match &floyd {
        Ok((m, small, floyd_time)) => {
            let far = small.capacity().saturating_sub(1);
            let hops = m.path(0, far).map(|p| p.len() - 1);
            if verbose {
                match (m.distance(0, far), hops) {
                    (Some(d), Some(h)) => println!(
                        "Floyd-Warshall ({} nodes): 0 → {} distance {} over {} hops in {:.1}ms",
                        floyd_size,
                        far,
                        d,
                        h,
                        floyd_time.as_secs_f64() * 1000.0
                    ),
                    _ => println!(
                        "Floyd-Warshall ({} nodes): 0 → {} unreachable ({:.1}ms)",
                        floyd_size,
                        far,
                        floyd_time.as_secs_f64() * 1000.0
                    ),
                }
            }
            json!({
                "nodes": floyd_size,
                "distance_0_to_last": m.distance(0, far),
                "hops_0_to_last": hops,
                "ms": floyd_time.as_secs_f64() * 1000.0,
            })
        }
        Err(e) => json!({ "nodes": floyd_size, "error": e.to_string() }),
    };

    if verbose {
        println!();
    }

    json!({
        "generator": name,
        "nodes": graph.vertex_count(),
        "edges": graph.edge_count(),
        "generate_ms": gen_time.as_secs_f64() * 1000.0,
        "odd_vertices": odd.len(),
        "odd_scan_ms": odd_time.as_secs_f64() * 1000.0,
        "solve_ms": solve_time.as_secs_f64() * 1000.0,
        "walk": walk_report,
        "floyd_warshall": floyd_report,
    })
}

// ---------------------------------------------------------------------------
// Generators — O(n + edges), single-threaded, deterministic
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
    fn weight(&mut self) -> u32 {
        1 + self.next(100) as u32
    }
}

type EdgeList = Vec<(usize, usize, u32)>;

/// Graph with every slot in `0..n` occupied, including isolated ones.
fn build(n: usize, edges: EdgeList) -> Result<Graph<u32>> {
    let mut graph = Graph::with_capacity(n);
    for v in 0..n {
        graph.add_vertex(v)?;
    }
    for (a, b, w) in edges {
        graph.add_edge(a, b, w)?;
    }
    Ok(graph)
}

/// Single cycle 0-1-...-(n-1)-0.
fn gen_ring(n: usize) -> Result<Graph<u32>> {
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(42);
    if n >= 2 {
        for i in 0..n {
            edges.push((i, (i + 1) % n, rng.weight()));
        }
    }
    build(n, edges)
}

/// Ring lattice: each node joined to its 3 nearest neighbors on each side.
///
/// Every vertex has degree 6, so the walk is a circuit with many branch
/// points revisited by the greedy pass.
fn gen_lattice(n: usize) -> Result<Graph<u32>> {
    let k = 3usize;
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(67890);
    if n > 2 * k {
        for i in 0..n {
            for j in 1..=k {
                edges.push((i, (i + j) % n, rng.weight()));
            }
        }
    }
    build(n, edges)
}

/// Wrap-around grid, side ⌊√n⌋. Degree 4 everywhere.
fn gen_torus(n: usize) -> Result<Graph<u32>> {
    let side = (n as f64).sqrt() as usize;
    let n = side * side;
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(12345);
    if side >= 3 {
        for r in 0..side {
            for c in 0..side {
                let id = r * side + c;
                edges.push((id, r * side + (c + 1) % side, rng.weight()));
                edges.push((id, ((r + 1) % side) * side + c, rng.weight()));
            }
        }
    }
    build(n, edges)
}

/// Fractal branching tree (3 children per node) with each edge doubled.
///
/// The greedy pass dead-ends at every leaf, so nearly every interior vertex
/// becomes a deferred branch and is resolved by a spliced sub-walk.
fn gen_doubled_tree(n: usize) -> Result<Graph<u32>> {
    let branching = 3usize;
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(99999);

    let mut next_id = 1usize;
    let mut frontier = vec![0usize];
    while next_id < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= n {
                    break;
                }
                let child = next_id;
                next_id += 1;
                edges.push((parent, child, rng.weight()));
                edges.push((child, parent, rng.weight()));
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }
    build(n, edges)
}

/// Open chain 0-1-...-(n-1): exactly two odd vertices.
fn gen_path(n: usize) -> Result<Graph<u32>> {
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(77777);
    for i in 1..n {
        edges.push((i - 1, i, rng.weight()));
    }
    build(n, edges)
}

/// Erdos-Renyi: ~5 uniform random edges per node. Baseline with no structure.
fn gen_random(n: usize) -> Result<Graph<u32>> {
    let mut edges = EdgeList::new();
    let mut rng = FastRng::new(54321);
    if n >= 2 {
        for _ in 0..n * 5 {
            let from = rng.next(n as u64) as usize;
            let to = rng.next(n as u64) as usize;
            if from != to {
                edges.push((from, to, rng.weight()));
            }
        }
    }
    build(n, edges)
}
