use canopy::graph::Graph;
use canopy::solver::SolverBuilder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn path(n: usize) -> Graph {
    let mut graph = Graph::with_order(n);
    for v in 1..n {
        graph.add_edge(v - 1, v);
    }
    graph
}

fn cycle(n: usize) -> Graph {
    let mut graph = path(n);
    graph.add_edge(n - 1, 0);
    graph
}

fn grid(rows: usize, cols: usize) -> Graph {
    let mut graph = Graph::with_order(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let v = row * cols + col;
            if col + 1 < cols {
                graph.add_edge(v, v + 1);
            }
            if row + 1 < rows {
                graph.add_edge(v, v + cols);
            }
        }
    }
    graph
}

fn solve_families(c: &mut Criterion) {
    let path_graph = path(64);
    c.bench_function("path_64", |b| {
        b.iter(|| {
            SolverBuilder::new()
                .build()
                .solve(black_box(&path_graph))
                .unwrap()
        })
    });

    let cycle_graph = cycle(48);
    c.bench_function("cycle_48", |b| {
        b.iter(|| {
            SolverBuilder::new()
                .build()
                .solve(black_box(&cycle_graph))
                .unwrap()
        })
    });

    let grid_graph = grid(3, 4);
    c.bench_function("grid_3x4", |b| {
        b.iter(|| {
            SolverBuilder::new()
                .build()
                .solve(black_box(&grid_graph))
                .unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = solve_families
}
criterion_main!(benches);
