//! Routing benchmarks over regular component lattices.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pcb_router::{find_path, Layout, Rect, SearchLimits, TerminalId};

/// An n x n lattice of 4x4 components on an 8-cell pitch, with pins on the
/// first and last component.
fn lattice(n: i32) -> (Layout, TerminalId, TerminalId, Rect) {
    let mut builder = Layout::builder();
    let mut first = None;
    let mut last = None;
    for row in 0..n {
        for col in 0..n {
            let id = builder.add_component(col * 8, row * 8, 4, 4).unwrap();
            if row == 0 && col == 0 {
                first = Some(id);
            }
            if row == n - 1 && col == n - 1 {
                last = Some(id);
            }
        }
    }
    let a = builder.add_terminal(first.unwrap(), 4, 2).unwrap();
    let b = builder.add_terminal(last.unwrap(), 0, 2).unwrap();
    let bounds = Rect::new(-8, -8, n * 8 + 16, n * 8 + 16);
    (builder.build(), a, b, bounds)
}

fn bench_lattice_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_lattice");
    for &n in &[4, 8, 16] {
        let (layout, a, b, bounds) = lattice(n);
        let limits = SearchLimits::within(bounds);
        group.bench_with_input(BenchmarkId::new("diagonal", n), &n, |bencher, _| {
            bencher.iter(|| {
                let route = find_path(black_box(&layout), a, b, &limits);
                black_box(route)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lattice_routing);
criterion_main!(benches);
