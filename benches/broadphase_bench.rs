use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use sweep_candidates::*;

/// Cloth grid in the xz-plane with a gentle wave applied at t1.
fn generate_grid_mesh(resolution: usize) -> (Vec<DVec3>, Vec<DVec3>, Vec<[usize; 3]>) {
    let spacing = 1.0 / resolution as f64;
    let mut v0 = Vec::new();
    let mut v1 = Vec::new();
    for y in 0..=resolution {
        for x in 0..=resolution {
            let p = DVec3::new(x as f64 * spacing, 0.0, y as f64 * spacing);
            v0.push(p);
            v1.push(p + DVec3::new(0.0, 0.1 * (p.x * 6.0).sin() * (p.z * 6.0).cos(), 0.0));
        }
    }
    let width = resolution + 1;
    let mut faces = Vec::new();
    for y in 0..resolution {
        for x in 0..resolution {
            let i = y * width + x;
            faces.push([i, i + 1, i + width]);
            faces.push([i + 1, i + width + 1, i + width]);
        }
    }
    (v0, v1, faces)
}

fn bench_build_and_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadphase_build");
    for &res in &[16usize, 32, 64] {
        let (v0, v1, faces) = generate_grid_mesh(res);
        let edges = edges_from_faces(&faces);
        for method in [
            BroadPhaseMethod::BruteForce,
            BroadPhaseMethod::SweepAndPrune,
            BroadPhaseMethod::HashGrid,
        ] {
            // Quadratic; only worth timing on the small grid.
            if method == BroadPhaseMethod::BruteForce && res > 16 {
                continue;
            }
            let mut broad_phase = BroadPhase::new(method);
            group.bench_with_input(
                BenchmarkId::new(broad_phase.engine_name().to_string(), res),
                &res,
                |b, _| {
                    let mut candidates = Candidates::new();
                    b.iter(|| {
                        broad_phase
                            .build_continuous(&v0, &v1, &edges, &faces, 1e-3)
                            .unwrap();
                        broad_phase
                            .detect_collision_candidates(3, &mut candidates)
                            .unwrap();
                        black_box(candidates.len())
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_earliest_toi(c: &mut Criterion) {
    let mut group = c.benchmark_group("ccd_sweep");
    for &res in &[16usize, 32] {
        let (v0, v1, faces) = generate_grid_mesh(res);
        let edges = edges_from_faces(&faces);
        let mut broad_phase = BroadPhase::new(BroadPhaseMethod::SweepAndPrune);
        broad_phase
            .build_continuous(&v0, &v1, &edges, &faces, 1e-3)
            .unwrap();
        let mut candidates = Candidates::new();
        broad_phase
            .detect_collision_candidates(3, &mut candidates)
            .unwrap();
        let params = CcdParams::default();

        group.bench_with_input(BenchmarkId::new("earliest_toi", res), &res, |b, _| {
            b.iter(|| {
                black_box(
                    candidates
                        .earliest_toi(&v0, &v1, &edges, &faces, &params)
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_and_detect, bench_earliest_toi);
criterion_main!(benches);
