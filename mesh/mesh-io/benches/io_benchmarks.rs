//! Benchmarks for asset loading and coloured output.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{
    MeshFormat, load_asset, load_asset_from_bytes, save_colored_ply, write_colored_obj,
    write_colored_ply,
};
use mesh_types::{IndexedMesh, Vertex, VertexColor};
use tempfile::tempdir;

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Rippled `n x n` grid with a colour ramp, `2 * n * n` triangles.
fn create_terrain(n: u32) -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    for j in 0..=n {
        for i in 0..=n {
            let (x, y) = (f64::from(i), f64::from(j));
            let z = (x * 0.3).sin() * (y * 0.2).cos();
            let shade = ((i * 255) / n) as u8;
            mesh.vertices.push(Vertex::with_color(
                mesh_types::Point3::new(x, y, z),
                VertexColor::new(shade, 128, 255 - shade),
            ));
        }
    }
    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i;
            mesh.faces.push([a, a + 1, a + row + 1]);
            mesh.faces.push([a, a + row + 1, a + row]);
        }
    }
    mesh
}

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse");

    let terrain = create_terrain(64); // ~8k triangles
    group.throughput(Throughput::Elements(terrain.faces.len() as u64));

    let mut ply_binary = Vec::new();
    write_colored_ply(&terrain, &mut ply_binary, true).unwrap();
    let mut ply_ascii = Vec::new();
    write_colored_ply(&terrain, &mut ply_ascii, false).unwrap();
    let mut obj = Vec::new();
    write_colored_obj(&terrain, &mut obj).unwrap();

    group.bench_function("ply_binary", |b| {
        b.iter(|| load_asset_from_bytes(black_box(&ply_binary), MeshFormat::Ply));
    });
    group.bench_function("ply_ascii", |b| {
        b.iter(|| load_asset_from_bytes(black_box(&ply_ascii), MeshFormat::Ply));
    });
    group.bench_function("obj", |b| {
        b.iter(|| load_asset_from_bytes(black_box(&obj), MeshFormat::Obj));
    });

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("Write");

    let terrain = create_terrain(64);
    group.throughput(Throughput::Elements(terrain.faces.len() as u64));

    group.bench_function("ply_binary", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            write_colored_ply(black_box(&terrain), &mut out, true).unwrap();
            out
        });
    });
    group.bench_function("obj", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            write_colored_obj(black_box(&terrain), &mut out).unwrap();
            out
        });
    });

    group.finish();
}

fn bench_file_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("File");

    let terrain = create_terrain(32);
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("bench_terrain.ply");

    group.bench_function("save_then_load_ply", |b| {
        b.iter(|| {
            save_colored_ply(black_box(&terrain), &path, true).unwrap();
            load_asset(&path).unwrap()
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_parse, bench_write, bench_file_round_trip);
criterion_main!(benches);
