use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use molscene::molecule::{Element, Molecule};
use molscene::persistent::PersistentAtom;
use molscene::plugin::{BallAndStickPlugin, PluginHost, ScenePlugin};
use molscene::Options;

/// Alkane-like zigzag chain with explicit hydrogens and every fifth
/// carbon-carbon bond doubled.
fn chain(carbons: usize) -> Molecule {
    let mut mol = Molecule::new();
    let mut prev = None;
    for i in 0..carbons {
        let y = if i % 2 == 0 { 0.0 } else { 0.9 };
        let c = mol.add_atom(Element::C, Vec3::new(i as f32 * 1.25, y, 0.0));
        for dz in [-1.0, 1.0] {
            let h = mol.add_atom(
                Element::H,
                Vec3::new(i as f32 * 1.25, y, dz),
            );
            let _ = mol.add_bond(c, h, 1);
        }
        if let Some(p) = prev {
            let order = if i % 5 == 0 { 2 } else { 1 };
            let _ = mol.add_bond(p, c, order);
        }
        prev = Some(c);
    }
    mol
}

fn ball_and_stick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ball_and_stick");
    for count in [100, 1000, 10_000] {
        let mol = chain(count);
        let plugin = BallAndStickPlugin::new();
        group.bench_function(format!("{count}_carbons"), |b| {
            b.iter(|| black_box(plugin.process(black_box(&mol))));
        });
    }
    group.finish();
}

fn host_pass_benchmark(c: &mut Criterion) {
    let mol = chain(1000);
    let mut host = PluginHost::with_default_plugins(&Options::default());
    c.bench_function("host_pass_and_pick_map", |b| {
        b.iter(|| {
            host.process(black_box(&mol));
            black_box(host.pick_map())
        });
    });
}

fn persistent_resolve_benchmark(c: &mut Criterion) {
    let mut mol = chain(1000);
    let reference = PersistentAtom::new(Some(mol.id()), mol.atom_unique_id(1500));
    for _ in 0..500 {
        let _ = mol.remove_atom(0);
    }
    c.bench_function("persistent_atom_resolve", |b| {
        b.iter(|| black_box(reference.atom(black_box(&mol))));
    });
}

criterion_group!(
    benches,
    ball_and_stick_benchmark,
    host_pass_benchmark,
    persistent_resolve_benchmark
);
criterion_main!(benches);
