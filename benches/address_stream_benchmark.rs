use std::collections::HashSet;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lsb_matching_with_seed::address_stream::AddressStream;
use lsb_matching_with_seed::prng::Prng;
use lsb_matching_with_seed::seed;

fn key_for(seed_bytes: &[u8], width: u32, height: u32) -> [u8; 32] {
    let ks = seed::derive_chain(&[seed_bytes.to_vec()], width, height, false);
    ks[0]
}

/// Draws addresses until a fixed occupancy fraction of the image is
/// consumed, measuring how rejection-sampling cost grows as the free pixel
/// pool shrinks.
fn draw_until_occupancy(width: u32, height: u32, occupancy: f64) {
    let key = key_for(b"bench-seed", width, height);
    let empty = HashSet::new();
    let mut stream = AddressStream::new(Prng::from_key(&key), width, height, &empty);
    let target = (width as f64 * height as f64 * occupancy) as usize;
    for _ in 0..target {
        black_box(stream.next_addr());
    }
}

fn bench_address_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("address_stream_occupancy");
    for occupancy in [0.1, 0.5, 0.9] {
        group.bench_function(format!("occupancy_{occupancy}"), |b| {
            b.iter(|| draw_until_occupancy(256, 256, occupancy));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_address_stream);
criterion_main!(benches);
