//! Prints Basis/Initialisator/Kᵢ values and the first drawn addresses for a
//! handful of fixed (seed chain, geometry) inputs, so an independent
//! implementation can check interoperability against this one.

use std::collections::HashSet;

use lsb_matching_with_seed::address_stream::AddressStream;
use lsb_matching_with_seed::prng::Prng;
use lsb_matching_with_seed::seed;

const ADDRESSES_PER_VECTOR: usize = 10;

struct Case {
    seeds: &'static [&'static [u8]],
    width: u32,
    height: u32,
}

const CASES: &[Case] = &[
    Case { seeds: &[b"seed_0"], width: 100, height: 100 },
    Case { seeds: &[b"seed_0", b"seed_1", b"seed_2"], width: 100, height: 100 },
    Case { seeds: &[b"correct horse battery staple"], width: 640, height: 480 },
];

fn main() {
    println!("basis = {}", hex::encode(seed::BASIS));
    println!();

    let mut json_cases = Vec::new();

    for (case_index, case) in CASES.iter().enumerate() {
        println!(
            "case {case_index}: width={} height={} seeds={:?}",
            case.width, case.height, case.seeds
        );
        println!(
            "  geometry_tag = {}",
            hex::encode(seed::geometry_tag(case.width, case.height))
        );
        println!(
            "  initialisator = {}",
            hex::encode(seed::initialisator(case.width, case.height))
        );

        let seeds: Vec<Vec<u8>> = case.seeds.iter().map(|s| s.to_vec()).collect();
        let ks = seed::derive_chain(&seeds, case.width, case.height, false);

        let mut cumulative_skip: HashSet<(u32, u32)> = HashSet::new();
        let mut json_levels = Vec::new();
        for (level, k) in ks.iter().enumerate() {
            println!("  k{} = {}", level + 1, hex::encode(k));
            let prng = Prng::from_key(k);
            let mut stream = AddressStream::new(prng, case.width, case.height, &cumulative_skip);
            let addrs: Vec<(u32, u32)> = (0..ADDRESSES_PER_VECTOR)
                .filter_map(|_| stream.next_addr())
                .collect();
            println!("  k{}_first_{ADDRESSES_PER_VECTOR}_addresses = {:?}", level + 1, addrs);
            json_levels.push(serde_json::json!({
                "level": level + 1,
                "k": hex::encode(k),
                "first_addresses": addrs,
            }));
            let newly_consumed: HashSet<(u32, u32)> = stream.consumed().clone();
            cumulative_skip.extend(newly_consumed);
        }
        println!();

        json_cases.push(serde_json::json!({
            "width": case.width,
            "height": case.height,
            "seeds": case.seeds,
            "geometry_tag": hex::encode(seed::geometry_tag(case.width, case.height)),
            "initialisator": hex::encode(seed::initialisator(case.width, case.height)),
            "levels": json_levels,
        }));
    }

    let document = serde_json::json!({
        "basis": hex::encode(seed::BASIS),
        "cases": json_cases,
    });
    eprintln!("{}", serde_json::to_string_pretty(&document).expect("vectors serialize"));
}
