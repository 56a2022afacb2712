use rand_mt::Mt19937GenRand32;

/// Deterministic uniform integer generator seeded from a 32-byte key.
///
/// Wraps MT19937 (`rand_mt::Mt19937GenRand32`) seeded the way CPython's
/// `random.seed(int)` seeds it — the key is read as a big-endian unsigned
/// integer, decomposed into little-endian 32-bit words, and handed to the
/// original `init_by_array` seeding routine — and implements `uniform_int`
/// via the same `getrandbits`/rejection-sampling strategy CPython's
/// `random.randint` uses. This choice is part of the wire format (`spec.md`
/// §4.2): swapping it for `rand::Rng::gen_range`, which uses a different
/// (Lemire-style) algorithm, would silently break cross-implementation
/// compatibility even though both are "uniform".
pub struct Prng {
    mt: Mt19937GenRand32,
}

impl Prng {
    /// Seed from a 32-byte derived key (Kᵢ from `seed::derive_chain`).
    pub fn from_key(key: &[u8; 32]) -> Self {
        Self {
            mt: Mt19937GenRand32::new_with_key(key_to_words(key)),
        }
    }

    fn next_raw_u32(&mut self) -> u32 {
        self.mt.next_u32()
    }

    /// CPython `getrandbits(k)`: the low `k` bits of one or more raw draws,
    /// most-significant word last. `k` must be in 1..=64.
    fn getrandbits(&mut self, k: u32) -> u64 {
        debug_assert!(k >= 1 && k <= 64);
        if k <= 32 {
            return (self.next_raw_u32() >> (32 - k)) as u64;
        }
        let mut result: u64 = 0;
        let mut remaining = k;
        let mut word_index = 0u32;
        while remaining > 0 {
            let mut r = self.next_raw_u32();
            if remaining < 32 {
                r >>= 32 - remaining;
            }
            result |= (r as u64) << (32 * word_index);
            remaining = remaining.saturating_sub(32);
            word_index += 1;
        }
        result
    }

    /// CPython `_randbelow_with_getrandbits(n)`: rejection-sample until the
    /// drawn value is strictly less than `n`. `n` must be >= 1.
    fn randbelow(&mut self, n: u64) -> u64 {
        debug_assert!(n >= 1);
        let k = 64 - n.leading_zeros();
        loop {
            let r = self.getrandbits(k);
            if r < n {
                return r;
            }
        }
    }

    /// Uniform integer in `[lo, hi]` inclusive, CPython `randint(a, b)`-compatible.
    pub fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(hi >= lo, "uniform_int: empty range [{lo}, {hi}]");
        let width = (hi - lo) as u64 + 1;
        lo + self.randbelow(width) as u32
    }
}

/// Split a 32-byte big-endian key into the little-endian 32-bit word array
/// CPython's `random_seed` builds from an integer: the least significant
/// word first, with trailing (most-significant) all-zero words dropped.
/// An all-zero key yields the single word `[0]`, matching the reference.
fn key_to_words(key: &[u8; 32]) -> Vec<u32> {
    let mut words = [0u32; 8];
    for (i, chunk) in key.chunks(4).enumerate() {
        // chunk 0 is the most significant 4 bytes of the big-endian key.
        words[7 - i] = u32::from_be_bytes(chunk.try_into().unwrap());
    }
    let mut last_nonzero = None;
    for (i, w) in words.iter().enumerate() {
        if *w != 0 {
            last_nonzero = Some(i);
        }
    }
    match last_nonzero {
        Some(idx) => words[..=idx].to_vec(),
        None => vec![0u32],
    }
}
