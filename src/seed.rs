use sha2::{Digest, Sha512};

/// Fixed, public, version-pinned constant that ties the top-level derived
/// seed K1 to a single implementation family. Must never change between
/// versions of this crate; doing so silently breaks every image hidden
/// under an older release.
pub const BASIS: [u8; 32] = [
    0x3d, 0x67, 0x7d, 0xa6, 0x08, 0x04, 0x0c, 0x3b, 0xe3, 0x22, 0xbf, 0x31, 0x14, 0x3f, 0x1c, 0xf8,
    0xd4, 0xb0, 0xc2, 0x5a, 0xe6, 0x2c, 0x1b, 0xde, 0x35, 0x11, 0xe1, 0xc9, 0xbd, 0xa2, 0x88, 0x40,
];

/// SHA-512 truncated to its last 32 bytes, per `spec.md` H32.
fn h32(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    for p in parts {
        hasher.update(p);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[32..64]);
    out
}

/// Canonical geometry tag: big-endian W then big-endian H, 8 bytes total.
/// This is one of two forms the spec allows; picking a fixed one is required
/// for interoperability and is recorded here, not left to the caller.
pub fn geometry_tag(width: u32, height: u32) -> [u8; 8] {
    let mut tag = [0u8; 8];
    tag[0..4].copy_from_slice(&width.to_be_bytes());
    tag[4..8].copy_from_slice(&height.to_be_bytes());
    tag
}

/// I = H32(Basis ‖ G), reproducible from image dimensions alone.
pub fn initialisator(width: u32, height: u32) -> [u8; 32] {
    let tag = geometry_tag(width, height);
    h32(&[&BASIS, &tag])
}

/// Zero-pad or truncate a user seed to exactly 32 bytes, for the
/// `use_raw_seed` override. Applies uniformly to every level of the chain.
fn raw_seed(seed: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let n = seed.len().min(32);
    out[..n].copy_from_slice(&seed[..n]);
    out
}

/// Derive K1..Kn from a non-empty seed chain and the image dimensions.
///
/// K1 = H32(I ‖ S1); for i >= 2, Ki = H32(S[i-1] ‖ S[i]) — independent of I
/// and of the Basis, by design (`spec.md` §4.1).
pub fn derive_chain(seeds: &[Vec<u8>], width: u32, height: u32, use_raw_seed: bool) -> Vec<[u8; 32]> {
    if use_raw_seed {
        return seeds.iter().map(|s| raw_seed(s)).collect();
    }
    let mut ks = Vec::with_capacity(seeds.len());
    let i = initialisator(width, height);
    ks.push(h32(&[&i, &seeds[0]]));
    for w in seeds.windows(2) {
        ks.push(h32(&[&w[0], &w[1]]));
    }
    ks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_32_bytes() {
        assert_eq!(BASIS.len(), 32);
    }

    #[test]
    fn geometry_tag_matches_reference_vector() {
        assert_eq!(hex::encode(geometry_tag(100, 100)), "0000006400000064");
    }

    #[test]
    fn initialisator_matches_reference_vector() {
        assert_eq!(hex::encode(initialisator(100, 100)), "af9db1bbd4f358480769023d67d1c31f421050f827f52919582db201607b1b10");
    }

    #[test]
    fn k1_matches_reference_vector() {
        let seeds = vec![b"seed_0".to_vec()];
        let ks = derive_chain(&seeds, 100, 100, false);
        assert_eq!(ks.len(), 1);
        assert_eq!(hex::encode(ks[0]), "5aca297ec29820d64d20a982c445488b5312b757fab4a558794390acc0aff7f6");
    }

    #[test]
    fn chain_k_matches_reference_vectors() {
        let seeds = vec![b"seed_0".to_vec(), b"seed_1".to_vec(), b"seed_2".to_vec()];
        let ks = derive_chain(&seeds, 100, 100, false);
        assert_eq!(
            ks.iter().map(hex::encode).collect::<Vec<_>>(),
            vec!["5aca297ec29820d64d20a982c445488b5312b757fab4a558794390acc0aff7f6", "d6a2bc96dc3d5c5fdf82be9573c38c0ecccac710118cca143f55c2f35fbfa414", "72985974e10c49fabc0fc3af11684be573665144a881aa200039e6474fc397fc"]
        );
    }

    #[test]
    fn changing_earlier_seed_changes_later_k() {
        let a = derive_chain(&[b"seed_0".to_vec(), b"seed_1".to_vec()], 100, 100, false);
        let b = derive_chain(&[b"seed_0x".to_vec(), b"seed_1".to_vec()], 100, 100, false);
        assert_ne!(a[1], b[1]);
    }

    #[test]
    fn changing_dimensions_changes_k1_only() {
        let a = derive_chain(&[b"seed_0".to_vec(), b"seed_1".to_vec()], 100, 100, false);
        let b = derive_chain(&[b"seed_0".to_vec(), b"seed_1".to_vec()], 200, 100, false);
        assert_ne!(a[0], b[0]);
        assert_eq!(a[1], b[1]);
    }

    #[test]
    fn raw_seed_override_pads_and_truncates() {
        let ks = derive_chain(&[b"seed_0".to_vec()], 100, 100, true);
        let mut expected = [0u8; 32];
        expected[..6].copy_from_slice(b"seed_0");
        assert_eq!(hex::encode(ks[0]), hex::encode(expected));
    }

    #[test]
    fn raw_seed_overrides_every_level() {
        let ks = derive_chain(
            &[b"seed_0".to_vec(), b"seed_1".to_vec()],
            100,
            100,
            true,
        );
        let mut e0 = [0u8; 32];
        e0[..6].copy_from_slice(b"seed_0");
        let mut e1 = [0u8; 32];
        e1[..6].copy_from_slice(b"seed_1");
        assert_eq!(ks[0], e0);
        assert_eq!(ks[1], e1);
    }
}
