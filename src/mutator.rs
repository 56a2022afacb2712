use rand::Rng;

/// Enforce the desired LSB on a channel value using the LSB-Matching ±1
/// rule, clamped at the 0/255 boundary (`spec.md` §4.5). The ± direction is
/// not part of the wire format — any random source is fine — so this uses
/// the thread-local `rand` RNG rather than the address-stream PRNG, keeping
/// the two concerns (pixel selection vs. write noise) independent.
pub fn write_lsb(channel: u8, target_bit: u8) -> u8 {
    debug_assert!(target_bit == 0 || target_bit == 1);
    if (channel & 1) == target_bit {
        return channel;
    }
    match channel {
        0 => 1,
        255 => 254,
        c => {
            let delta: i16 = if rand::thread_rng().gen_bool(0.5) { 1 } else { -1 };
            (c as i16 + delta) as u8
        }
    }
}

/// Extract the LSB a channel currently carries.
pub fn read_lsb(channel: u8) -> u8 {
    channel & 1
}

/// Test-mode marker palette: level 1 is pure red, and later levels cycle
/// through the remaining primaries/secondaries so overlapping coverage maps
/// from consecutive `--test-mode` runs stay visually distinguishable.
const MARKER_PALETTE: [(u8, u8, u8); 6] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (0, 255, 255),
    (255, 0, 255),
];

/// Marker colour for a 1-indexed chain level.
pub fn marker_colour(level: usize) -> (u8, u8, u8) {
    MARKER_PALETTE[(level - 1) % MARKER_PALETTE.len()]
}
