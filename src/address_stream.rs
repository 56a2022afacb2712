use std::collections::HashSet;

use crate::prng::Prng;

/// Produces a deterministic, collision-free sequence of pixel coordinates
/// for one chain level: each call to `next` draws from the level's PRNG
/// until it lands on a coordinate that is neither in the cumulative skip
/// set (consumed by earlier levels) nor already emitted by this stream.
///
/// The draw order — x then y, continuing to draw rather than restarting the
/// PRNG on a collision — is part of the wire format (`spec.md` §4.3):
/// swapping the axes or restarting on rejection would desync two otherwise
/// compatible implementations.
pub struct AddressStream<'a> {
    prng: Prng,
    width: u32,
    height: u32,
    skip: &'a HashSet<(u32, u32)>,
    seen: HashSet<(u32, u32)>,
}

impl<'a> AddressStream<'a> {
    pub fn new(prng: Prng, width: u32, height: u32, skip: &'a HashSet<(u32, u32)>) -> Self {
        Self {
            prng,
            width,
            height,
            skip,
            seen: HashSet::new(),
        }
    }

    /// Total pixels this level could ever draw, after removing what earlier
    /// levels already reserved.
    pub fn remaining_capacity(&self) -> usize {
        let total = self.width as usize * self.height as usize;
        total.saturating_sub(self.skip.len()).saturating_sub(self.seen.len())
    }

    /// Draw the next free coordinate, or `None` if the level is exhausted.
    /// Callers MUST check this before drawing further — the caller, not
    /// this stream, is what turns exhaustion into `CapacityExceeded` or
    /// `Truncated` (`spec.md` §4.3).
    pub fn next_addr(&mut self) -> Option<(u32, u32)> {
        if self.remaining_capacity() == 0 {
            return None;
        }
        loop {
            let x = self.prng.uniform_int(0, self.width - 1);
            let y = self.prng.uniform_int(0, self.height - 1);
            let coord = (x, y);
            if self.skip.contains(&coord) || self.seen.contains(&coord) {
                continue;
            }
            self.seen.insert(coord);
            return Some(coord);
        }
    }

    /// Coordinates this stream has emitted so far — becomes this level's
    /// reserved set once the driver's `hide`/`extract` call completes.
    pub fn consumed(&self) -> &HashSet<(u32, u32)> {
        &self.seen
    }
}
