use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::address_stream::AddressStream;
use crate::codec::BitGroup;
use crate::error::{Result, StegoError};
use crate::image::Image;
use crate::mutator;
use crate::prng::Prng;
use crate::seed;

/// Orchestrates the pixel-address stream, byte codec, and channel mutator
/// to hide or extract one payload at the currently-selected chain level,
/// and to advance to the next seed (`spec.md` §4.6).
#[derive(Debug)]
pub struct StegoEngine<'img, I: Image> {
    image: &'img mut I,
    seeds: Vec<Vec<u8>>,
    use_raw_seed: bool,
    test_mode: bool,
    level: usize,
    cumulative_skip: HashSet<(u32, u32)>,
    /// Pixels consumed by the current level's most recent `hide`/`extract`
    /// call; folded into `cumulative_skip` only when `advance` commits it
    /// (`spec.md` §4.3, §4.6 — Rk is exact per level, not auto-merged).
    level_consumed: HashSet<(u32, u32)>,
}

impl<'img, I: Image> StegoEngine<'img, I> {
    /// `seeds` must be non-empty; `level` starts at 1.
    pub fn new(
        image: &'img mut I,
        seeds: Vec<Vec<u8>>,
        use_raw_seed: bool,
        test_mode: bool,
    ) -> Result<Self> {
        if seeds.is_empty() {
            return Err(StegoError::EmptySeedChain);
        }
        Ok(Self {
            image,
            seeds,
            use_raw_seed,
            test_mode,
            level: 1,
            cumulative_skip: HashSet::new(),
            level_consumed: HashSet::new(),
        })
    }

    fn current_key(&self) -> [u8; 32] {
        let ks = seed::derive_chain(
            &self.seeds[..self.level],
            self.image.width(),
            self.image.height(),
            self.use_raw_seed,
        );
        ks[self.level - 1]
    }

    /// Write `data` under the current chain level, then a sentinel byte.
    /// In test mode, `data` is ignored and visited pixels are marked with
    /// this level's marker colour instead (`spec.md` §4.6).
    pub fn hide(&mut self, data: &[u8]) -> Result<()> {
        let needed = 3 * (data.len() + 1);
        let key = self.current_key();
        let prng = Prng::from_key(&key);
        // Constructed from `self.cumulative_skip` directly (not through a
        // `&self`-receiver helper) so the borrow checker treats it as
        // disjoint from `self.image`, which `put_pixel` below needs mutably.
        let mut stream = AddressStream::new(
            prng,
            self.image.width(),
            self.image.height(),
            &self.cumulative_skip,
        );
        if stream.remaining_capacity() < needed {
            return Err(StegoError::CapacityExceeded {
                payload_len: data.len(),
                needed,
                available: stream.remaining_capacity(),
            });
        }

        let groups: Vec<BitGroup> = data
            .iter()
            .map(|b| BitGroup::for_data_byte(*b))
            .chain(std::iter::once(BitGroup::sentinel()))
            .collect();

        let marker = mutator::marker_colour(self.level);
        let mut written_pixels = 0usize;

        for group in &groups {
            let mut pixels = [(0u32, 0u32); 3];
            for p in pixels.iter_mut() {
                *p = stream
                    .next_addr()
                    .expect("capacity already checked above");
            }
            for bit_index in 0..9 {
                let (pixel_idx, channel) = BitGroup::pixel_and_channel(bit_index);
                let (x, y) = pixels[pixel_idx];
                if self.test_mode {
                    self.image.put_pixel(x, y, marker);
                } else {
                    let mut rgb = self.image.get_pixel(x, y);
                    let mut channels = [rgb.0, rgb.1, rgb.2];
                    channels[channel] = mutator::write_lsb(channels[channel], group.0[bit_index]);
                    rgb = (channels[0], channels[1], channels[2]);
                    self.image.put_pixel(x, y, rgb);
                }
            }
            written_pixels += 3;
        }

        debug!(level = self.level, pixels = written_pixels, "hide complete");
        self.level_consumed = stream.consumed().clone();
        Ok(())
    }

    /// Read back the payload hidden under the current chain level, stopping
    /// at the first decoded sentinel byte.
    pub fn extract(&mut self) -> Result<Vec<u8>> {
        let key = self.current_key();
        let prng = Prng::from_key(&key);
        let mut stream = AddressStream::new(
            prng,
            self.image.width(),
            self.image.height(),
            &self.cumulative_skip,
        );
        let mut out = Vec::new();

        loop {
            let mut bits = [0u8; 9];
            let mut three = [(0u32, 0u32); 3];
            for p in three.iter_mut() {
                *p = match stream.next_addr() {
                    Some(c) => c,
                    None => {
                        warn!(level = self.level, recovered = out.len(), "extract truncated");
                        return Err(StegoError::Truncated {
                            bytes_recovered: out.len(),
                        });
                    }
                };
            }
            for bit_index in 0..9 {
                let (pixel_idx, channel) = BitGroup::pixel_and_channel(bit_index);
                let (x, y) = three[pixel_idx];
                let rgb = self.image.get_pixel(x, y);
                let channels = [rgb.0, rgb.1, rgb.2];
                bits[bit_index] = mutator::read_lsb(channels[channel]);
            }
            let (sentinel, byte) = BitGroup::decode(bits);
            if sentinel {
                info!(level = self.level, bytes = out.len(), "extract complete");
                self.level_consumed = stream.consumed().clone();
                return Ok(out);
            }
            out.push(byte);
        }
    }

    /// Commit this level's consumed pixels and move to the next seed.
    pub fn advance(&mut self) -> Result<()> {
        if self.level >= self.seeds.len() {
            return Err(StegoError::NoMoreSeeds {
                level: self.level,
                chain_len: self.seeds.len(),
            });
        }
        self.cumulative_skip.extend(self.level_consumed.drain());
        self.level += 1;
        Ok(())
    }

    pub fn level(&self) -> usize {
        self.level
    }
}
