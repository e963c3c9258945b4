//! Seeded pseudo-random streams.
//!
//! `rnd(seed)` must produce the same sequence for the same seed on every
//! host, so seeded streams use the xmur3 string hash to derive a 32-bit
//! state and Mulberry32 to advance it. Both are defined over 32-bit
//! wrapping arithmetic and UTF-16 code units.

use std::collections::HashMap;

use rand::RngCore;
use tracing::debug;

/// 32-bit string hash used to derive a Mulberry32 state from a seed string.
#[derive(Clone, Debug)]
pub struct Xmur3 {
    h: u32,
}

impl Xmur3 {
    /// Absorbs `seed` into a fresh hash state.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(seed: &str) -> Self {
        let units: Vec<u16> = seed.encode_utf16().collect();
        let mut h = 1_779_033_703u32 ^ units.len() as u32;
        for unit in units {
            h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    /// Produces the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.h = h;
        h
    }
}

/// Mulberry32 generator.
#[derive(Clone, Debug)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator from a raw 32-bit state.
    #[must_use]
    pub const fn new(state: u32) -> Self {
        Self { state }
    }

    /// Creates a generator whose state is the first xmur3 output of `seed`.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(Xmur3::new(seed).next_u32())
    }

    /// Returns the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Per-context table of seeded streams, keyed by the seed's string form.
///
/// Streams are created on first use and live as long as the owning
/// [`Context`](crate::Context).
#[derive(Debug, Default)]
pub struct SeedRegistry {
    streams: HashMap<String, Mulberry32>,
}

impl SeedRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the stream for `seed`, creating it if needed.
    pub fn next(&mut self, seed: &str) -> f64 {
        self.streams
            .entry(seed.to_string())
            .or_insert_with(|| {
                debug!(seed, "creating seeded random stream");
                Mulberry32::from_seed_str(seed)
            })
            .next_f64()
    }

    /// Number of live streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Returns true if no stream has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Drops every stream; the next call for any seed restarts its sequence.
    pub fn clear(&mut self) {
        self.streams.clear();
    }
}
