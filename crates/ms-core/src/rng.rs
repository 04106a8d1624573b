//! Deterministic RNG wrappers.
//!
//! # Determinism strategy
//!
//! A run has exactly one root seed.  Two kinds of stream derive from it:
//!
//! - [`SimRng`]: the single sequential stream threaded through the driver
//!   and every market-level draw (marriage market, construction allocation,
//!   relocation search).  Its output depends on call order, so it is only
//!   used from sequential code.
//! - [`AgentRng`]: a short-lived stream keyed by
//!   `(seed, year, stream tag, entity id)`.  Per-agent Bernoulli and
//!   categorical draws use these, so an agent's outcome does not depend on
//!   which other agents were visited first, or on which thread visited it.
//!
//! Keys are mixed with the 64-bit fractional golden-ratio constant followed
//! by a splitmix64 finaliser, which spreads consecutive ids uniformly across
//! the seed space.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{EntityId, Year};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(MIXING_CONSTANT);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

// ── StreamKey ─────────────────────────────────────────────────────────────────

/// Everything but the entity id needed to derive an [`AgentRng`].
///
/// `Copy + Sync`, so it can be shared by the workers of a parallel draw
/// phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamKey {
    seed:   u64,
    year:   Year,
    stream: u64,
}

impl StreamKey {
    pub fn new(seed: u64, year: Year, stream: u64) -> Self {
        Self { seed, year, stream }
    }

    /// The keyed stream of one entity.
    #[inline]
    pub fn agent<I: EntityId>(self, id: I) -> AgentRng {
        AgentRng::keyed(self.seed, self.year, self.stream, id.raw())
    }
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-entity, per-year, per-event deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Derive the stream for `(seed, year, stream, id)`.
    pub fn keyed(seed: u64, year: Year, stream: u64, id: u32) -> Self {
        let mut s = splitmix64(seed ^ stream.wrapping_mul(MIXING_CONSTANT));
        s = splitmix64(s ^ (year.0 as i64 as u64));
        s = splitmix64(s ^ id as u64);
        AgentRng(SmallRng::seed_from_u64(s))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The run's single sequential random stream.
///
/// Besides drawing numbers it remembers the root seed so models can derive
/// keyed [`AgentRng`] streams through [`SimRng::stream_key`].
pub struct SimRng {
    seed:  u64,
    inner: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng {
            seed,
            inner: SmallRng::seed_from_u64(splitmix64(seed)),
        }
    }

    /// The root seed this stream was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Key for the order-independent sub-streams of `stream` in `year`.
    #[inline]
    pub fn stream_key(&self, year: Year, stream: u64) -> StreamKey {
        StreamKey::new(self.seed, year, stream)
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.inner
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.inner.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
