//! Timing jitter sources.
//!
//! Each tick adds a small random delay on top of the configured speed so the
//! typing cadence looks less mechanical. The source is pluggable so timing can
//! be made deterministic.

/// Upper bound (exclusive) of any jitter value, in milliseconds.
pub const MAX_JITTER_MS: u32 = 50;

/// A source of per-tick timing jitter.
///
/// Implementations return a value in `[0, MAX_JITTER_MS)`.
pub trait Jitter {
    fn jitter_ms(&mut self) -> u32;
}

impl<F> Jitter for F
where
    F: FnMut() -> u32,
{
    fn jitter_ms(&mut self) -> u32 {
        self().min(MAX_JITTER_MS - 1)
    }
}

/// No jitter at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    #[inline]
    fn jitter_ms(&mut self) -> u32 {
        0
    }
}

/// Always the same jitter, clamped below [`MAX_JITTER_MS`].
#[derive(Clone, Copy, Debug)]
pub struct FixedJitter(pub u32);

impl Jitter for FixedJitter {
    #[inline]
    fn jitter_ms(&mut self) -> u32 {
        self.0.min(MAX_JITTER_MS - 1)
    }
}

/// Uniform jitter from the thread-local RNG.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomJitter;

#[cfg(not(target_arch = "wasm32"))]
impl Jitter for RandomJitter {
    fn jitter_ms(&mut self) -> u32 {
        use rand::Rng;
        rand::rng().random_range(0..MAX_JITTER_MS)
    }
}

/// Uniform jitter from a seeded RNG; the same seed yields the same sequence.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Jitter for SeededJitter {
    fn jitter_ms(&mut self) -> u32 {
        use rand::Rng;
        self.rng.random_range(0..MAX_JITTER_MS)
    }
}

/// The jitter source used when none is supplied.
pub fn default_jitter() -> Box<dyn Jitter> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(RandomJitter)
    }
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Box::new(crate::web::MathRandomJitter)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Box::new(NoJitter)
    }
}
