//! Source of randomness for key generation
//!
//! Key generation only ever asks for a uniform integer in an inclusive range, so that is the whole
//! interface. Every `rand` generator is a sampler, and tests can replay fixed draws.
use rand::{Rng, RngCore};

pub trait Sampler {
    /// Draw a value from [low, high]. Callers guarantee low <= high
    fn sample_inclusive(&mut self, low: u64, high: u64) -> u64;
}

impl<R: RngCore> Sampler for R {
    fn sample_inclusive(&mut self, low: u64, high: u64) -> u64 {
        return self.gen_range(low..=high);
    }
}
