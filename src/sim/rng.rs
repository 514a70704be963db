//! The simulator's single PRNG.
//!
//! A small, portable, deterministic generator rather than a Mersenne-Twister
//! implementation: `rand_pcg`'s PCG-XSL-RR (`Pcg64`). See DESIGN.md.

use rand::SeedableRng;
use rand_pcg::Pcg64;

pub type SimRng = Pcg64;

pub fn seeded(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}
