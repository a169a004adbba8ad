//! Startup RNG seeding
//!
//! Produces the seed for the single pseudo-random stream used to populate
//! stochastic initial state. Prefers the OS entropy source; some platforms
//! legitimately report no entropy, in which case the wall clock stands in.
//! Seeding never fails.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::TryRngCore;

/// Returns a seed for the startup RNG stream.
///
/// The stream seeded from this value is used exactly once, before the first
/// step, and is never reseeded during the run.
pub fn seed() -> u64 {
    match OsRng.try_next_u64() {
        Ok(value) => value,
        Err(err) => {
            log::warn!("OS entropy source unavailable ({err}), seeding from system clock");
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn seed_drives_a_usable_stream() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed());
        // Smoke test: the stream produces values in range.
        for _ in 0..32 {
            let v: f64 = rng.random();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
