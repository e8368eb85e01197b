use rand::Rng;

/// Source of the bounded integer noise mixed into forecasts and mock series.
/// Every `rand::Rng` qualifies; handlers pass `thread_rng()`, tests pass a
/// seeded `StdRng` or [`FixedNoise`].
pub trait NoiseSource {
    /// Uniform integer in `low..=high`.
    fn uniform_int(&mut self, low: i64, high: i64) -> i64;
}

impl<R: Rng + ?Sized> NoiseSource for R {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..=high)
    }
}

/// Always yields the same value, clamped into the requested range.
/// `FixedNoise(0)` removes noise entirely; `i64::MIN`/`i64::MAX` pin every
/// draw to the lower/upper bound.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub i64);

#[cfg(test)]
impl NoiseSource for FixedNoise {
    fn uniform_int(&mut self, low: i64, high: i64) -> i64 {
        self.0.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rng_draws_stay_inclusive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let v = rng.uniform_int(-10, 10);
            assert!((-10..=10).contains(&v));
        }
    }

    #[test]
    fn fixed_noise_clamps() {
        assert_eq!(FixedNoise(0).uniform_int(-5, 5), 0);
        assert_eq!(FixedNoise(i64::MAX).uniform_int(-5, 5), 5);
        assert_eq!(FixedNoise(i64::MIN).uniform_int(-5, 5), -5);
    }
}
