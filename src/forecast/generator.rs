use std::f64::consts::PI;

use crate::config::forecast::*;
use crate::forecast::department::{department_factor, DEFAULT_DEPARTMENT_FACTOR};
use crate::forecast::noise::NoiseSource;
use crate::types::ForecastResult;

/// Produce a synthetic volume/price/confidence forecast for one department
/// and month.
///
/// Unknown departments fall back to [`DEFAULT_DEPARTMENT_FACTOR`]. The month
/// is not range-checked: the seasonal terms have period 12 and the price term
/// is linear, so any integer yields a number. `_target_year` is accepted so
/// callers can persist it alongside the result; it does not affect the output.
///
/// The confidence is not clamped. With the current department table it stays
/// within [0.83, 0.925], but nothing here enforces that.
pub fn generate_forecast<N: NoiseSource + ?Sized>(
    noise: &mut N,
    department: &str,
    target_month: i64,
    _target_year: i64,
) -> ForecastResult {
    let dept_factor = department_factor(department, DEFAULT_DEPARTMENT_FACTOR);

    let volume_noise = noise.uniform_int(-VOLUME_NOISE, VOLUME_NOISE);
    let price_noise = noise.uniform_int(-PRICE_NOISE, PRICE_NOISE);

    let volume = (base_volume(dept_factor, target_month) + volume_noise as f64).round() as i64;
    let price = (base_price(target_month) + price_noise as f64).round() as i64;

    let confidence =
        round2((volume_confidence(dept_factor) + seasonal_confidence(target_month)) / 2.0);

    ForecastResult {
        volume,
        price,
        confidence,
    }
}

/// Angle of `month` on the yearly cycle.
fn month_angle(month: i64) -> f64 {
    2.0 * PI * month as f64 / 12.0
}

/// `1 + 0.15·sin(2π·m/12)`: peaks in March, bottoms out in September.
pub fn month_factor(month: i64) -> f64 {
    1.0 + SEASONAL_AMPLITUDE * month_angle(month).sin()
}

/// Expected volume before noise.
pub fn base_volume(dept_factor: f64, month: i64) -> f64 {
    BASE_VOLUME * dept_factor * month_factor(month)
}

/// Expected price before noise. Exactly [`BASE_PRICE`] in June.
/// Computed in f64 so months near `i64::MIN`/`i64::MAX` cannot overflow.
pub fn base_price(month: i64) -> f64 {
    BASE_PRICE * (1.0 + (month as f64 - PRICE_PIVOT_MONTH as f64) * PRICE_SLOPE_PER_MONTH)
}

pub fn volume_confidence(dept_factor: f64) -> f64 {
    MAX_VOLUME_CONFIDENCE.min(0.7 + dept_factor * 0.2)
}

pub fn seasonal_confidence(month: i64) -> f64 {
    0.8 + 0.1 * month_angle(month).cos().abs()
}

/// Round the exact binary value to two decimal places. `0.865` is stored as
/// `0.86499999…` and must come out as 0.86, which `(x * 100).round()` gets wrong.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::department::DEPARTMENT_FACTORS;
    use crate::forecast::noise::FixedNoise;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn noiseless_forecast_is_exact() {
        let f = generate_forecast(&mut FixedNoise(0), "Antioquia", 3, 2025);
        assert_eq!(f.volume, 207_000);
        assert_eq!(f.price, 846);
        assert_eq!(f.confidence, 0.87);
    }

    #[test]
    fn noise_pinned_to_bounds() {
        let high = generate_forecast(&mut FixedNoise(i64::MAX), "Antioquia", 3, 2025);
        assert_eq!(high.volume, 212_000);
        assert_eq!(high.price, 856);

        let low = generate_forecast(&mut FixedNoise(i64::MIN), "Antioquia", 3, 2025);
        assert_eq!(low.volume, 202_000);
        assert_eq!(low.price, 836);

        // Confidence carries no noise.
        assert_eq!(high.confidence, low.confidence);
    }

    #[test]
    fn june_price_has_no_linear_term() {
        assert!(approx(base_price(6), 900.0));
        let f = generate_forecast(&mut FixedNoise(0), "Cundinamarca", 6, 2025);
        assert_eq!(f.price, 900);
        for month in (1..=12).filter(|&m| m != 6) {
            assert!((base_price(month) - 900.0).abs() > (base_price(6) - 900.0).abs());
        }
    }

    #[test]
    fn outputs_stay_within_noise_bounds() {
        let mut rng = StdRng::seed_from_u64(2025);
        for (department, factor) in DEPARTMENT_FACTORS {
            for month in 1..=12 {
                for _ in 0..50 {
                    let f = generate_forecast(&mut rng, department, month, 2025);
                    // Rounding can add at most half a unit on top of the noise.
                    assert!((f.volume as f64 - base_volume(factor, month)).abs() <= 5_000.5);
                    assert!((f.price as f64 - base_price(month)).abs() <= 10.5);
                    assert!((0.0..=1.0).contains(&f.confidence));
                }
            }
        }
    }

    #[test]
    fn thread_rng_calls_stay_in_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let f = generate_forecast(&mut rng, "Boyacá", 9, 2026);
            assert!((f.volume as f64 - base_volume(0.9, 9)).abs() <= 5_000.5);
            assert!((f.price as f64 - base_price(9)).abs() <= 10.5);
        }
    }

    #[test]
    fn confidence_table_per_department_and_month() {
        let expected: [(&str, [f64; 12]); 5] = [
            ("Antioquia", [0.91, 0.9, 0.87, 0.9, 0.91, 0.92, 0.91, 0.9, 0.87, 0.9, 0.91, 0.92]),
            ("Cundinamarca", [0.89, 0.88, 0.85, 0.88, 0.89, 0.9, 0.89, 0.88, 0.85, 0.88, 0.89, 0.9]),
            ("Valle del Cauca", [0.9, 0.89, 0.86, 0.89, 0.9, 0.91, 0.9, 0.89, 0.86, 0.89, 0.9, 0.91]),
            // Months 2, 4, 8 and 10 land just below a .xx5 tie.
            ("Boyacá", [0.88, 0.86, 0.84, 0.86, 0.88, 0.89, 0.88, 0.86, 0.84, 0.86, 0.88, 0.89]),
            ("Nariño", [0.87, 0.85, 0.83, 0.85, 0.87, 0.88, 0.87, 0.85, 0.83, 0.85, 0.87, 0.88]),
        ];
        for (department, row) in expected {
            for (i, &want) in row.iter().enumerate() {
                let month = i as i64 + 1;
                let f = generate_forecast(&mut FixedNoise(0), department, month, 2025);
                assert_eq!(f.confidence, want, "{department} month {month}");
            }
        }
    }

    #[test]
    fn round2_uses_exact_binary_value() {
        assert_eq!(round2(0.865), 0.86);
        assert_eq!(round2(0.855), 0.85);
        assert_eq!(round2(0.8700000000000001), 0.87);
        assert_eq!(round2(0.925), 0.93);
    }

    #[test]
    fn highest_multiplier_volume_confidence() {
        assert!(approx(volume_confidence(1.2), 0.94));
        assert!(approx(volume_confidence(1.5), 0.95));
    }

    #[test]
    fn known_confidence_values() {
        let conf = |d: &str, m: i64| generate_forecast(&mut FixedNoise(0), d, m, 2025).confidence;
        assert_eq!(conf("Antioquia", 12), 0.92);
        assert_eq!(conf("Cundinamarca", 6), 0.9);
        assert_eq!(conf("Nariño", 3), 0.83);
    }

    #[test]
    fn unknown_department_matches_unit_factor() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        for month in 1..=12 {
            let unknown = generate_forecast(&mut a, "Atlántico", month, 2025);
            let unit = generate_forecast(&mut b, "Cundinamarca", month, 2025);
            assert_eq!(unknown, unit);
        }
    }

    #[test]
    fn seeded_sources_reproduce() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_forecast(&mut a, "Valle del Cauca", 4, 2025),
            generate_forecast(&mut b, "Valle del Cauca", 4, 2025),
        );
    }

    #[test]
    fn target_year_does_not_affect_output() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        assert_eq!(
            generate_forecast(&mut a, "Nariño", 7, 2024),
            generate_forecast(&mut b, "Nariño", 7, 1999),
        );
    }

    #[test]
    fn out_of_range_months_still_produce_numbers() {
        for month in [i64::MIN, -24, -1, 0, 13, 100, i64::MAX] {
            let f = generate_forecast(&mut FixedNoise(0), "Antioquia", month, 2025);
            assert!(f.confidence.is_finite());
            assert!(f.volume > 0);
        }
        // The linear price term keeps its sign at the extremes instead of wrapping.
        assert!(generate_forecast(&mut FixedNoise(0), "Antioquia", i64::MIN, 2025).price < 0);
        assert!(generate_forecast(&mut FixedNoise(0), "Antioquia", i64::MAX, 2025).price > 0);
        // Seasonal terms wrap with period 12.
        let jan = generate_forecast(&mut FixedNoise(0), "Boyacá", 1, 2025);
        let next_jan = generate_forecast(&mut FixedNoise(0), "Boyacá", 13, 2025);
        assert_eq!(jan.volume, next_jan.volume);
        assert_eq!(jan.confidence, next_jan.confidence);
        assert_ne!(jan.price, next_jan.price);
    }
}
