/// Multiplier applied to names missing from [`DEPARTMENT_FACTORS`].
pub const DEFAULT_DEPARTMENT_FACTOR: f64 = 1.0;

/// Production multiplier per known department. Lookup is exact: case and
/// accents must match.
pub const DEPARTMENT_FACTORS: [(&str, f64); 5] = [
    ("Antioquia", 1.2),
    ("Cundinamarca", 1.0),
    ("Valle del Cauca", 1.1),
    ("Boyacá", 0.9),
    ("Nariño", 0.8),
];

/// Multiplier for `name`, or `default` when the department is unknown.
/// An unknown name is never an error.
pub fn department_factor(name: &str, default: f64) -> f64 {
    DEPARTMENT_FACTORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, factor)| factor)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_departments_resolve() {
        assert_eq!(department_factor("Antioquia", DEFAULT_DEPARTMENT_FACTOR), 1.2);
        assert_eq!(department_factor("Nariño", DEFAULT_DEPARTMENT_FACTOR), 0.8);
        assert_eq!(department_factor("Valle del Cauca", DEFAULT_DEPARTMENT_FACTOR), 1.1);
    }

    #[test]
    fn unknown_department_uses_default() {
        assert_eq!(department_factor("Amazonas", DEFAULT_DEPARTMENT_FACTOR), 1.0);
        assert_eq!(department_factor("", 0.5), 0.5);
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(department_factor("antioquia", DEFAULT_DEPARTMENT_FACTOR), 1.0);
        assert_eq!(department_factor("Boyaca", DEFAULT_DEPARTMENT_FACTOR), 1.0);
    }

    #[test]
    fn factors_within_documented_range() {
        for (_, f) in DEPARTMENT_FACTORS {
            assert!((0.8..=1.2).contains(&f));
        }
    }
}
