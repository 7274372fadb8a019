use numscalar_core::traits::Predicate;

///
/// MultipleOf
///

pub struct MultipleOf<N> {
    step: N,
}

impl MultipleOf<i32> {
    #[must_use]
    pub fn new(step: i32) -> Self {
        assert!(step != 0, "multiple-of requires a nonzero step");

        Self { step }
    }
}

impl MultipleOf<f64> {
    #[must_use]
    pub fn new_f64(step: f64) -> Self {
        assert!(
            step.is_finite() && step != 0.0,
            "multiple-of requires a finite nonzero step"
        );

        Self { step }
    }
}

impl Predicate<i32> for MultipleOf<i32> {
    fn test(&self, value: i32) -> bool {
        value % self.step == 0
    }
}

impl Predicate<f64> for MultipleOf<f64> {
    // tolerance scales with the quotient; exact-ratio steps like 0.5 stay
    // exact, decimal steps like 0.1 survive representation error
    fn test(&self, value: f64) -> bool {
        let ratio = value / self.step;
        let nearest = ratio.round();

        (ratio - nearest).abs() <= f64::EPSILON * nearest.abs().max(1.0)
    }
}

///
/// Even / Odd
///

pub struct Even;

impl Predicate<i32> for Even {
    fn test(&self, value: i32) -> bool {
        value % 2 == 0
    }
}

pub struct Odd;

impl Predicate<i32> for Odd {
    fn test(&self, value: i32) -> bool {
        value % 2 != 0
    }
}

///
/// TESTS
///
