//! Cubic segments in monomial form and conversion from Hermite data.

use curves_math::{Jet, Real};

/// Cubic in monomial form:
/// `f(t) = at^3 + bt^2 + ct + d = coeffs[0]t^3 + ... + coeffs[3]`.
///
/// The form Horner's method evaluates most directly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Monomial {
    pub coeffs: [f64; 4],
}

impl Monomial {
    #[inline]
    pub fn eval<R: Real>(&self, t: R) -> R {
        let mut result = R::from_f64(self.coeffs[0]);
        for coeff in &self.coeffs[1..] {
            result = result * t + R::from_f64(*coeff);
        }
        result
    }

    /// `f'(t) = 3at^2 + 2bt + c`.
    #[inline]
    pub fn eval_derivative(&self, t: f64) -> f64 {
        (3.0 * self.coeffs[0] * t + 2.0 * self.coeffs[1]) * t + self.coeffs[2]
    }

    /// Roots of `f'` inside `(0, 1)`, where the cubic turns.
    pub fn stationary_points(&self) -> impl Iterator<Item = f64> {
        let a = 3.0 * self.coeffs[0];
        let b = 2.0 * self.coeffs[1];
        let c = self.coeffs[2];

        let mut roots = [None, None];
        if a.abs() < f64::EPSILON {
            if b.abs() >= f64::EPSILON {
                roots[0] = Some(-c / b);
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let sqrt = discriminant.sqrt();
                roots[0] = Some((-b + sqrt) / (2.0 * a));
                roots[1] = Some((-b - sqrt) / (2.0 * a));
            }
        }

        roots
            .into_iter()
            .flatten()
            .filter(|t| *t > 0.0 && *t < 1.0)
    }
}

/// Converts endpoint jets and a segment width into monomial coefficients
/// over `t` in `[0, 1)`.
///
/// The tangents arrive in domain units; scaling by `width` moves them into
/// `t`-space, and the interpolation conditions pin all four coefficients:
/// `f(0) = start.a`, `f'(0) = start.v * width`, `f(1) = end.a`,
/// `f'(1) = end.v * width`.
pub fn hermite_to_monomial(start: Jet<f64>, end: Jet<f64>, width: f64) -> Monomial {
    let m0 = start.v * width;
    let m1 = end.v * width;
    let rise = end.a - start.a;

    Monomial {
        coeffs: [
            2.0 * -rise + m0 + m1,
            3.0 * rise - 2.0 * m0 - m1,
            m0,
            start.a,
        ],
    }
}
