//! Chebyshev series evaluation.
//!
//! Both functions take the coefficients `c[0..n]` of a series
//! `f(x) = Σ c[k]·T_k(x)` and evaluate it (or its derivative with respect to
//! `x`) with the three-term recurrence, carrying only the last two terms.
//! The domain is `[-1, 1]`; outside it the result is the polynomial
//! extrapolation.

/// Value of `Σ c[k]·T_k(x)`.
///
/// Arguments
/// -----------------
/// * `coeffs` — Chebyshev coefficients, lowest degree first.
/// * `x` — Point in the Chebyshev domain.
///
/// Return
/// ----------
/// * The series value. An empty series is `0.0`.
pub fn chebyshev(coeffs: &[f64], x: f64) -> f64 {
    match coeffs {
        [] => 0.0,
        [c0] => *c0,
        [c0, c1, rest @ ..] => {
            let mut y = c0 + c1 * x;
            let two_x = 2.0 * x;
            let (mut t_prev, mut t_curr) = (1.0, x);
            for c in rest {
                let t_next = two_x * t_curr - t_prev;
                y += c * t_next;
                t_prev = t_curr;
                t_curr = t_next;
            }
            y
        }
    }
}

/// Derivative `d/dx Σ c[k]·T_k(x)`.
///
/// Uses `T'_k(x) = k·U_{k-1}(x)` with the second-kind recurrence
/// `U_0 = 1`, `U_1 = 2x`, `U_k = 2x·U_{k-1} − U_{k-2}`.
///
/// Arguments
/// -----------------
/// * `coeffs` — Chebyshev coefficients, lowest degree first.
/// * `x` — Point in the Chebyshev domain.
///
/// Return
/// ----------
/// * The derivative with respect to `x` (not time; see
///   [`HorizonData::interpolate`](super::horizon_data::HorizonData::interpolate)
///   for the rescaling).
pub fn chebyshev_derivative(coeffs: &[f64], x: f64) -> f64 {
    let two_x = 2.0 * x;
    let (mut u_prev, mut u_curr) = (0.0, 1.0);
    let mut y = 0.0;
    for (k, c) in coeffs.iter().enumerate().skip(1) {
        y += c * k as f64 * u_curr;
        let u_next = two_x * u_curr - u_prev;
        u_prev = u_curr;
        u_curr = u_next;
    }
    y
}
