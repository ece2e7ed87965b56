use tracing::{instrument, trace};

use super::transition::Matrix;

/// Greatest common divisor of `values` (`0` for an empty slice).
#[must_use]
pub fn gcd(values: &[usize]) -> usize {
    values.iter().copied().fold(0, gcd_pair)
}

const fn gcd_pair(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Period of a class sub-chain.
///
/// Records every `k` in `1..=n` for which some diagonal entry of `sub^k` is
/// positive and returns the GCD of those return times. A class that is a
/// closed communicating class always records at least one `k`.
#[must_use]
#[instrument(skip(sub), fields(size = sub.nrows()))]
pub fn period(sub: &Matrix) -> usize {
    let n = sub.nrows();
    let mut returns = Vec::new();
    let mut power = sub.clone();

    for k in 1..=n {
        if k > 1 {
            power = &power * sub;
        }
        if power.diagonal().iter().any(|&p| p > 0.0) {
            trace!(k, "return possible");
            returns.push(k);
        }
    }

    gcd(&returns)
}
