//! Prime capacity sizing shared by both map variants.

/// Returns true if `candidate` is prime.
///
/// 2 and 3 are prime; 0, 1 and every other even number are not. Remaining
/// candidates are checked by trial division with odd factors up to the square root.
#[must_use]
pub fn is_prime(candidate: usize) -> bool {
    if candidate == 2 || candidate == 3 {
        return true;
    }
    if candidate < 2 || candidate % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.checked_mul(factor).is_some_and(|square| square <= candidate) {
        if candidate % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }
    true
}

/// Returns the first prime reached by scanning upward over odd numbers from `candidate`.
///
/// An even start is bumped to the next odd number first, so `next_prime(2)` is 3.
#[must_use]
pub fn next_prime(candidate: usize) -> usize {
    let mut candidate = if candidate % 2 == 0 { candidate.saturating_add(1) } else { candidate };
    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }
    candidate
}

/// Returns `requested` if it is prime, the next prime above it otherwise
#[must_use]
pub fn prime_capacity(requested: usize) -> usize {
    if is_prime(requested) { requested } else { next_prime(requested) }
}
