//! Convenience functions for arithmetics over native integers
use crate::{
    errors::{KnapsackError, Result},
    trace::Traced,
};

/// Greatest common divisor by the Euclidean algorithm. gcd(a, 0) = a
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        return a;
    }
    return gcd(b, a % b);
}

/// (a * b) mod m, widened to u128 so the product cannot overflow. m must be non-zero
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    return ((a as u128 * b as u128) % m as u128) as u64;
}

/// Find x in [0, m) such that (a * x) mod m == 1 using the extended Euclidean algorithm.
///
/// The Bezout coefficient of `a` is carried through the reduction of (a, m) and normalized into
/// [0, m) at the end. A modulus of 1 is degenerate and yields 0. If a and m share a factor there is
/// no inverse and the call fails instead of returning a meaningless coefficient.
pub fn modular_inverse(a: u64, m: u64) -> Result<Traced<u64>> {
    if m == 0 {
        return Err(KnapsackError::NotInvertible { a, m });
    }
    let inverse = if m == 1 {
        0
    } else {
        let modulus = m as i128;
        let (mut a_i, mut m_i) = ((a % m) as i128, modulus);
        let (mut x0, mut x1): (i128, i128) = (0, 1);
        while a_i > 1 {
            if m_i == 0 {
                // the remainder chain ended on gcd(a, m) = a_i > 1
                return Err(KnapsackError::NotInvertible { a, m });
            }
            let q = a_i / m_i;
            (a_i, m_i) = (m_i, a_i % m_i);
            (x0, x1) = (x1 - q * x0, x0);
        }
        if a_i == 0 {
            return Err(KnapsackError::NotInvertible { a, m });
        }
        (if x1 < 0 { x1 + modulus } else { x1 }) as u64
    };
    return Ok(Traced::with_line(
        inverse,
        format!("Modular inverse of {a} modulo {m}: Result = {inverse}"),
    ));
}
