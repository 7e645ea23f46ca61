//! Polynomials over GF(2) packed into machine words.
//!
//! Bit `i` of a `u32` is the coefficient of `x^i`, so `0b1011` is
//! `x^3 + x + 1`. Addition is XOR and multiplication is shift-and-XOR.
//! These are the building blocks the field operations in
//! [`gf2m`](super::gf2m) are written in terms of.

use crate::error::{FieldError, Result};

/// Degree of `p`: the index of its highest set bit.
///
/// Returns `None` for the zero polynomial, whose degree is undefined.
///
/// # Example
///
/// ```
/// use polylab::poly::degree;
///
/// assert_eq!(degree(0x11B), Some(8)); // x^8 + x^4 + x^3 + x + 1
/// assert_eq!(degree(1), Some(0));
/// assert_eq!(degree(0), None);
/// ```
#[inline]
pub const fn degree(p: u32) -> Option<u32> {
    if p == 0 {
        None
    } else {
        Some(31 - p.leading_zeros())
    }
}

/// Addition of two polynomials, which is also subtraction in characteristic 2.
#[inline]
pub const fn add(a: u32, b: u32) -> u32 {
    a ^ b
}

/// Keep only the low `m` coefficients of `p`.
#[inline]
pub const fn mask(p: u32, m: u32) -> u32 {
    p & ((1u32 << m) - 1)
}

/// Carry-less product of two polynomials, without any reduction.
///
/// The caller must keep `degree(a) + degree(b) < 32`.
///
/// ```
/// use polylab::poly::clmul;
///
/// // (x + 1)(x + 1) = x^2 + 1
/// assert_eq!(clmul(0b11, 0b11), 0b101);
/// ```
pub const fn clmul(a: u32, b: u32) -> u32 {
    let mut result = 0;
    let mut b = b;
    let mut shift = 0u32;
    while b != 0 {
        if b & 1 == 1 {
            result ^= a << shift;
        }
        b >>= 1;
        shift += 1;
    }
    result
}

/// Remainder of `x` divided by `divisor`.
///
/// Unlike [`reduce`](super::gf2m::reduce) this works for any non-zero
/// divisor, not only a validated field modulus.
///
/// # Errors
///
/// Returns `FieldError::InvalidModulus` if `divisor` is zero.
pub fn rem(x: u32, divisor: u32) -> Result<u32> {
    let deg_d = degree(divisor).ok_or(FieldError::InvalidModulus {
        m: 0,
        modulus: divisor,
    })?;

    let mut r = x;
    while let Some(deg_r) = degree(r) {
        if deg_r < deg_d {
            break;
        }
        r ^= divisor << (deg_r - deg_d);
    }
    Ok(r)
}

/// Test whether `p` is irreducible over GF(2).
///
/// Trial division by every polynomial of degree `1..=degree(p) / 2`.
/// Zero and the constants are not irreducible; every linear polynomial is.
///
/// ```
/// use polylab::poly::is_irreducible;
///
/// assert!(is_irreducible(0x11B));  // AES modulus
/// assert!(!is_irreducible(0b101)); // x^2 + 1 = (x + 1)^2
/// ```
pub fn is_irreducible(p: u32) -> bool {
    let n = match degree(p) {
        None | Some(0) => return false,
        Some(1) => return true,
        Some(d) => d,
    };

    // Divisors of degree 1..=n/2 are exactly the values 2..2^(n/2 + 1).
    let limit = 1u32 << (n / 2 + 1);
    (2..limit).all(|d| !matches!(rem(p, d), Ok(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_of_zero_is_none() {
        assert_eq!(degree(0), None);
    }

    #[test]
    fn degree_examples() {
        assert_eq!(degree(1), Some(0));
        assert_eq!(degree(0b10), Some(1));
        assert_eq!(degree(0b111), Some(2));
        assert_eq!(degree(0x80), Some(7));
        assert_eq!(degree(0x1FF), Some(8));
        assert_eq!(degree(u32::MAX), Some(31));
    }

    #[test]
    fn add_is_xor() {
        assert_eq!(add(0x57, 0x13), 0x44);
        assert_eq!(add(0x57, 0), 0x57);
        assert_eq!(add(0x57, 0x57), 0);
    }

    #[test]
    fn mask_truncates() {
        assert_eq!(mask(0x1FF, 8), 0xFF);
        assert_eq!(mask(0b1111, 2), 0b11);
        assert_eq!(mask(0b0100, 2), 0);
    }

    #[test]
    fn clmul_small() {
        assert_eq!(clmul(0, 0x57), 0);
        assert_eq!(clmul(1, 0x57), 0x57);
        // x * (x^2 + x + 1) = x^3 + x^2 + x
        assert_eq!(clmul(0b10, 0b111), 0b1110);
        // raw product behind the AES example 0x57 * 0x13
        assert_eq!(clmul(0x57, 0x13), 0x589);
    }

    #[test]
    fn rem_basic() {
        // (x^3 + x + 1) mod (x^2 + x + 1) = x
        assert_eq!(rem(0b1011, 0b111), Ok(0b10));
        assert_eq!(rem(0x589, 0x11B), Ok(0xFE));
        assert_eq!(rem(0x11B, 0x11B), Ok(0));
        assert_eq!(rem(0x12, 0x11B), Ok(0x12));
    }

    #[test]
    fn rem_by_zero_fails() {
        assert!(matches!(
            rem(0x57, 0),
            Err(FieldError::InvalidModulus { modulus: 0, .. })
        ));
    }

    #[test]
    fn irreducible_small_degrees() {
        assert!(!is_irreducible(0));
        assert!(!is_irreducible(1));
        assert!(is_irreducible(0b10));
        assert!(is_irreducible(0b11));
        assert!(is_irreducible(0b111));
        assert!(!is_irreducible(0b101));
        assert!(!is_irreducible(0b110));
        assert!(is_irreducible(0b1011));
        assert!(is_irreducible(0b1101));
        assert!(!is_irreducible(0b1111)); // (x + 1)^3
    }

    #[test]
    fn irreducible_counts_match_necklace_formula() {
        // Number of irreducible polynomials of degree n over GF(2).
        let expected = [(2, 1), (3, 2), (4, 3), (5, 6), (6, 9), (7, 18), (8, 30)];
        for (n, count) in expected {
            let found = ((1u32 << n)..(1u32 << (n + 1)))
                .filter(|&p| is_irreducible(p))
                .count();
            assert_eq!(found, count, "degree {}", n);
        }
    }

    #[test]
    fn reducible_degree_eight() {
        // x^8 + 1 = (x + 1)^8
        assert!(!is_irreducible(0x101));
        // x^8 + x^4 + x^3 + x^2 + 1 is the Reed-Solomon primitive polynomial
        assert!(is_irreducible(0x11D));
    }
}
