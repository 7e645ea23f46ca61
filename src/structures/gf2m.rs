//! Arithmetic in GF(2^m) on raw element values.
//!
//! Elements are `u32` bit patterns masked to the low `m` bits of the
//! [`FieldConfig`]. Every operation comes in two forms: a plain one, and a
//! `*_traced` one that additionally reports each intermediate step to a
//! [`StepSink`]. Both run the same code, so tracing never changes a result.
//!
//! # Example
//!
//! ```
//! use polylab::{multiply, multiply_traced, power, invert, FieldConfig, Step};
//!
//! let aes = FieldConfig::default();
//! assert_eq!(multiply(0x57, 0x13, &aes), 0xFE);
//! assert_eq!(power(0x57, 2, &aes), 0xA5);
//! assert_eq!(multiply(0x57, invert(0x57, &aes).unwrap(), &aes), 1);
//!
//! let mut steps: Vec<Step> = Vec::new();
//! multiply_traced(0x57, 0x13, &aes, &mut steps);
//! assert!(matches!(steps.last(), Some(Step::Mod { after: 0xFE, .. })));
//! ```

use crate::error::{FieldError, Result};
use crate::structures::config::FieldConfig;
use crate::structures::poly::{self, degree};
use crate::structures::trace::{NoTrace, Step, StepSink};

/// Field addition (and subtraction): XOR of the two operands.
#[inline]
pub const fn add(a: u32, b: u32) -> u32 {
    poly::add(a, b)
}

/// Reduce an arbitrary polynomial modulo the field's modulus.
///
/// The result is always in `0..2^m`, and reducing twice is the same as
/// reducing once.
pub fn reduce(x: u32, cfg: &FieldConfig) -> u32 {
    reduce_traced(x, cfg, &mut NoTrace)
}

/// [`reduce`], recording one [`Step::Reduce`] per XOR of the shifted
/// modulus followed by a single [`Step::Mod`] for the whole call.
pub fn reduce_traced<S: StepSink + ?Sized>(x: u32, cfg: &FieldConfig, sink: &mut S) -> u32 {
    let modulus = cfg.mod_poly();
    // FieldConfig guarantees degree(modulus) == m.
    let deg_mod = cfg.m();

    let mut r = x;
    while let Some(deg_r) = degree(r) {
        if deg_r < deg_mod {
            break;
        }
        let shift = deg_r - deg_mod;
        let before = r;
        r ^= modulus << shift;
        sink.record(Step::Reduce {
            carry: shift,
            before,
            after: r,
        });
    }

    let value = cfg.reduce_bits(r);
    sink.record(Step::Mod {
        before: x,
        after: value,
    });
    value
}

/// Product of two field elements.
///
/// Builds the full carry-less product by shift-and-add, then reduces it once.
pub fn multiply(a: u32, b: u32, cfg: &FieldConfig) -> u32 {
    multiply_traced(a, b, cfg, &mut NoTrace)
}

/// [`multiply`], recording one [`Step::Mul`] for each of the `m` bits of `b`
/// (set or not), followed by the steps of the final [`reduce_traced`].
pub fn multiply_traced<S: StepSink + ?Sized>(
    a: u32,
    b: u32,
    cfg: &FieldConfig,
    sink: &mut S,
) -> u32 {
    let a = cfg.reduce_bits(a);
    let b = cfg.reduce_bits(b);

    let mut p = 0;
    for i in 0..cfg.m() {
        let b_bit = (b >> i) & 1;
        let p_before = p;
        if b_bit == 1 {
            p ^= a << i;
        }
        sink.record(Step::Mul {
            i,
            b_bit,
            a_before: a,
            a_after: a,
            p_before,
            p_after: p,
        });
    }

    reduce_traced(p, cfg, sink)
}

/// `base^exponent` by square-and-multiply.
///
/// `power(a, 0)` is `1` for every `a`, including zero.
pub fn power(base: u32, exponent: u64, cfg: &FieldConfig) -> u32 {
    power_traced(base, exponent, cfg, &mut NoTrace)
}

/// [`power`], recording one [`Step::Exp`] per exponent bit, least
/// significant first, up to the highest set bit. The multiplications inside
/// each step are not traced.
pub fn power_traced<S: StepSink + ?Sized>(
    base: u32,
    exponent: u64,
    cfg: &FieldConfig,
    sink: &mut S,
) -> u32 {
    let bits = u64::BITS - exponent.leading_zeros();
    square_and_multiply(base, (0..bits).map(|i| (exponent >> i) & 1 == 1), cfg, sink)
}

/// `base^exponent` for an exponent of any size, given as big-endian bytes.
///
/// Leading zero bytes are ignored and an empty slice is the exponent zero.
///
/// ```
/// use polylab::{power, power_be_bytes, FieldConfig};
///
/// let aes = FieldConfig::default();
/// assert_eq!(power_be_bytes(0x57, &[0x01, 0x00], &aes), power(0x57, 256, &aes));
/// ```
pub fn power_be_bytes(base: u32, exponent: &[u8], cfg: &FieldConfig) -> u32 {
    power_be_bytes_traced(base, exponent, cfg, &mut NoTrace)
}

/// [`power_be_bytes`] with the same step trace as [`power_traced`].
pub fn power_be_bytes_traced<S: StepSink + ?Sized>(
    base: u32,
    exponent: &[u8],
    cfg: &FieldConfig,
    sink: &mut S,
) -> u32 {
    let start = exponent
        .iter()
        .position(|&byte| byte != 0)
        .unwrap_or(exponent.len());
    let significant = &exponent[start..];

    let bits = match significant.first() {
        Some(&top) => {
            (significant.len() - 1) * 8 + (u8::BITS - top.leading_zeros()) as usize
        }
        None => 0,
    };
    let bit_at = |i: usize| {
        let byte = significant[significant.len() - 1 - i / 8];
        (byte >> (i % 8)) & 1 == 1
    };

    square_and_multiply(base, (0..bits).map(bit_at), cfg, sink)
}

/// Shared loop of the exponentiation functions; `bits` runs from the least
/// significant exponent bit up to the most significant set bit.
fn square_and_multiply<S, I>(base: u32, bits: I, cfg: &FieldConfig, sink: &mut S) -> u32
where
    S: StepSink + ?Sized,
    I: Iterator<Item = bool>,
{
    let mut acc = 1;
    let mut base = cfg.reduce_bits(base);

    for bit in bits {
        let base_before = base;
        let acc_before = acc;

        if bit {
            acc = multiply(acc, base, cfg);
        }
        base = multiply(base, base, cfg);

        sink.record(Step::Exp {
            bit: bit as u32,
            base_before,
            base_after: base,
            acc_before,
            acc_after: acc,
        });
    }

    cfg.reduce_bits(acc)
}

/// Multiplicative inverse by the extended Euclidean algorithm over GF(2)[x].
///
/// # Errors
///
/// Returns `FieldError::NoInverse` if `a` is zero in the field.
/// Returns `FieldError::NotInvertible` if `a` shares a factor with the
/// modulus, which can only happen when the modulus is reducible.
pub fn invert(a: u32, cfg: &FieldConfig) -> Result<u32> {
    invert_traced(a, cfg, &mut NoTrace)
}

/// [`invert`], recording one [`Step::Egcd`] per elimination step followed by
/// the steps of the final [`reduce_traced`] of the cofactor.
pub fn invert_traced<S: StepSink + ?Sized>(a: u32, cfg: &FieldConfig, sink: &mut S) -> Result<u32> {
    let a = cfg.reduce_bits(a);
    if a == 0 {
        return Err(FieldError::NoInverse);
    }

    // Invariant: g1 * a = u and g2 * a = v (mod modulus).
    let mut u = a;
    let mut v = cfg.mod_poly();
    let mut g1 = 1;
    let mut g2 = 0;

    while u != 1 {
        let (Some(mut deg_u), Some(mut deg_v)) = (degree(u), degree(v)) else {
            tracing::warn!(
                element = a,
                modulus = cfg.mod_poly(),
                "non-unit gcd, modulus is reducible"
            );
            return Err(FieldError::NotInvertible {
                element: a,
                modulus: cfg.mod_poly(),
            });
        };

        if deg_u < deg_v {
            core::mem::swap(&mut u, &mut v);
            core::mem::swap(&mut g1, &mut g2);
            core::mem::swap(&mut deg_u, &mut deg_v);
        }
        let shift = deg_u - deg_v;

        let (u_before, g1_before) = (u, g1);
        u ^= v << shift;
        g1 ^= g2 << shift;

        sink.record(Step::Egcd {
            a: u_before,
            b: v,
            q: 1 << shift,
            r: u,
            t0: g1_before,
            t1: g2,
        });
    }

    Ok(reduce_traced(g1, cfg, sink))
}

/// `a / b`, defined as `a * invert(b)`.
///
/// # Errors
///
/// Same as [`invert`] applied to `b`.
pub fn divide(a: u32, b: u32, cfg: &FieldConfig) -> Result<u32> {
    divide_traced(a, b, cfg, &mut NoTrace)
}

/// [`divide`], recording the inversion steps and then the multiplication steps.
pub fn divide_traced<S: StepSink + ?Sized>(
    a: u32,
    b: u32,
    cfg: &FieldConfig,
    sink: &mut S,
) -> Result<u32> {
    let inv = invert_traced(b, cfg, sink)?;
    Ok(multiply_traced(a, inv, cfg, sink))
}
