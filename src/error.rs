//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised by field configuration and field arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field degree is outside the supported `2..=8` range.
    #[error("field size m = {m} is not supported (expected 2..=8)")]
    InvalidFieldSize { m: u32 },

    /// The modulus is zero or its degree does not equal `m`.
    #[error("modulus {modulus:#x} is not a degree-{m} polynomial")]
    InvalidModulus { m: u32, modulus: u32 },

    /// Zero was inverted or used as a divisor.
    #[error("zero has no multiplicative inverse in GF(2^m)")]
    NoInverse,

    /// The extended Euclidean algorithm found a non-unit gcd, which only
    /// happens when the configured modulus is reducible.
    #[error("gcd({element:#x}, {modulus:#x}) != 1; the modulus is not irreducible")]
    NotInvertible { element: u32, modulus: u32 },

    /// Returned by the checked configuration constructor.
    #[error("modulus {modulus:#x} is reducible over GF(2)")]
    ReducibleModulus { modulus: u32 },

    /// An operand string could not be parsed.
    #[error("invalid operand {input:?}")]
    InvalidOperand { input: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FieldError>;
