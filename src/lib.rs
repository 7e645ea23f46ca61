//! Arithmetic in the binary fields GF(2^m) for `2 <= m <= 8`, with optional
//! step-by-step traces of every operation.
//!
//! Field elements are small integers whose bits are polynomial coefficients.
//! The field itself is described by a validated [`FieldConfig`]. Operations
//! come as plain functions ([`multiply`], [`power`], [`invert`], ...) that
//! take raw values, and as operators on the [`Gf2m`] element type. Every
//! function has a `*_traced` variant that reports intermediate [`Step`]s to a
//! caller-supplied [`StepSink`], such as a `Vec<Step>`.
//!
//! ```
//! use polylab::{invert, multiply, FieldConfig, Step};
//!
//! let aes = FieldConfig::new(8, 0x11B)?;
//! assert_eq!(multiply(0x57, 0x13, &aes), 0xFE);
//!
//! let mut steps: Vec<Step> = Vec::new();
//! let inv = polylab::invert_traced(0x57, &aes, &mut steps)?;
//! assert_eq!(inv, invert(0x57, &aes)?);
//! assert!(!steps.is_empty());
//! # Ok::<(), polylab::FieldError>(())
//! ```

extern crate alloc;

pub mod calc;
pub mod error;
pub mod structures;
pub mod utils;

pub use calc::{Calculation, CalculationRecord, Operation};
pub use error::{FieldError, Result};
pub use structures::config::{default_modulus, FieldConfig, DEFAULT_MODULI, FIELD_SIZES};
pub use structures::element::Gf2m;
pub use structures::gf2m::{
    add, divide, divide_traced, invert, invert_traced, multiply, multiply_traced, power,
    power_be_bytes, power_be_bytes_traced, power_traced, reduce, reduce_traced,
};
pub use structures::poly;
pub use structures::trace::{LogSink, NoTrace, Step, StepCounts, StepSink};
pub use utils::{format_hex, format_poly, parse_exponent, parse_hex, parse_operand};
