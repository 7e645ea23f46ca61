//! Field elements that carry their field.
//!
//! [`Gf2m`] bundles a value with the [`FieldConfig`] it lives in, so the
//! usual operators work without passing the configuration around. The
//! configuration is `Copy`, so elements are `Copy` too.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::Result;
use crate::structures::config::FieldConfig;
use crate::structures::gf2m;
use crate::utils::format_hex;

/// An element of GF(2^m) together with its field.
///
/// # Example
///
/// ```
/// use polylab::{FieldConfig, Gf2m};
///
/// let aes = FieldConfig::default();
/// let a = Gf2m::new(0x57, aes);
/// let b = Gf2m::new(0x13, aes);
///
/// assert_eq!((a + b).value(), 0x44);
/// assert_eq!((a * b).value(), 0xFE);
/// assert_eq!(a.pow(2).value(), 0xA5);
///
/// let a_inv = a.inverse().unwrap();
/// assert!((a * a_inv).is_one());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Gf2m {
    value: u32,
    config: FieldConfig,
}

impl Gf2m {
    /// Create an element, masking `value` to the low `m` bits.
    pub const fn new(value: u32, config: FieldConfig) -> Self {
        Self {
            value: config.reduce_bits(value),
            config,
        }
    }

    /// Create an element from an arbitrary polynomial by reducing it modulo
    /// the field's modulus.
    pub fn from_poly(poly: u32, config: FieldConfig) -> Self {
        Self {
            value: gf2m::reduce(poly, &config),
            config,
        }
    }

    /// The zero element of `other`'s field.
    pub const fn zero_like(other: &Self) -> Self {
        Self::new(0, other.config)
    }

    /// The one element of `other`'s field.
    pub const fn one_like(other: &Self) -> Self {
        Self::new(1, other.config)
    }

    /// The element's bit pattern.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The field this element belongs to.
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub const fn is_one(&self) -> bool {
        self.value == 1
    }

    /// Multiplicative inverse.
    ///
    /// # Errors
    ///
    /// See [`gf2m::invert`].
    pub fn inverse(&self) -> Result<Self> {
        let value = gf2m::invert(self.value, &self.config)?;
        Ok(Self { value, ..*self })
    }

    /// Division that reports a zero divisor instead of panicking.
    ///
    /// # Errors
    ///
    /// See [`gf2m::divide`].
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        self.assert_same_field(rhs);
        let value = gf2m::divide(self.value, rhs.value, &self.config)?;
        Ok(Self { value, ..*self })
    }

    /// Compute `self^exp`; `x^0` is one for every `x`.
    pub fn pow(&self, exp: u64) -> Self {
        Self {
            value: gf2m::power(self.value, exp, &self.config),
            ..*self
        }
    }

    /// Panics if the two elements belong to different fields.
    fn assert_same_field(&self, other: &Self) {
        assert!(
            self.config == other.config,
            "GF(2^m) elements must share the same field: {:?} vs {:?}",
            self.config,
            other.config
        );
    }

    fn with_value(&self, value: u32) -> Self {
        Self { value, ..*self }
    }
}

impl Add for Gf2m {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Add for &Gf2m {
    type Output = Gf2m;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_field(rhs);
        self.with_value(gf2m::add(self.value, rhs.value))
    }
}

impl Sub for Gf2m {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Sub for &Gf2m {
    type Output = Gf2m;

    /// Identical to addition in characteristic 2.
    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs
    }
}

impl Neg for Gf2m {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self
    }
}

impl Neg for &Gf2m {
    type Output = Gf2m;

    fn neg(self) -> Self::Output {
        *self
    }
}

impl Mul for Gf2m {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl Mul for &Gf2m {
    type Output = Gf2m;

    fn mul(self, rhs: Self) -> Self::Output {
        self.assert_same_field(rhs);
        self.with_value(gf2m::multiply(self.value, rhs.value, &self.config))
    }
}

impl Div for Gf2m {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on division by zero; use [`Gf2m::checked_div`] to get an error.
    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl Div for &Gf2m {
    type Output = Gf2m;

    fn div(self, rhs: Self) -> Self::Output {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(e) => panic!("division failed: {}", e),
        }
    }
}

impl fmt::Debug for Gf2m {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in GF(2^{})",
            format_hex(self.value, self.config.hex_width()),
            self.config.m()
        )
    }
}

impl fmt::Display for Gf2m {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hex(self.value, self.config.hex_width()))
    }
}

impl From<Gf2m> for u32 {
    fn from(element: Gf2m) -> u32 {
        element.value
    }
}

/// Uniform sampling: `rng.sample(config)` draws an element of the field.
#[cfg(feature = "rand")]
impl rand::distributions::Distribution<Gf2m> for FieldConfig {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Gf2m {
        Gf2m::new(rng.gen_range(0..self.order()), *self)
    }
}
