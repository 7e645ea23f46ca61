//! Field configuration: the degree `m` and the modulus polynomial.

use core::fmt;
use core::ops::RangeInclusive;

use crate::error::{FieldError, Result};
use crate::structures::poly;
use crate::utils::format_poly;

/// Supported field degrees.
pub const FIELD_SIZES: RangeInclusive<u32> = 2..=8;

/// Default irreducible polynomial for every supported `m`.
///
/// Encoded as a bitmask where bit `i` is the coefficient of `x^i`.
pub const DEFAULT_MODULI: [(u32, u32); 7] = [
    (2, 0x7),   // x^2 + x + 1
    (3, 0xB),   // x^3 + x + 1
    (4, 0x13),  // x^4 + x + 1
    (5, 0x25),  // x^5 + x^2 + 1
    (6, 0x43),  // x^6 + x + 1
    (7, 0x89),  // x^7 + x^3 + 1
    (8, 0x11B), // x^8 + x^4 + x^3 + x + 1 (AES)
];

/// Look up the default modulus for a field of degree `m`.
///
/// ```
/// use polylab::default_modulus;
///
/// assert_eq!(default_modulus(8), Some(0x11B));
/// assert_eq!(default_modulus(9), None);
/// ```
pub fn default_modulus(m: u32) -> Option<u32> {
    DEFAULT_MODULI
        .iter()
        .find(|&&(size, _)| size == m)
        .map(|&(_, modulus)| modulus)
}

/// A validated description of GF(2^m).
///
/// The fields are private and every constructor validates them, so a value
/// of this type always carries `2 <= m <= 8` and a modulus of degree exactly
/// `m`. Irreducibility is only checked by [`FieldConfig::new_checked`];
/// with a reducible modulus multiplication still works but inversion may
/// fail with [`FieldError::NotInvertible`].
///
/// # Example
///
/// ```
/// use polylab::FieldConfig;
///
/// let aes = FieldConfig::new(8, 0x11B).unwrap();
/// assert_eq!(aes.m(), 8);
/// assert_eq!(aes.mask(), 0xFF);
///
/// assert!(FieldConfig::new(9, 0x211).is_err());
/// assert!(FieldConfig::new(8, 0x1B).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFieldConfig", rename_all = "camelCase")
)]
pub struct FieldConfig {
    m: u32,
    mod_poly: u32,
}

impl FieldConfig {
    /// Validate `m` and the modulus without testing irreducibility.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidFieldSize` if `m` is outside `2..=8`.
    /// Returns `FieldError::InvalidModulus` if `mod_poly` is zero or its
    /// degree is not `m`.
    pub fn new(m: u32, mod_poly: u32) -> Result<Self> {
        if !FIELD_SIZES.contains(&m) {
            tracing::debug!(m, "rejected field size");
            return Err(FieldError::InvalidFieldSize { m });
        }

        if poly::degree(mod_poly) != Some(m) {
            tracing::debug!(m, mod_poly, "rejected modulus of wrong degree");
            return Err(FieldError::InvalidModulus {
                m,
                modulus: mod_poly,
            });
        }

        Ok(Self { m, mod_poly })
    }

    /// Validate like [`FieldConfig::new`] and additionally require the
    /// modulus to be irreducible.
    ///
    /// # Errors
    ///
    /// Everything [`FieldConfig::new`] returns, plus
    /// `FieldError::ReducibleModulus` for a reducible modulus.
    pub fn new_checked(m: u32, mod_poly: u32) -> Result<Self> {
        let config = Self::new(m, mod_poly)?;
        if !poly::is_irreducible(mod_poly) {
            tracing::debug!(m, mod_poly, "rejected reducible modulus");
            return Err(FieldError::ReducibleModulus { modulus: mod_poly });
        }
        Ok(config)
    }

    /// The field of degree `m` with its default modulus from [`DEFAULT_MODULI`].
    ///
    /// # Errors
    ///
    /// Returns `FieldError::InvalidFieldSize` if `m` is outside `2..=8`.
    pub fn with_default(m: u32) -> Result<Self> {
        let mod_poly = default_modulus(m).ok_or(FieldError::InvalidFieldSize { m })?;
        Self::new(m, mod_poly)
    }

    /// Every default field, smallest first.
    pub fn defaults() -> impl Iterator<Item = Self> {
        DEFAULT_MODULI
            .iter()
            .map(|&(m, mod_poly)| Self { m, mod_poly })
    }

    /// The field degree `m`.
    pub const fn m(&self) -> u32 {
        self.m
    }

    /// The modulus polynomial.
    pub const fn mod_poly(&self) -> u32 {
        self.mod_poly
    }

    /// Bitmask selecting the low `m` bits.
    pub const fn mask(&self) -> u32 {
        (1 << self.m) - 1
    }

    /// Mask `value` into the field.
    #[inline]
    pub const fn reduce_bits(&self, value: u32) -> u32 {
        value & self.mask()
    }

    /// Number of field elements, `2^m`.
    pub const fn order(&self) -> u32 {
        1 << self.m
    }

    /// Order of the multiplicative group, `2^m - 1`.
    pub const fn group_order(&self) -> u32 {
        self.mask()
    }

    /// Number of hex digits needed to print any element.
    pub const fn hex_width(&self) -> usize {
        self.m.div_ceil(4) as usize
    }

    /// Every element of the field in ascending order.
    pub fn elements(&self) -> impl Iterator<Item = u32> {
        0..self.order()
    }

    /// Every non-zero element of the field in ascending order.
    pub fn nonzero_elements(&self) -> impl Iterator<Item = u32> {
        1..self.order()
    }
}

impl Default for FieldConfig {
    /// The AES field GF(2^8) with modulus `0x11B`.
    fn default() -> Self {
        Self {
            m: 8,
            mod_poly: 0x11B,
        }
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldConfig(m = {}, mod_poly = {:#x})", self.m, self.mod_poly)
    }
}

impl fmt::Display for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(2^{}) mod {}", self.m, format_poly(self.mod_poly))
    }
}

impl TryFrom<(u32, u32)> for FieldConfig {
    type Error = FieldError;

    fn try_from((m, mod_poly): (u32, u32)) -> Result<Self> {
        Self::new(m, mod_poly)
    }
}

/// Unvalidated wire form; deserialization goes through [`FieldConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldConfig {
    m: u32,
    mod_poly: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFieldConfig> for FieldConfig {
    type Error = FieldError;

    fn try_from(raw: RawFieldConfig) -> Result<Self> {
        Self::new(raw.m, raw.mod_poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_irreducible() {
        for (m, modulus) in DEFAULT_MODULI {
            let config = FieldConfig::new_checked(m, modulus).unwrap();
            assert_eq!(config.m(), m);
            assert_eq!(config.mod_poly(), modulus);
        }
    }

    #[test]
    fn defaults_iterator_covers_all_sizes() {
        let sizes: Vec<u32> = FieldConfig::defaults().map(|c| c.m()).collect();
        assert_eq!(sizes, FIELD_SIZES.collect::<Vec<_>>());
    }

    #[test]
    fn with_default_matches_table() {
        assert_eq!(FieldConfig::with_default(8).unwrap(), FieldConfig::default());
        assert_eq!(FieldConfig::with_default(5).unwrap().mod_poly(), 0x25);
        assert_eq!(
            FieldConfig::with_default(1),
            Err(FieldError::InvalidFieldSize { m: 1 })
        );
    }

    #[test]
    fn rejects_field_size_out_of_range() {
        assert_eq!(
            FieldConfig::new(1, 0b11),
            Err(FieldError::InvalidFieldSize { m: 1 })
        );
        assert_eq!(
            FieldConfig::new(9, 0x211),
            Err(FieldError::InvalidFieldSize { m: 9 })
        );
    }

    #[test]
    fn rejects_zero_modulus() {
        assert_eq!(
            FieldConfig::new(4, 0),
            Err(FieldError::InvalidModulus { m: 4, modulus: 0 })
        );
    }

    #[test]
    fn rejects_wrong_degree() {
        // degree 7 for m = 8
        assert!(matches!(
            FieldConfig::new(8, 0x89),
            Err(FieldError::InvalidModulus { m: 8, .. })
        ));
        // bit above m set
        assert!(matches!(
            FieldConfig::new(4, 0x33),
            Err(FieldError::InvalidModulus { m: 4, .. })
        ));
    }

    #[test]
    fn new_skips_irreducibility() {
        // x^4 + 1 = (x + 1)^4
        assert!(FieldConfig::new(4, 0x11).is_ok());
        assert_eq!(
            FieldConfig::new_checked(4, 0x11),
            Err(FieldError::ReducibleModulus { modulus: 0x11 })
        );
    }

    #[test]
    fn new_checked_still_checks_degree() {
        assert!(matches!(
            FieldConfig::new_checked(8, 0x13),
            Err(FieldError::InvalidModulus { .. })
        ));
    }

    #[test]
    fn derived_sizes() {
        let config = FieldConfig::with_default(5).unwrap();
        assert_eq!(config.mask(), 0x1F);
        assert_eq!(config.order(), 32);
        assert_eq!(config.group_order(), 31);
        assert_eq!(config.hex_width(), 2);
        assert_eq!(config.reduce_bits(0xFF), 0x1F);
        assert_eq!(config.elements().count(), 32);
        assert_eq!(config.nonzero_elements().next(), Some(1));

        assert_eq!(FieldConfig::with_default(3).unwrap().hex_width(), 1);
        assert_eq!(FieldConfig::with_default(8).unwrap().hex_width(), 2);
    }

    #[test]
    fn try_from_tuple() {
        let config: FieldConfig = (3, 0xB).try_into().unwrap();
        assert_eq!(config.mod_poly(), 0xB);
        assert!(FieldConfig::try_from((3, 0x13)).is_err());
    }

    #[test]
    fn display_and_debug() {
        let config = FieldConfig::default();
        assert_eq!(config.to_string(), "GF(2^8) mod x^8 + x^4 + x^3 + x + 1");
        assert_eq!(format!("{:?}", config), "FieldConfig(m = 8, mod_poly = 0x11b)");
    }
}
