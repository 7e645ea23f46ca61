//! Presentation helpers: rendering and parsing polynomials and operands.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{FieldError, Result};
use crate::structures::config::FieldConfig;
use crate::structures::poly::degree;

/// Render a bit pattern as a polynomial in `x`, highest degree first.
///
/// ```
/// use polylab::format_poly;
///
/// assert_eq!(format_poly(0x11B), "x^8 + x^4 + x^3 + x + 1");
/// assert_eq!(format_poly(0b10), "x");
/// assert_eq!(format_poly(0), "0");
/// ```
pub fn format_poly(poly: u32) -> String {
    let Some(top) = degree(poly) else {
        return "0".to_string();
    };

    let terms: Vec<String> = (0..=top)
        .rev()
        .filter(|&i| (poly >> i) & 1 == 1)
        .map(|i| match i {
            0 => "1".to_string(),
            1 => "x".to_string(),
            _ => format!("x^{}", i),
        })
        .collect();
    terms.join(" + ")
}

/// Render `value` as `0x` followed by at least `width` uppercase hex digits.
///
/// ```
/// use polylab::format_hex;
///
/// assert_eq!(format_hex(0xA5, 2), "0xA5");
/// assert_eq!(format_hex(0x5, 2), "0x05");
/// assert_eq!(format_hex(0x11B, 2), "0x11B");
/// ```
pub fn format_hex(value: u32, width: usize) -> String {
    format!("0x{:0width$X}", value, width = width)
}

/// Parse a hexadecimal number with an optional `0x` prefix.
///
/// Surrounding whitespace is ignored and an empty string is zero.
///
/// # Errors
///
/// Returns `FieldError::InvalidOperand` if `input` is not hexadecimal or does
/// not fit in 32 bits.
pub fn parse_hex(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Ok(0);
    }
    u32::from_str_radix(digits, 16).map_err(|_| FieldError::InvalidOperand {
        input: input.to_string(),
    })
}

/// Parse a hexadecimal operand and mask it into the field.
///
/// ```
/// use polylab::{parse_operand, FieldConfig};
///
/// let gf16 = FieldConfig::with_default(4).unwrap();
/// assert_eq!(parse_operand("0x57", &gf16).unwrap(), 0x7);
/// ```
///
/// # Errors
///
/// See [`parse_hex`].
pub fn parse_operand(input: &str, cfg: &FieldConfig) -> Result<u32> {
    parse_hex(input).map(|v| cfg.reduce_bits(v))
}

/// Parse a non-negative decimal exponent. An empty string is zero.
///
/// # Errors
///
/// Returns `FieldError::InvalidOperand` if `input` is not a decimal `u64`.
pub fn parse_exponent(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| FieldError::InvalidOperand {
        input: input.to_string(),
    })
}
