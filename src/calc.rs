//! One-shot calculator requests on top of the field operations.
//!
//! A [`Calculation`] names an [`Operation`], its operands, and the field to
//! run in. Evaluating it dispatches to [`gf2m`](crate::structures::gf2m), and
//! [`Calculation::record`] produces a [`CalculationRecord`] that callers can
//! keep as history. Storing records is up to the caller.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::{FieldError, Result};
use crate::structures::config::FieldConfig;
use crate::structures::gf2m;
use crate::structures::trace::{NoTrace, StepSink};

/// The operations a calculator exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Operation {
    Add,
    /// Same as `Add` in characteristic 2.
    Sub,
    Mul,
    Div,
    Inv,
    Pow,
    /// Reduce the `a` operand modulo the field's modulus.
    Mod,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Inv,
        Operation::Pow,
        Operation::Mod,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
            Operation::Inv => "inv",
            Operation::Pow => "pow",
            Operation::Mod => "mod",
        }
    }

    /// Whether the operation reads the second operand `b`.
    pub const fn uses_b(&self) -> bool {
        matches!(
            self,
            Operation::Add | Operation::Sub | Operation::Mul | Operation::Div
        )
    }

    /// Whether the operation reads the exponent.
    pub const fn uses_exponent(&self) -> bool {
        matches!(self, Operation::Pow)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FieldError::InvalidOperand {
                input: s.to_string(),
            })
    }
}

/// A single calculator request.
///
/// Operands the operation does not use are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculation {
    pub config: FieldConfig,
    pub op: Operation,
    pub a: u32,
    pub b: u32,
    pub exponent: u64,
}

impl Calculation {
    /// A request with zeroed operands; fill them in with the builder methods.
    pub const fn new(config: FieldConfig, op: Operation) -> Self {
        Self {
            config,
            op,
            a: 0,
            b: 0,
            exponent: 0,
        }
    }

    pub fn with_a(mut self, a: u32) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u32) -> Self {
        self.b = b;
        self
    }

    pub fn with_exponent(mut self, exponent: u64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Evaluate without a trace.
    ///
    /// # Errors
    ///
    /// `Div` and `Inv` fail as [`gf2m::divide`] and [`gf2m::invert`] do.
    pub fn evaluate(&self) -> Result<u32> {
        self.evaluate_traced(&mut NoTrace)
    }

    /// Evaluate, sending the operation's steps to `sink`.
    ///
    /// `Add` and `Sub` produce no steps. `Mod` reduces `a` as given; every
    /// other operation masks its operands to `m` bits first.
    ///
    /// # Errors
    ///
    /// See [`Calculation::evaluate`].
    #[tracing::instrument(level = "debug", skip_all, fields(op = %self.op, m = self.config.m()))]
    pub fn evaluate_traced<S: StepSink + ?Sized>(&self, sink: &mut S) -> Result<u32> {
        let cfg = &self.config;
        let a = cfg.reduce_bits(self.a);
        let b = cfg.reduce_bits(self.b);

        let result = match self.op {
            Operation::Add | Operation::Sub => gf2m::add(a, b),
            Operation::Mul => gf2m::multiply_traced(a, b, cfg, sink),
            Operation::Div => gf2m::divide_traced(a, b, cfg, sink)?,
            Operation::Inv => gf2m::invert_traced(a, cfg, sink)?,
            Operation::Pow => gf2m::power_traced(a, self.exponent, cfg, sink),
            Operation::Mod => gf2m::reduce_traced(self.a, cfg, sink),
        };

        tracing::debug!(result, "calculation finished");
        Ok(result)
    }

    /// Evaluate and describe the finished calculation.
    ///
    /// # Errors
    ///
    /// See [`Calculation::evaluate`].
    pub fn record(&self) -> Result<CalculationRecord> {
        let result = self.evaluate()?;
        let a = match self.op {
            Operation::Mod => self.a,
            _ => self.config.reduce_bits(self.a),
        };

        Ok(CalculationRecord {
            m: self.config.m(),
            mod_poly: self.config.mod_poly(),
            op: self.op,
            a,
            b: self.op.uses_b().then(|| self.config.reduce_bits(self.b)),
            n: self.op.uses_exponent().then_some(self.exponent),
            result,
        })
    }
}

/// A finished calculation, carrying only the operands its operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalculationRecord {
    pub m: u32,
    pub mod_poly: u32,
    pub op: Operation,
    pub a: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub b: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub n: Option<u64>,
    pub result: u32,
}

impl CalculationRecord {
    /// Rebuild the request so it can be run again.
    ///
    /// # Errors
    ///
    /// Returns the configuration error if the stored field is invalid.
    pub fn to_calculation(&self) -> Result<Calculation> {
        let config = FieldConfig::new(self.m, self.mod_poly)?;
        Ok(Calculation {
            config,
            op: self.op,
            a: self.a,
            b: self.b.unwrap_or(0),
            exponent: self.n.unwrap_or(0),
        })
    }
}
