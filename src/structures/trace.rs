//! Step traces of field operations.
//!
//! Every `*_traced` operation in [`gf2m`](super::gf2m) reports its
//! intermediate values to a [`StepSink`]. Traces are purely observational:
//! the untraced operations run the same code with [`NoTrace`], and results
//! never depend on what the sink does.

use alloc::vec::Vec;

/// One micro-operation of a field computation.
///
/// Values are raw polynomial bit patterns; intermediate values of a
/// multiplication or reduction may be wider than `m` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Step {
    /// One bit of shift-and-add multiplication. `a` is never shifted in
    /// place, so `a_before == a_after`.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Mul {
        i: u32,
        b_bit: u32,
        a_before: u32,
        a_after: u32,
        p_before: u32,
        p_after: u32,
    },

    /// One XOR of the shifted modulus during reduction; `carry` is the shift.
    Reduce { carry: u32, before: u32, after: u32 },

    /// Net effect of a whole reduction.
    Mod { before: u32, after: u32 },

    /// One bit of square-and-multiply exponentiation.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Exp {
        bit: u32,
        base_before: u32,
        base_after: u32,
        acc_before: u32,
        acc_after: u32,
    },

    /// One step of the extended Euclidean algorithm: `a` and `b` are the
    /// remainders before the step, `q = x^shift` the partial quotient, `r` the
    /// new remainder, `t0` and `t1` the cofactors before the step.
    Egcd {
        a: u32,
        b: u32,
        q: u32,
        r: u32,
        t0: u32,
        t1: u32,
    },
}

impl Step {
    /// Short lowercase name of the variant.
    pub const fn kind(&self) -> &'static str {
        match self {
            Step::Mul { .. } => "mul",
            Step::Reduce { .. } => "reduce",
            Step::Mod { .. } => "mod",
            Step::Exp { .. } => "exp",
            Step::Egcd { .. } => "egcd",
        }
    }
}

/// Destination for [`Step`]s, appended in execution order.
pub trait StepSink {
    /// Append one step.
    fn record(&mut self, step: Step);
}

/// A sink that drops every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTrace;

impl StepSink for NoTrace {
    #[inline(always)]
    fn record(&mut self, _step: Step) {}
}

impl StepSink for Vec<Step> {
    #[inline]
    fn record(&mut self, step: Step) {
        self.push(step);
    }
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    #[inline]
    fn record(&mut self, step: Step) {
        (**self).record(step);
    }
}

impl<S: StepSink> StepSink for Option<S> {
    #[inline]
    fn record(&mut self, step: Step) {
        if let Some(sink) = self {
            sink.record(step);
        }
    }
}

/// A sink that emits every step as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl StepSink for LogSink {
    fn record(&mut self, step: Step) {
        tracing::trace!(kind = step.kind(), ?step, "field step");
    }
}

/// Counts steps of each kind without storing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub mul: usize,
    pub reduce: usize,
    pub modulo: usize,
    pub exp: usize,
    pub egcd: usize,
}

impl StepCounts {
    /// Total number of steps seen.
    pub const fn total(&self) -> usize {
        self.mul + self.reduce + self.modulo + self.exp + self.egcd
    }
}

impl StepSink for StepCounts {
    fn record(&mut self, step: Step) {
        match step {
            Step::Mul { .. } => self.mul += 1,
            Step::Reduce { .. } => self.reduce += 1,
            Step::Mod { .. } => self.modulo += 1,
            Step::Exp { .. } => self.exp += 1,
            Step::Egcd { .. } => self.egcd += 1,
        }
    }
}
