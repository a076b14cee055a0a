//! Named compute-kernel dispatch over [`Datum`].
//!
//! Each kernel is a plain enum with an `apply` method rather than a trait per
//! operation, so [`crate::ndframe`] can dispatch by name without a method
//! per op.

mod aggregate;
mod binary;
mod cumulative;
mod unary;

pub use aggregate::{index_of, mode, quantile, tdigest, variance, AggKernel, Axis};
pub use binary::{round, round_binary, round_to_multiple, BinaryKernel, NullPropagation, RoundMode};
pub use cumulative::CumKernel;
pub use unary::UnaryKernel;

use crate::columnar::{ChunkedArray, Scalar, Table};
use crate::error::ComputeError;

/// The four shapes a kernel can operate over.
#[derive(Debug, Clone)]
pub enum Datum {
    Scalar(Scalar),
    Array(ChunkedArray),
    ChunkedArray(ChunkedArray),
    Table(Table),
}

impl Datum {
    pub fn len(&self) -> Option<usize> {
        match self {
            Datum::Scalar(_) => None,
            Datum::Array(a) | Datum::ChunkedArray(a) => Some(a.len()),
            Datum::Table(t) => Some(t.height()),
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Datum::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ChunkedArray> {
        match self {
            Datum::Array(a) | Datum::ChunkedArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Datum::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Three-valued (Kleene) logic used by [`BinaryKernel::And`]/[`BinaryKernel::Or`]
/// when an operand is null: a null only propagates when it cannot be
/// short-circuited by the other operand (e.g. `null AND false == false`).
pub fn kleene_and(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

pub fn kleene_or(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

pub fn kleene_xor(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a? ^ b?)
}

/// Strict (non-Kleene) null-propagating boolean ops: any null operand makes
/// the result null, regardless of the other operand's value.
pub fn strict_and(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a? && b?)
}

pub fn strict_or(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a? || b?)
}

pub fn strict_xor(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a? ^ b?)
}

pub fn require_same_len(left: &ChunkedArray, right: &ChunkedArray) -> Result<(), ComputeError> {
    if left.len() != right.len() {
        return Err(ComputeError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kleene_and_short_circuits_on_false() {
        assert_eq!(kleene_and(None, Some(false)), Some(false));
        assert_eq!(kleene_and(None, Some(true)), None);
    }

    #[test]
    fn kleene_or_short_circuits_on_true() {
        assert_eq!(kleene_or(None, Some(true)), Some(true));
        assert_eq!(kleene_or(None, Some(false)), None);
    }

    #[test]
    fn strict_and_propagates_null_even_with_a_false_operand() {
        assert_eq!(strict_and(None, Some(false)), None);
        assert_eq!(strict_and(Some(true), Some(true)), Some(true));
    }

    #[test]
    fn kleene_xor_is_null_only_when_an_operand_is_null() {
        assert_eq!(kleene_xor(Some(true), Some(false)), Some(true));
        assert_eq!(kleene_xor(None, Some(false)), None);
    }
}
