use polars::prelude::*;
use strum_macros::{Display, EnumString};

use super::require_same_len;
use crate::columnar::ChunkedArray;
use crate::error::ComputeError;

/// How a binary kernel should treat a null operand.
///
/// `Propagate` is the default for arithmetic/comparison kernels (null in,
/// null out). `Kleene` applies three-valued logic and is used by `And`/`Or`/`Xor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPropagation {
    Propagate,
    Kleene,
}

/// Named two-operand kernels, dispatched column-to-column.
///
/// The `R`-prefixed variants (`RSub`, `RDiv`, `RRem`, `RPow`) apply the
/// operator with operands swapped — `RSub.apply(a, b)` computes `b - a` — for
/// the common case of a column on the right of a non-commutative operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BinaryKernel {
    Add,
    Sub,
    RSub,
    Mul,
    Div,
    RDiv,
    Rem,
    RRem,
    Pow,
    RPow,
    Logb,
    Atan2,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Xor,
    AndStrict,
    OrStrict,
    XorStrict,
}

impl BinaryKernel {
    pub fn null_propagation(self) -> NullPropagation {
        match self {
            BinaryKernel::And | BinaryKernel::Or | BinaryKernel::Xor => NullPropagation::Kleene,
            _ => NullPropagation::Propagate,
        }
    }

    pub fn apply(
        self,
        left: &ChunkedArray,
        right: &ChunkedArray,
    ) -> Result<ChunkedArray, ComputeError> {
        require_same_len(left, right)?;
        tracing::trace!(kernel = %self, len = left.len(), "dispatching binary kernel");
        let (l, r) = (left.series(), right.series());
        let result = match self {
            BinaryKernel::Add => (l + r).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::Sub => (l - r).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::RSub => (r - l).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::Mul => (l * r).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::Div => (l / r).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::RDiv => (r / l).map_err(|e| ComputeError::Backend(e.to_string()))?,
            BinaryKernel::Rem => map_f64_pair(l, r, |a, b| a % b)?,
            BinaryKernel::RRem => map_f64_pair(l, r, |a, b| b % a)?,
            BinaryKernel::Pow => map_f64_pair(l, r, f64::powf)?,
            BinaryKernel::RPow => map_f64_pair(l, r, |a, b| b.powf(a))?,
            BinaryKernel::Logb => map_f64_pair(l, r, |a, base| a.log(base))?,
            BinaryKernel::Atan2 => map_f64_pair(l, r, |y, x| y.atan2(x))?,
            BinaryKernel::BitAnd => map_i64_pair(l, r, |a, b| a & b)?,
            BinaryKernel::BitOr => map_i64_pair(l, r, |a, b| a | b)?,
            BinaryKernel::BitXor => map_i64_pair(l, r, |a, b| a ^ b)?,
            BinaryKernel::Shl => map_i64_pair(l, r, |a, b| a << b)?,
            BinaryKernel::Shr => map_i64_pair(l, r, |a, b| a >> b)?,
            BinaryKernel::Eq => l
                .equal(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::Ne => l
                .not_equal(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::Lt => l
                .lt(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::Le => l
                .lt_eq(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::Gt => l
                .gt(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::Ge => l
                .gt_eq(r)
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            BinaryKernel::And => self.bool_pair(l, r, super::kleene_and)?,
            BinaryKernel::Or => self.bool_pair(l, r, super::kleene_or)?,
            BinaryKernel::Xor => self.bool_pair(l, r, super::kleene_xor)?,
            BinaryKernel::AndStrict => self.bool_pair(l, r, super::strict_and)?,
            BinaryKernel::OrStrict => self.bool_pair(l, r, super::strict_or)?,
            BinaryKernel::XorStrict => self.bool_pair(l, r, super::strict_xor)?,
        };
        Ok(ChunkedArray::from_series(result))
    }

    fn bool_pair(
        self,
        l: &Series,
        r: &Series,
        op: fn(Option<bool>, Option<bool>) -> Option<bool>,
    ) -> Result<Series, ComputeError> {
        let lb = l.bool().map_err(|e| ComputeError::Backend(e.to_string()))?;
        let rb = r.bool().map_err(|e| ComputeError::Backend(e.to_string()))?;
        let out: BooleanChunked = lb
            .into_iter()
            .zip(rb.into_iter())
            .map(|(a, b)| op(a, b))
            .collect();
        Ok(out.into_series())
    }
}

fn map_f64_pair(l: &Series, r: &Series, f: impl Fn(f64, f64) -> f64) -> Result<Series, ComputeError> {
    let lf = l
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let rf = r
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let lca = lf.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let rca = rf.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let out: Float64Chunked = lca
        .into_iter()
        .zip(rca.into_iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(f(a, b)),
            _ => None,
        })
        .collect();
    Ok(out.into_series())
}

fn map_i64_pair(l: &Series, r: &Series, f: impl Fn(i64, i64) -> i64) -> Result<Series, ComputeError> {
    let li = l
        .cast(&DataType::Int64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let ri = r
        .cast(&DataType::Int64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let lca = li.i64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let rca = ri.i64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let out: Int64Chunked = lca
        .into_iter()
        .zip(rca.into_iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(f(a, b)),
            _ => None,
        })
        .collect();
    Ok(out.into_series())
}

/// Seven decimal rounding policies, matching Python's `decimal` module
/// (`ROUND_CEILING`, ..., `ROUND_HALF_EVEN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RoundMode {
    Ceiling,
    Floor,
    Up,
    Down,
    HalfUp,
    HalfDown,
    HalfEven,
}

fn round_magnitude(magnitude: f64, mode: RoundMode) -> f64 {
    let floor = magnitude.floor();
    let frac = magnitude - floor;
    match mode {
        RoundMode::Up => magnitude.ceil(),
        RoundMode::Down => floor,
        RoundMode::HalfUp => {
            if frac >= 0.5 {
                floor + 1.0
            } else {
                floor
            }
        }
        RoundMode::HalfDown => {
            if frac > 0.5 {
                floor + 1.0
            } else {
                floor
            }
        }
        RoundMode::HalfEven => {
            if frac < 0.5 {
                floor
            } else if frac > 0.5 {
                floor + 1.0
            } else if (floor as i64) % 2 == 0 {
                floor
            } else {
                floor + 1.0
            }
        }
        RoundMode::Ceiling | RoundMode::Floor => unreachable!("handled by caller before scaling"),
    }
}

/// Rounds `v` to the nearest multiple of `1.0` under `mode`. `Ceiling`/`Floor`
/// round toward +/-infinity directly rather than through magnitude; the rest
/// round the absolute value and restore the sign.
fn round_value(v: f64, mode: RoundMode) -> f64 {
    match mode {
        RoundMode::Ceiling => v.ceil(),
        RoundMode::Floor => v.floor(),
        _ => round_magnitude(v.abs(), mode) * v.signum(),
    }
}

/// Rounds each value to `decimals` decimal places.
pub fn round(input: &ChunkedArray, decimals: i32, mode: RoundMode) -> Result<ChunkedArray, ComputeError> {
    let factor = 10f64.powi(decimals);
    let series = input
        .series()
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let ca = series.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let out = ca.apply_values(|v| round_value(v * factor, mode) / factor);
    Ok(ChunkedArray::from_series(out.into_series()))
}

/// Rounds each value to the nearest multiple of `multiple`.
pub fn round_to_multiple(
    input: &ChunkedArray,
    multiple: f64,
    mode: RoundMode,
) -> Result<ChunkedArray, ComputeError> {
    let series = input
        .series()
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let ca = series.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let out = ca.apply_values(|v| round_value(v / multiple, mode) * multiple);
    Ok(ChunkedArray::from_series(out.into_series()))
}

/// Rounds each value to a per-row decimal-places count carried by `decimals`.
pub fn round_binary(
    input: &ChunkedArray,
    decimals: &ChunkedArray,
    mode: RoundMode,
) -> Result<ChunkedArray, ComputeError> {
    require_same_len(input, decimals)?;
    let values = input
        .series()
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let places = decimals
        .series()
        .cast(&DataType::Int32)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let vca = values.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let pca = places.i32().map_err(|e| ComputeError::Backend(e.to_string()))?;
    let out: Float64Chunked = vca
        .into_iter()
        .zip(pca.into_iter())
        .map(|(v, p)| match (v, p) {
            (Some(v), Some(p)) => {
                let factor = 10f64.powi(p);
                Some(round_value(v * factor, mode) / factor)
            }
            _ => None,
        })
        .collect();
    Ok(ChunkedArray::from_series(out.into_series()))
}
