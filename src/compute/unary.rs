use polars::prelude::*;
use strum_macros::{Display, EnumString};

use crate::columnar::ChunkedArray;
use crate::error::ComputeError;

/// Named single-operand kernels, dispatched over a single column at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UnaryKernel {
    Neg,
    Abs,
    Sign,
    Sqrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Log1p,
    Ceil,
    Floor,
    Trunc,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Not,
    BitwiseNot,
    IsNull,
    IsValid,
    IsFinite,
    IsInf,
    IsNan,
}

impl UnaryKernel {
    pub fn apply(self, input: &ChunkedArray) -> Result<ChunkedArray, ComputeError> {
        tracing::trace!(kernel = %self, len = input.len(), "dispatching unary kernel");
        let series = input.series();
        let result = match self {
            UnaryKernel::Neg => (series * &Series::new("".into(), &[-1i64]))
                .map_err(|e| ComputeError::Backend(e.to_string()))?,
            UnaryKernel::Abs => series
                .abs()
                .map_err(|e| ComputeError::Backend(e.to_string()))?,
            UnaryKernel::Sign => map_f64(series, f64::signum)?,
            UnaryKernel::Sqrt => map_f64(series, f64::sqrt)?,
            UnaryKernel::Exp => map_f64(series, f64::exp)?,
            UnaryKernel::Ln => map_f64(series, f64::ln)?,
            UnaryKernel::Log10 => map_f64(series, f64::log10)?,
            UnaryKernel::Log2 => map_f64(series, f64::log2)?,
            UnaryKernel::Log1p => map_f64(series, f64::ln_1p)?,
            UnaryKernel::Ceil => map_f64(series, f64::ceil)?,
            UnaryKernel::Floor => map_f64(series, f64::floor)?,
            UnaryKernel::Trunc => map_f64(series, f64::trunc)?,
            UnaryKernel::Sin => map_f64(series, f64::sin)?,
            UnaryKernel::Cos => map_f64(series, f64::cos)?,
            UnaryKernel::Tan => map_f64(series, f64::tan)?,
            UnaryKernel::Asin => map_f64(series, f64::asin)?,
            UnaryKernel::Acos => map_f64(series, f64::acos)?,
            UnaryKernel::Atan => map_f64(series, f64::atan)?,
            UnaryKernel::Sinh => map_f64(series, f64::sinh)?,
            UnaryKernel::Cosh => map_f64(series, f64::cosh)?,
            UnaryKernel::Tanh => map_f64(series, f64::tanh)?,
            UnaryKernel::Asinh => map_f64(series, f64::asinh)?,
            UnaryKernel::Acosh => map_f64(series, f64::acosh)?,
            UnaryKernel::Atanh => map_f64(series, f64::atanh)?,
            UnaryKernel::Not => {
                let b = series
                    .bool()
                    .map_err(|e| ComputeError::Backend(e.to_string()))?;
                (!b).into_series()
            }
            UnaryKernel::BitwiseNot => {
                let casted = series
                    .cast(&DataType::Int64)
                    .map_err(|e| ComputeError::Backend(e.to_string()))?;
                let ca = casted
                    .i64()
                    .map_err(|e| ComputeError::Backend(e.to_string()))?;
                ca.apply_values(|v| !v).into_series()
            }
            UnaryKernel::IsNull => series.is_null().into_series(),
            UnaryKernel::IsValid => series.is_not_null().into_series(),
            UnaryKernel::IsFinite => series
                .is_finite()
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            UnaryKernel::IsInf => series
                .is_infinite()
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
            UnaryKernel::IsNan => series
                .is_nan()
                .map_err(|e| ComputeError::Backend(e.to_string()))?
                .into_series(),
        };
        Ok(ChunkedArray::from_series(result))
    }
}

/// Casts to `f64`, applies `f` elementwise (preserving the null mask), and
/// returns the result as a `Float64` series — the uniform numeric output type
/// every elementwise math kernel in this module produces.
fn map_f64(series: &Series, f: impl Fn(f64) -> f64) -> Result<Series, ComputeError> {
    let casted = series
        .cast(&DataType::Float64)
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    let ca = casted
        .f64()
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
    Ok(ca.apply_values(|v| f(v)).into_series())
}
