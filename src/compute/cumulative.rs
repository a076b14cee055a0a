use polars::prelude::*;
use strum_macros::{Display, EnumString};

use crate::columnar::ChunkedArray;
use crate::error::ComputeError;

/// Named running-reduction kernels, identity-preserving on an empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CumKernel {
    Sum,
    Mean,
    Max,
    Min,
    Prod,
}

impl CumKernel {
    /// Runs with the default policy: nulls are skipped (the running value
    /// carries through a null position without resetting) and no seed value.
    pub fn apply(self, input: &ChunkedArray) -> Result<ChunkedArray, ComputeError> {
        tracing::trace!(kernel = %self, len = input.len(), "dispatching cumulative kernel");
        if self == CumKernel::Mean {
            return self.apply_with(input, true, None);
        }
        let s = input.series();
        let result = match self {
            CumKernel::Sum => s.cumsum(false),
            CumKernel::Max => s.cummax(false),
            CumKernel::Min => s.cummin(false),
            CumKernel::Prod => s.cumprod(false),
            CumKernel::Mean => unreachable!("handled above"),
        }
        .map_err(|e| ComputeError::Backend(e.to_string()))?;
        Ok(ChunkedArray::from_series(result))
    }

    /// Runs with explicit `skip_nulls`/`start` policy, always producing a
    /// `Float64` result.
    ///
    /// `skip_nulls = true`: a null input leaves a null at its own position but
    /// does not reset the running accumulator — the next valid value
    /// continues from the last one seen. `skip_nulls = false`: the first null
    /// poisons every later position, which stays null for the rest of the run.
    /// `start`, if given, seeds the accumulator before the first element.
    pub fn apply_with(
        self,
        input: &ChunkedArray,
        skip_nulls: bool,
        start: Option<f64>,
    ) -> Result<ChunkedArray, ComputeError> {
        let series = input
            .series()
            .cast(&DataType::Float64)
            .map_err(|e| ComputeError::Backend(e.to_string()))?;
        let ca = series.f64().map_err(|e| ComputeError::Backend(e.to_string()))?;

        let mut sum = start.unwrap_or(0.0);
        let mut count: u64 = if start.is_some() { 1 } else { 0 };
        let mut prod = start.unwrap_or(1.0);
        let mut extreme = start;
        let mut poisoned = false;

        let mut out: Vec<Option<f64>> = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            if poisoned {
                out.push(None);
                continue;
            }
            match v {
                Some(x) => {
                    sum += x;
                    count += 1;
                    prod *= x;
                    extreme = Some(match extreme {
                        None => x,
                        Some(e) if self == CumKernel::Max => e.max(x),
                        Some(e) if self == CumKernel::Min => e.min(x),
                        Some(e) => e,
                    });
                    let value = match self {
                        CumKernel::Sum => sum,
                        CumKernel::Mean => sum / count as f64,
                        CumKernel::Max | CumKernel::Min => extreme.unwrap(),
                        CumKernel::Prod => prod,
                    };
                    out.push(Some(value));
                }
                None => {
                    out.push(None);
                    if !skip_nulls {
                        poisoned = true;
                    }
                }
            }
        }
        let out_ca: Float64Chunked = out.into_iter().collect();
        Ok(ChunkedArray::from_series(out_ca.into_series()))
    }
}
