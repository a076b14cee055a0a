//! The NDFrame kernel: [`Series`] (1-D) and [`DataFrame`] (2-D), each an
//! [`crate::index::Index`] attached to columnar storage, with
//! arithmetic/comparison/logical/aggregation/cumulative/selection operations
//! dispatched through the compute registry after alignment.

mod dataframe;
mod series;

pub use dataframe::DataFrame;
pub use series::Series;

use crate::columnar::{ChunkedArray, Scalar};

pub(crate) fn scalars_to_named_array(name: &str, values: &[Scalar]) -> ChunkedArray {
    use polars::prelude::Series as PSeries;

    if values.iter().all(|v| matches!(v, Scalar::Int64(_) | Scalar::Null)) {
        let opts: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Scalar::Int64(i) => Some(*i),
                _ => None,
            })
            .collect();
        ChunkedArray::from_series(PSeries::new(name.into(), opts))
    } else if values.iter().all(|v| matches!(v, Scalar::Bool(_) | Scalar::Null)) {
        let opts: Vec<Option<bool>> = values
            .iter()
            .map(|v| match v {
                Scalar::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        ChunkedArray::from_series(PSeries::new(name.into(), opts))
    } else if values
        .iter()
        .all(|v| matches!(v, Scalar::Utf8(_) | Scalar::Null))
    {
        let opts: Vec<Option<String>> = values
            .iter()
            .map(|v| match v {
                Scalar::Utf8(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        ChunkedArray::from_series(PSeries::new(name.into(), opts))
    } else {
        let opts: Vec<Option<f64>> = values.iter().map(Scalar::as_f64).collect();
        ChunkedArray::from_series(PSeries::new(name.into(), opts))
    }
}
