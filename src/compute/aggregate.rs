use polars::prelude::*;
use rayon::prelude::*;
use strum_macros::{Display, EnumString};

use crate::columnar::{ChunkedArray, Scalar, Table};
use crate::config::config;
use crate::error::ComputeError;

/// Which direction a [`Table`] aggregation collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    /// Reduce across rows within each column: one result per column.
    Row,
    /// Reduce across columns within each row: one result per row.
    Column,
}

/// Named reduction kernels taking no extra parameters. Kernels that need one
/// (`quantile`, `variance(ddof)`, `tdigest`, `mode(n)`, `index(v)`) are free
/// functions below instead, since a parameterized variant can't round-trip
/// through the `Display`/`EnumString` name dispatch the rest of this module
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AggKernel {
    Sum,
    Mean,
    Min,
    Max,
    Product,
    All,
    Any,
    CountAll,
    CountValid,
    CountNull,
    First,
    Last,
    Std,
    ApproximateMedian,
}

impl AggKernel {
    /// Reduces with the default policy: nulls are skipped.
    pub fn apply_array(self, input: &ChunkedArray) -> Result<Scalar, ComputeError> {
        self.apply_array_with(input, true)
    }

    /// Reduces with an explicit null policy: when `skip_nulls` is false, any
    /// null anywhere in `input` makes the whole reduction null, matching the
    /// convention used by most columnar engines for strict aggregation.
    pub fn apply_array_with(self, input: &ChunkedArray, skip_nulls: bool) -> Result<Scalar, ComputeError> {
        tracing::trace!(kernel = %self, len = input.len(), skip_nulls, "dispatching array aggregation");
        if !skip_nulls && input.len() > 0 && input.null_count() > 0 {
            return Ok(Scalar::Null);
        }
        let s = input.series();
        match self {
            AggKernel::CountAll => return Ok(Scalar::Int64(s.len() as i64)),
            AggKernel::CountValid => return Ok(Scalar::Int64((s.len() - s.null_count()) as i64)),
            AggKernel::CountNull => return Ok(Scalar::Int64(s.null_count() as i64)),
            _ => {}
        }
        let values: Vec<Scalar> = (0..input.len())
            .map(|i| input.get(i))
            .collect::<Result<_, ComputeError>>()?;
        self.reduce_scalars(&values)
            .ok_or(ComputeError::Backend("reduction over an empty array".into()))
    }

    pub fn apply_table(self, table: &Table, axis: Axis) -> Result<ChunkedArray, ComputeError> {
        tracing::debug!(kernel = %self, %axis, width = table.width(), height = table.height(), "dispatching table aggregation");
        match axis {
            // Reduce across rows within each column: one scalar per column.
            Axis::Row => {
                let names = table.column_names();
                let columns: Vec<ChunkedArray> = names
                    .iter()
                    .map(|name| table.column(name))
                    .collect::<Result<_, ComputeError>>()?;
                // Each column reduces independently, so above the configured
                // width the rayon pool amortizes better than a sequential pass.
                let values: Vec<Scalar> = if columns.len() >= config().parallel_column_threshold {
                    columns
                        .par_iter()
                        .map(|col| self.apply_array(col))
                        .collect::<Result<_, ComputeError>>()?
                } else {
                    columns
                        .iter()
                        .map(|col| self.apply_array(col))
                        .collect::<Result<_, ComputeError>>()?
                };
                scalars_to_array(&values)
            }
            // Reduce across columns within each row: one scalar per row.
            Axis::Column => {
                let height = table.height();
                let columns: Vec<ChunkedArray> = table
                    .column_names()
                    .iter()
                    .map(|n| table.column(n))
                    .collect::<Result<_, ComputeError>>()?;
                let mut out = Vec::with_capacity(height);
                for row in 0..height {
                    let row_values: Vec<Scalar> = columns
                        .iter()
                        .map(|c| c.get(row))
                        .collect::<Result<_, ComputeError>>()?;
                    out.push(self.reduce_scalars(&row_values).unwrap_or(Scalar::Null));
                }
                scalars_to_array(&out)
            }
        }
    }

    /// Folds `values` directly (used by the row-axis path, and shared by
    /// `apply_array` via a borrowed materialization). Returns `None` only when
    /// the reduction is undefined on an empty input and there's no sane zero
    /// value to fall back on (e.g. `First`/`Last`/`ApproximateMedian`).
    fn reduce_scalars(self, values: &[Scalar]) -> Option<Scalar> {
        match self {
            AggKernel::CountAll => return Some(Scalar::Int64(values.len() as i64)),
            AggKernel::CountValid => {
                return Some(Scalar::Int64(values.iter().filter(|v| v.is_valid()).count() as i64))
            }
            AggKernel::CountNull => {
                return Some(Scalar::Int64(values.iter().filter(|v| v.is_null()).count() as i64))
            }
            AggKernel::First => return values.iter().find(|v| v.is_valid()).cloned().or(Some(Scalar::Null)),
            AggKernel::Last => {
                return values.iter().rev().find(|v| v.is_valid()).cloned().or(Some(Scalar::Null))
            }
            AggKernel::All => {
                let bools: Vec<bool> = values.iter().filter_map(Scalar::as_bool).collect();
                return Some(Scalar::Bool(bools.iter().all(|&b| b)));
            }
            AggKernel::Any => {
                let bools: Vec<bool> = values.iter().filter_map(Scalar::as_bool).collect();
                return Some(Scalar::Bool(bools.iter().any(|&b| b)));
            }
            _ => {}
        }

        let nums: Vec<f64> = values.iter().filter_map(Scalar::as_f64).collect();
        if nums.is_empty() {
            return match self {
                AggKernel::CountAll | AggKernel::CountValid | AggKernel::CountNull => {
                    Some(Scalar::Int64(0))
                }
                _ => None,
            };
        }
        Some(match self {
            AggKernel::Sum => Scalar::Float64(nums.iter().sum()),
            AggKernel::Mean => Scalar::Float64(nums.iter().sum::<f64>() / nums.len() as f64),
            AggKernel::Min => Scalar::Float64(nums.iter().cloned().fold(f64::INFINITY, f64::min)),
            AggKernel::Max => {
                Scalar::Float64(nums.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
            }
            AggKernel::Product => Scalar::Float64(nums.iter().product()),
            AggKernel::Std => Scalar::Float64(sample_std(&nums)),
            AggKernel::ApproximateMedian => Scalar::Float64(sorted_quantile(&nums, 0.5)),
            AggKernel::CountAll | AggKernel::CountValid | AggKernel::CountNull | AggKernel::First
            | AggKernel::Last | AggKernel::All | AggKernel::Any => unreachable!("handled above"),
        })
    }
}

fn sample_std(nums: &[f64]) -> f64 {
    let mean = nums.iter().sum::<f64>() / nums.len() as f64;
    let var = nums.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nums.len().max(2) - 1) as f64;
    var.sqrt()
}

fn sorted_quantile(nums: &[f64], q: f64) -> f64 {
    let mut sorted = nums.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Sample variance with `ddof` degrees of freedom subtracted from the count
/// (`ddof = 1` is the usual unbiased estimator; `ddof = 0` is the population
/// variance).
pub fn variance(input: &ChunkedArray, ddof: usize, skip_nulls: bool) -> Result<Scalar, ComputeError> {
    if !skip_nulls && input.len() > 0 && input.null_count() > 0 {
        return Ok(Scalar::Null);
    }
    let nums: Vec<f64> = (0..input.len())
        .map(|i| input.get(i))
        .collect::<Result<Vec<_>, ComputeError>>()?
        .into_iter()
        .filter_map(|v| v.as_f64())
        .collect();
    if nums.len() <= ddof {
        return Ok(Scalar::Null);
    }
    let mean = nums.iter().sum::<f64>() / nums.len() as f64;
    let var = nums.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nums.len() - ddof) as f64;
    Ok(Scalar::Float64(var))
}

/// The `q`-th quantile (`q` in `[0, 1]`) via linear interpolation between the
/// two nearest order statistics.
pub fn quantile(input: &ChunkedArray, q: f64) -> Result<Scalar, ComputeError> {
    let nums: Vec<f64> = (0..input.len())
        .map(|i| input.get(i))
        .collect::<Result<Vec<_>, ComputeError>>()?
        .into_iter()
        .filter_map(|v| v.as_f64())
        .collect();
    if nums.is_empty() {
        return Ok(Scalar::Null);
    }
    Ok(Scalar::Float64(sorted_quantile(&nums, q)))
}

/// Approximate `q`-th quantile. A true t-digest keeps a compressed sketch of
/// the distribution; at this crate's scale a full in-memory sort is cheap
/// enough that the "approximate" kernel and the exact one share an
/// implementation.
pub fn tdigest(input: &ChunkedArray, q: f64) -> Result<Scalar, ComputeError> {
    quantile(input, q)
}

/// The `n` most frequent non-null values, most frequent first, ties broken by
/// first appearance.
pub fn mode(input: &ChunkedArray, n: usize) -> Result<Vec<Scalar>, ComputeError> {
    let values: Vec<Scalar> = (0..input.len())
        .map(|i| input.get(i))
        .collect::<Result<_, ComputeError>>()?;
    let mut counts: Vec<(Scalar, usize)> = Vec::new();
    for v in values.into_iter().filter(|v| v.is_valid()) {
        match counts.iter_mut().find(|(existing, _)| scalar_eq(existing, &v)) {
            Some((_, count)) => *count += 1,
            None => counts.push((v, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts.into_iter().take(n).map(|(v, _)| v).collect())
}

/// The position of the first occurrence of `value`, or `Null` if absent.
pub fn index_of(input: &ChunkedArray, value: &Scalar) -> Result<Scalar, ComputeError> {
    for i in 0..input.len() {
        if scalar_eq(&input.get(i)?, value) {
            return Ok(Scalar::Int64(i as i64));
        }
    }
    Ok(Scalar::Null)
}

fn scalar_eq(a: &Scalar, b: &Scalar) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn scalars_to_array(values: &[Scalar]) -> Result<ChunkedArray, ComputeError> {
    let floats: Vec<Option<f64>> = values.iter().map(Scalar::as_f64).collect();
    Ok(ChunkedArray::from_series(Series::new(
        "".into(),
        floats,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_skips_nulls() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[Some(1.0), None, Some(2.0)]));
        let total = AggKernel::Sum.apply_array(&arr).unwrap();
        assert_eq!(total, Scalar::Float64(3.0));
    }

    #[test]
    fn sum_with_skip_nulls_false_is_null_if_any_null_present() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[Some(1.0), None, Some(2.0)]));
        let total = AggKernel::Sum.apply_array_with(&arr, false).unwrap();
        assert!(total.is_null());
    }

    #[test]
    fn column_axis_reduces_across_columns_within_each_row() {
        let table = Table::from_dataframe(
            df!["a" => [1.0f64, 2.0], "b" => [3.0f64, 4.0]].unwrap(),
        );
        let sums = AggKernel::Sum.apply_table(&table, Axis::Column).unwrap();
        assert_eq!(sums.get(0).unwrap(), Scalar::Float64(4.0));
        assert_eq!(sums.get(1).unwrap(), Scalar::Float64(6.0));
    }

    #[test]
    fn row_axis_reduces_across_rows_within_each_column() {
        let table = Table::from_dataframe(
            df!["a" => [1.0f64, 2.0], "b" => [3.0f64, 4.0]].unwrap(),
        );
        let sums = AggKernel::Sum.apply_table(&table, Axis::Row).unwrap();
        assert_eq!(sums.get(0).unwrap(), Scalar::Float64(3.0));
        assert_eq!(sums.get(1).unwrap(), Scalar::Float64(7.0));
    }

    #[test]
    fn product_multiplies_non_null_values() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[Some(2.0), None, Some(3.0)]));
        assert_eq!(AggKernel::Product.apply_array(&arr).unwrap(), Scalar::Float64(6.0));
    }

    #[test]
    fn all_and_any_reduce_booleans() {
        let all_true = ChunkedArray::from_series(Series::new("a".into(), &[true, true]));
        assert_eq!(AggKernel::All.apply_array(&all_true).unwrap(), Scalar::Bool(true));
        let mixed = ChunkedArray::from_series(Series::new("a".into(), &[true, false]));
        assert_eq!(AggKernel::All.apply_array(&mixed).unwrap(), Scalar::Bool(false));
        assert_eq!(AggKernel::Any.apply_array(&mixed).unwrap(), Scalar::Bool(true));
    }

    #[test]
    fn count_all_valid_and_null_partition_the_column() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[Some(1i64), None, Some(2)]));
        assert_eq!(AggKernel::CountAll.apply_array(&arr).unwrap(), Scalar::Int64(3));
        assert_eq!(AggKernel::CountValid.apply_array(&arr).unwrap(), Scalar::Int64(2));
        assert_eq!(AggKernel::CountNull.apply_array(&arr).unwrap(), Scalar::Int64(1));
    }

    #[test]
    fn first_and_last_skip_leading_and_trailing_nulls() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[None, Some(1i64), Some(2), None]));
        assert_eq!(AggKernel::First.apply_array(&arr).unwrap(), Scalar::Int64(1));
        assert_eq!(AggKernel::Last.apply_array(&arr).unwrap(), Scalar::Int64(2));
    }

    #[test]
    fn approximate_median_of_an_odd_length_column() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[5.0f64, 1.0, 3.0]));
        assert_eq!(AggKernel::ApproximateMedian.apply_array(&arr).unwrap(), Scalar::Float64(3.0));
    }

    #[test]
    fn variance_respects_ddof() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        let population = variance(&arr, 0, true).unwrap();
        let sample = variance(&arr, 1, true).unwrap();
        assert_eq!(population, Scalar::Float64(4.0));
        assert!(matches!(sample, Scalar::Float64(v) if (v - 4.571428571428571).abs() < 1e-9));
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0]));
        assert_eq!(quantile(&arr, 0.0).unwrap(), Scalar::Float64(1.0));
        assert_eq!(quantile(&arr, 1.0).unwrap(), Scalar::Float64(4.0));
        assert_eq!(quantile(&arr, 0.5).unwrap(), Scalar::Float64(2.5));
    }

    #[test]
    fn mode_returns_the_n_most_frequent_values() {
        let arr = ChunkedArray::from_series(Series::new(
            "a".into(),
            &[1i64, 2, 2, 3, 3, 3],
        ));
        let top = mode(&arr, 2).unwrap();
        assert_eq!(top, vec![Scalar::Int64(3), Scalar::Int64(2)]);
    }

    #[test]
    fn index_of_finds_the_first_matching_position() {
        let arr = ChunkedArray::from_series(Series::new("a".into(), &[10i64, 20, 30]));
        assert_eq!(index_of(&arr, &Scalar::Int64(20)).unwrap(), Scalar::Int64(1));
        assert_eq!(index_of(&arr, &Scalar::Int64(99)).unwrap(), Scalar::Null);
    }
}
