//! Index alignment for binary operations between differently-indexed
//! frames.
//!
//! Built on the hashmap-backed [`crate::index::Index`]: compute the union
//! index, then reindex each side against it, marking positions absent from
//! the original side as missing.

use crate::columnar::{ChunkedArray, Scalar};
use crate::error::NdframeError;
use crate::index::Index;

/// The result of aligning two indexes: the common (union) index, plus the
/// position map each original side needs to reindex onto it.
pub struct Alignment {
    pub index: Index,
    pub left_positions: Vec<Option<usize>>,
    pub right_positions: Vec<Option<usize>>,
}

/// Aligns `left` and `right`, short-circuiting to an identity alignment when
/// the two indexes already agree — the common case, and the one where an
/// allocation-heavy union would be pure overhead.
pub fn align_indexes(left: &Index, right: &Index) -> Alignment {
    if left.equals(right) {
        tracing::trace!(len = left.len(), "index alignment took the identity fast path");
        let identity: Vec<Option<usize>> = (0..left.len()).map(Some).collect();
        return Alignment {
            index: left.clone(),
            left_positions: identity.clone(),
            right_positions: identity,
        };
    }

    tracing::debug!(left_len = left.len(), right_len = right.len(), "index alignment fell back to a union");
    let union = left.union(right);
    let left_positions = union
        .labels()
        .iter()
        .map(|label| left.get_loc(label).ok())
        .collect();
    let right_positions = union
        .labels()
        .iter()
        .map(|label| right.get_loc(label).ok())
        .collect();
    Alignment {
        index: union,
        left_positions,
        right_positions,
    }
}

/// Reindexes `array` according to an alignment's position map: positions that
/// are `None` (absent from the original index) become null.
pub fn reindex(array: &ChunkedArray, positions: &[Option<usize>]) -> Result<ChunkedArray, NdframeError> {
    let values: Vec<Scalar> = positions
        .iter()
        .map(|p| match p {
            Some(i) => array.get(*i).map_err(NdframeError::from),
            None => Ok(Scalar::Null),
        })
        .collect::<Result<_, NdframeError>>()?;
    Ok(scalars_to_chunked_array(array.name(), &values))
}

fn scalars_to_chunked_array(name: &str, values: &[Scalar]) -> ChunkedArray {
    use polars::prelude::*;

    let all_int = values.iter().all(|v| matches!(v, Scalar::Int64(_) | Scalar::Null));
    let all_float = values
        .iter()
        .all(|v| matches!(v, Scalar::Float64(_) | Scalar::Int64(_) | Scalar::Null));
    let all_bool = values.iter().all(|v| matches!(v, Scalar::Bool(_) | Scalar::Null));

    if all_int {
        let opts: Vec<Option<i64>> = values
            .iter()
            .map(|v| match v {
                Scalar::Int64(i) => Some(*i),
                _ => None,
            })
            .collect();
        ChunkedArray::from_series(Series::new(name.into(), opts))
    } else if all_bool {
        let opts: Vec<Option<bool>> = values
            .iter()
            .map(|v| match v {
                Scalar::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        ChunkedArray::from_series(Series::new(name.into(), opts))
    } else if all_float {
        let opts: Vec<Option<f64>> = values.iter().map(Scalar::as_f64).collect();
        ChunkedArray::from_series(Series::new(name.into(), opts))
    } else {
        let opts: Vec<Option<String>> = values
            .iter()
            .map(|v| match v {
                Scalar::Utf8(s) => Some(s.clone()),
                Scalar::Null => None,
                other => Some(other.to_string()),
            })
            .collect();
        ChunkedArray::from_series(Series::new(name.into(), opts))
    }
}

/// The union of `left` and `right`'s column names, preserving `left`'s order
/// then appending any columns only `right` has.
pub fn union_column_names(left: &[String], right: &[String]) -> Vec<String> {
    let mut out = left.to_vec();
    for name in right {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
