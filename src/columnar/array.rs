use std::ops::Deref;

use polars::prelude::*;

use super::Scalar;
use crate::error::ComputeError;

/// A named, chunked sequence of values of one logical type.
///
/// `polars::series::Series` already presents a single logical (possibly
/// multi-chunk) column, so `ChunkedArray` is realized as a thin newtype around
/// it rather than a second independent tier.
#[derive(Debug, Clone)]
pub struct ChunkedArray(Series);

impl ChunkedArray {
    pub fn from_series(series: Series) -> Self {
        Self(series)
    }

    pub fn into_series(self) -> Series {
        self.0
    }

    pub fn series(&self) -> &Series {
        &self.0
    }

    pub fn name(&self) -> &str {
        self.0.name().as_str()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.0.null_count()
    }

    pub fn get(&self, index: usize) -> Result<Scalar, ComputeError> {
        let any = self
            .0
            .get(index)
            .map_err(|e| ComputeError::Backend(e.to_string()))?;
        Ok(Scalar::from_any_value(&any))
    }

    pub fn rename(&mut self, name: &str) -> &mut Self {
        self.0.rename(name.into());
        self
    }

    pub fn take_indices(&self, indices: &[u32]) -> Result<ChunkedArray, ComputeError> {
        let idx = IdxCa::from_vec("".into(), indices.to_vec());
        self.0
            .take(&idx)
            .map(ChunkedArray::from_series)
            .map_err(|e| ComputeError::Backend(e.to_string()))
    }

    /// Returns a copy of this array with every position where `mask` is `true`
    /// replaced by null.
    pub fn with_nulls_at(&self, mask: &[bool]) -> Result<ChunkedArray, ComputeError> {
        let keep = BooleanChunked::from_slice("keep".into(), mask)
            .not()
            .into_series();
        let null_series = Series::full_null("".into(), self.0.len(), self.0.dtype());
        let nulled = self
            .0
            .zip_with(&keep.bool().map_err(|e| ComputeError::Backend(e.to_string()))?, &null_series)
            .map_err(|e| ComputeError::Backend(e.to_string()))?;
        Ok(ChunkedArray::from_series(nulled))
    }
}

impl Deref for ChunkedArray {
    type Target = Series;

    fn deref(&self) -> &Series {
        &self.0
    }
}

impl From<Series> for ChunkedArray {
    fn from(series: Series) -> Self {
        Self(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_matches_underlying_series() {
        let s = Series::new("a".into(), &[1i64, 2, 3]);
        let arr = ChunkedArray::from_series(s);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.name(), "a");
    }

    #[test]
    fn get_surfaces_null() {
        let s = Series::new("a".into(), &[Some(1i64), None]);
        let arr = ChunkedArray::from_series(s);
        assert!(arr.get(1).unwrap().is_null());
        assert_eq!(arr.get(0).unwrap(), Scalar::Int64(1));
    }
}
