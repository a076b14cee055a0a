use crate::align;
use crate::columnar::{ChunkedArray, Scalar};
use crate::compute::{AggKernel, BinaryKernel, CumKernel, UnaryKernel};
use crate::error::NdframeError;
use crate::index::{Index, Label};

/// A single named, indexed column — the 1-D member of the NDFrame kernel.
///
/// Binary operations between two `Series` align on their indexes first
/// before dispatching the requested kernel position-by-position.
#[derive(Debug, Clone)]
pub struct Series {
    index: Index,
    values: ChunkedArray,
}

impl Series {
    pub fn new(index: Index, values: ChunkedArray) -> Result<Self, NdframeError> {
        if index.len() != values.len() {
            return Err(NdframeError::IndexMismatch(format!(
                "index has {} labels but array has {} values",
                index.len(),
                values.len()
            )));
        }
        Ok(Self { index, values })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &ChunkedArray {
        &self.values
    }

    pub fn name(&self) -> &str {
        self.values.name()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn binary_op(&self, other: &Series, kernel: BinaryKernel) -> Result<Series, NdframeError> {
        let alignment = align::align_indexes(&self.index, &other.index);
        let left = align::reindex(&self.values, &alignment.left_positions)?;
        let right = align::reindex(&other.values, &alignment.right_positions)?;
        let result = kernel.apply(&left, &right)?;
        Series::new(alignment.index, result)
    }

    pub fn add(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Add)
    }
    pub fn sub(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Sub)
    }
    pub fn mul(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Mul)
    }
    pub fn div(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Div)
    }
    pub fn eq_elementwise(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Eq)
    }
    pub fn lt(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Lt)
    }
    pub fn gt(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Gt)
    }
    pub fn and(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::And)
    }
    pub fn or(&self, other: &Series) -> Result<Series, NdframeError> {
        self.binary_op(other, BinaryKernel::Or)
    }

    pub fn neg(&self) -> Result<Series, NdframeError> {
        Ok(Series::new(self.index.clone(), UnaryKernel::Neg.apply(&self.values)?)?)
    }

    pub fn is_null(&self) -> Result<Series, NdframeError> {
        Ok(Series::new(self.index.clone(), UnaryKernel::IsNull.apply(&self.values)?)?)
    }

    pub fn sum(&self) -> Result<Scalar, NdframeError> {
        Ok(AggKernel::Sum.apply_array(&self.values)?)
    }

    pub fn mean(&self) -> Result<Scalar, NdframeError> {
        Ok(AggKernel::Mean.apply_array(&self.values)?)
    }

    pub fn cumsum(&self) -> Result<Series, NdframeError> {
        Ok(Series::new(self.index.clone(), CumKernel::Sum.apply(&self.values)?)?)
    }

    pub fn head(&self, n: usize) -> Series {
        self.take_positions(&(0..n.min(self.len())).collect::<Vec<_>>())
    }

    pub fn tail(&self, n: usize) -> Series {
        let start = self.len().saturating_sub(n);
        self.take_positions(&(start..self.len()).collect::<Vec<_>>())
    }

    pub fn iloc(&self, position: usize) -> Result<Scalar, NdframeError> {
        Ok(self.values.get(position)?)
    }

    pub fn loc(&self, label: &Label) -> Result<Scalar, NdframeError> {
        let pos = self.index.get_loc(label)?;
        self.iloc(pos)
    }

    fn take_positions(&self, positions: &[usize]) -> Series {
        let idx = self.index.take(positions);
        let u32_positions: Vec<u32> = positions.iter().map(|&p| p as u32).collect();
        let values = self
            .values
            .take_indices(&u32_positions)
            .expect("positions are within bounds");
        Series { index: idx, values }
    }

    pub fn filter(&self, mask: &[bool]) -> Series {
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take_positions(&positions)
    }

    pub fn isin(&self, labels: &[Scalar]) -> Series {
        let mask: Vec<bool> = (0..self.len())
            .map(|i| {
                let v = self.values.get(i).unwrap_or(Scalar::Null);
                labels.contains(&v)
            })
            .collect();
        let bool_series = polars::prelude::Series::new(self.name().into(), mask);
        Series {
            index: self.index.clone(),
            values: ChunkedArray::from_series(bool_series),
        }
    }

    pub fn sort_index(&self) -> Series {
        let (idx, order) = self.index.sort_values();
        let u32_positions: Vec<u32> = order.iter().map(|&p| p as u32).collect();
        let values = self
            .values
            .take_indices(&u32_positions)
            .expect("positions are within bounds");
        Series { index: idx, values }
    }

    /// Sorts by this Series' own values rather than its index. Nulls sort
    /// last unless `na_last` is false, in which case they sort first.
    pub fn sort_values(&self, na_last: bool, ascending: bool) -> Series {
        let mut positions: Vec<usize> = (0..self.len()).collect();
        positions.sort_by(|&a, &b| {
            let va = self.values.get(a).unwrap_or(Scalar::Null);
            let vb = self.values.get(b).unwrap_or(Scalar::Null);
            scalar_cmp(&va, &vb, na_last, ascending)
        });
        self.take_positions(&positions)
    }

    pub fn fill_null(&self, value: Scalar) -> Result<Series, NdframeError> {
        let filled: Vec<Scalar> = (0..self.len())
            .map(|i| {
                let v = self.values.get(i)?;
                Ok(if v.is_null() { value.clone() } else { v })
            })
            .collect::<Result<_, NdframeError>>()?;
        let series = super::scalars_to_named_array(self.name(), &filled);
        Series::new(self.index.clone(), series)
    }

    pub fn map<F>(&self, f: F) -> Result<Series, NdframeError>
    where
        F: Fn(&Scalar) -> Scalar,
    {
        let mapped: Vec<Scalar> = (0..self.len())
            .map(|i| self.values.get(i).map(|v| f(&v)))
            .collect::<Result<_, NdframeError>>()?;
        let series = super::scalars_to_named_array(self.name(), &mapped);
        Series::new(self.index.clone(), series)
    }
}

fn scalar_cmp(a: &Scalar, b: &Scalar, na_last: bool, ascending: bool) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return if na_last { Ordering::Greater } else { Ordering::Less },
        (false, true) => return if na_last { Ordering::Less } else { Ordering::Greater },
        (false, false) => {}
    }
    let ord = match (a, b) {
        (Scalar::Utf8(x), Scalar::Utf8(y)) => x.cmp(y),
        _ => a
            .as_f64()
            .unwrap_or(f64::NAN)
            .partial_cmp(&b.as_f64().unwrap_or(f64::NAN))
            .unwrap_or(Ordering::Equal),
    };
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::from_range;
    use polars::prelude::Series as PSeries;

    fn series(values: &[i64]) -> Series {
        Series::new(
            from_range(0, values.len() as i64),
            ChunkedArray::from_series(PSeries::new("a".into(), values)),
        )
        .unwrap()
    }

    #[test]
    fn add_aligns_mismatched_indexes() {
        let a = Series::new(
            Index::new(vec![Label::Int(0), Label::Int(1)]),
            ChunkedArray::from_series(PSeries::new("a".into(), &[1i64, 2])),
        )
        .unwrap();
        let b = Series::new(
            Index::new(vec![Label::Int(1), Label::Int(2)]),
            ChunkedArray::from_series(PSeries::new("b".into(), &[10i64, 20])),
        )
        .unwrap();
        let out = a.add(&b).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iloc(0).unwrap().is_null());
        assert_eq!(out.iloc(1).unwrap(), Scalar::Int64(12));
    }

    #[test]
    fn head_and_tail_take_expected_slices() {
        let s = series(&[1, 2, 3, 4]);
        assert_eq!(s.head(2).len(), 2);
        assert_eq!(s.tail(2).iloc(0).unwrap(), Scalar::Int64(3));
    }

    #[test]
    fn sort_values_orders_by_data_not_index() {
        let s = Series::new(
            Index::new(vec![Label::Int(10), Label::Int(20), Label::Int(30)]),
            ChunkedArray::from_series(PSeries::new("a".into(), &[Some(3i64), None, Some(1)])),
        )
        .unwrap();
        let sorted = s.sort_values(true, true);
        assert_eq!(sorted.iloc(0).unwrap(), Scalar::Int64(1));
        assert_eq!(sorted.iloc(1).unwrap(), Scalar::Int64(3));
        assert!(sorted.iloc(2).unwrap().is_null());
        assert_eq!(sorted.index().labels()[0], Label::Int(30));
    }

    #[test]
    fn fill_null_replaces_nulls_only() {
        let s = Series::new(
            from_range(0, 2),
            ChunkedArray::from_series(PSeries::new("a".into(), &[Some(1i64), None])),
        )
        .unwrap();
        let filled = s.fill_null(Scalar::Int64(0)).unwrap();
        assert_eq!(filled.iloc(1).unwrap(), Scalar::Int64(0));
    }
}
