use crate::align;
use crate::columnar::{ChunkedArray, Scalar, Table};
use crate::compute::{AggKernel, Axis, BinaryKernel, CumKernel};
use crate::error::NdframeError;
use crate::index::{Index, Label};

use super::Series;

/// A 2-D table with a row [`Index`] attached — the workhorse of the NDFrame
/// kernel. Binary operations align on the row index and the union of
/// column names before dispatching per-column.
#[derive(Debug, Clone)]
pub struct DataFrame {
    index: Index,
    table: Table,
}

impl DataFrame {
    pub fn new(index: Index, table: Table) -> Result<Self, NdframeError> {
        if index.len() != table.height() {
            return Err(NdframeError::IndexMismatch(format!(
                "index has {} labels but table has {} rows",
                index.len(),
                table.height()
            )));
        }
        Ok(Self { index, table })
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn height(&self) -> usize {
        self.table.height()
    }

    pub fn width(&self) -> usize {
        self.table.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.table.column_names()
    }

    pub fn column(&self, name: &str) -> Result<Series, NdframeError> {
        Ok(Series::new(self.index.clone(), self.table.column(name)?)?)
    }

    fn binary_op(&self, other: &DataFrame, kernel: BinaryKernel) -> Result<DataFrame, NdframeError> {
        let alignment = align::align_indexes(&self.index, &other.index);
        let names = align::union_column_names(&self.column_names(), &other.column_names());
        let mut out = Table::empty();
        for name in &names {
            let left = match self.table.column(name) {
                Ok(c) => align::reindex(&c, &alignment.left_positions)?,
                Err(_) => null_array(name, alignment.index.len()),
            };
            let right = match other.table.column(name) {
                Ok(c) => align::reindex(&c, &alignment.right_positions)?,
                Err(_) => null_array(name, alignment.index.len()),
            };
            let mut result = kernel.apply(&left, &right)?;
            result.rename(name);
            out.with_column(result)?;
        }
        DataFrame::new(alignment.index, out)
    }

    pub fn add(&self, other: &DataFrame) -> Result<DataFrame, NdframeError> {
        self.binary_op(other, BinaryKernel::Add)
    }
    pub fn sub(&self, other: &DataFrame) -> Result<DataFrame, NdframeError> {
        self.binary_op(other, BinaryKernel::Sub)
    }
    pub fn mul(&self, other: &DataFrame) -> Result<DataFrame, NdframeError> {
        self.binary_op(other, BinaryKernel::Mul)
    }
    pub fn div(&self, other: &DataFrame) -> Result<DataFrame, NdframeError> {
        self.binary_op(other, BinaryKernel::Div)
    }
    pub fn eq_elementwise(&self, other: &DataFrame) -> Result<DataFrame, NdframeError> {
        self.binary_op(other, BinaryKernel::Eq)
    }

    pub fn aggregate(&self, kernel: AggKernel, axis: Axis) -> Result<Series, NdframeError> {
        let result = kernel.apply_table(&self.table, axis)?;
        let index = match axis {
            // Reduced across rows within each column: one result per column,
            // indexed by column name.
            Axis::Row => Index::new(
                self.column_names()
                    .into_iter()
                    .map(Label::Str)
                    .collect(),
            ),
            // Reduced across columns within each row: one result per row,
            // indexed by the frame's own index.
            Axis::Column => self.index.clone(),
        };
        Ok(Series::new(index, result)?)
    }

    pub fn cumsum(&self) -> Result<DataFrame, NdframeError> {
        let mut out = Table::empty();
        for name in self.column_names() {
            let col = self.table.column(&name)?;
            let mut result = CumKernel::Sum.apply(&col)?;
            result.rename(&name);
            out.with_column(result)?;
        }
        DataFrame::new(self.index.clone(), out)
    }

    pub fn head(&self, n: usize) -> Result<DataFrame, NdframeError> {
        self.take_positions(&(0..n.min(self.height())).collect::<Vec<_>>())
    }

    pub fn tail(&self, n: usize) -> Result<DataFrame, NdframeError> {
        let start = self.height().saturating_sub(n);
        self.take_positions(&(start..self.height()).collect::<Vec<_>>())
    }

    fn take_positions(&self, positions: &[usize]) -> Result<DataFrame, NdframeError> {
        let idx = self.index.take(positions);
        let u32_positions: Vec<u32> = positions.iter().map(|&p| p as u32).collect();
        let table = self.table.take_rows(&u32_positions)?;
        DataFrame::new(idx, table)
    }

    pub fn iloc(&self, position: usize) -> Result<DataFrame, NdframeError> {
        self.take_positions(&[position])
    }

    pub fn loc(&self, label: &Label) -> Result<DataFrame, NdframeError> {
        let pos = self.index.get_loc(label)?;
        self.iloc(pos)
    }

    pub fn filter(&self, mask: &[bool]) -> Result<DataFrame, NdframeError> {
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.take_positions(&positions)
    }

    /// Row-wise `where`: positions where `mask` is `false` (or null) are
    /// replaced by `other`'s corresponding row, or by null if `other` is absent.
    pub fn where_mask(&self, mask: &Series, other: Option<&DataFrame>) -> Result<DataFrame, NdframeError> {
        let mut out = Table::empty();
        for name in self.column_names() {
            let self_col = self.table.column(&name)?;
            let other_col = match other {
                Some(o) => o.table.column(&name).ok(),
                None => None,
            };
            let values: Vec<Scalar> = (0..self.height())
                .map(|i| {
                    let keep = mask.iloc(i)?.as_bool().unwrap_or(false);
                    if keep {
                        self_col.get(i)
                    } else {
                        other_col.as_ref().map(|c| c.get(i)).unwrap_or(Ok(Scalar::Null))
                    }
                    .map_err(NdframeError::from)
                })
                .collect::<Result<_, NdframeError>>()?;
            out.with_column(super::scalars_to_named_array(&name, &values))?;
        }
        DataFrame::new(self.index.clone(), out)
    }

    pub fn sort_index(&self) -> Result<DataFrame, NdframeError> {
        let (_, order) = self.index.sort_values();
        self.take_positions(&order)
    }

    pub fn fill_null(&self, value: Scalar) -> Result<DataFrame, NdframeError> {
        let mut out = Table::empty();
        for name in self.column_names() {
            let col = self.column(&name)?;
            let filled = col.fill_null(value.clone())?;
            let mut arr = filled.values().clone();
            arr.rename(&name);
            out.with_column(arr)?;
        }
        DataFrame::new(self.index.clone(), out)
    }
}

fn null_array(name: &str, len: usize) -> ChunkedArray {
    ChunkedArray::from_series(polars::prelude::Series::full_null(
        name.into(),
        len,
        &polars::prelude::DataType::Float64,
    ))
}
