use polars::prelude::*;

use super::{ChunkedArray, Schema};
use crate::error::ComputeError;

/// A named, ordered collection of equal-length [`ChunkedArray`]s — the
/// unindexed columnar core that [`crate::ndframe::DataFrame`] attaches an
/// [`crate::index::Index`] to.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    pub fn from_dataframe(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.frame
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    pub fn schema(&self) -> Schema {
        let fields = self
            .frame
            .get_columns()
            .iter()
            .map(|c| super::schema::Field::new(c.name().to_string(), super::schema::DataType::from_polars(c.dtype())))
            .collect();
        Schema::new(fields)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<ChunkedArray, ComputeError> {
        self.frame
            .column(name)
            .map(|c| ChunkedArray::from_series(c.as_materialized_series().clone()))
            .map_err(|e| ComputeError::Backend(e.to_string()))
    }

    pub fn with_column(&mut self, array: ChunkedArray) -> Result<&mut Self, ComputeError> {
        self.frame
            .with_column(array.into_series())
            .map_err(|e| ComputeError::Backend(e.to_string()))?;
        Ok(self)
    }

    pub fn take_rows(&self, indices: &[u32]) -> Result<Table, ComputeError> {
        let idx = IdxCa::from_vec("".into(), indices.to_vec());
        self.frame
            .take(&idx)
            .map(Table::from_dataframe)
            .map_err(|e| ComputeError::Backend(e.to_string()))
    }

    pub fn select(&self, names: &[&str]) -> Result<Table, ComputeError> {
        self.frame
            .select(names.iter().copied())
            .map(Table::from_dataframe)
            .map_err(|e| ComputeError::Backend(e.to_string()))
    }

    pub fn empty() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }
}

pub fn make_empty_table(schema: &Schema) -> Result<Table, ComputeError> {
    let columns = schema
        .fields()
        .iter()
        .map(|f| {
            Series::new_empty(f.name.as_str().into(), &f.dtype.to_polars()).into_column()
        })
        .collect::<Vec<_>>();
    DataFrame::new(columns)
        .map(Table::from_dataframe)
        .map_err(|e| ComputeError::Backend(e.to_string()))
}

pub fn make_null_table(schema: &Schema, height: usize) -> Result<Table, ComputeError> {
    let columns = schema
        .fields()
        .iter()
        .map(|f| Series::full_null(f.name.as_str().into(), height, &f.dtype.to_polars()).into_column())
        .collect::<Vec<_>>();
    DataFrame::new(columns)
        .map(Table::from_dataframe)
        .map_err(|e| ComputeError::Backend(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_column_extends_width() {
        let mut table = Table::from_dataframe(df!["a" => [1i64, 2, 3]].unwrap());
        table
            .with_column(ChunkedArray::from_series(Series::new("b".into(), &[true, false, true])))
            .unwrap();
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn make_null_table_has_requested_height() {
        let schema = Schema::new(vec![super::super::schema::Field::new(
            "x",
            super::super::schema::DataType::Float64,
        )]);
        let table = make_null_table(&schema, 4).unwrap();
        assert_eq!(table.height(), 4);
        assert_eq!(table.column("x").unwrap().null_count(), 4);
    }
}
