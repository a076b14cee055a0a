use polars::prelude::DataType as PolarsDataType;
use strum_macros::{Display, EnumString};

/// The logical type of a column, independent of polars' physical representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DataType {
    Bool,
    Int64,
    Float64,
    Utf8,
    Timestamp,
}

impl DataType {
    pub fn to_polars(self) -> PolarsDataType {
        match self {
            DataType::Bool => PolarsDataType::Boolean,
            DataType::Int64 => PolarsDataType::Int64,
            DataType::Float64 => PolarsDataType::Float64,
            DataType::Utf8 => PolarsDataType::String,
            DataType::Timestamp => {
                PolarsDataType::Datetime(polars::prelude::TimeUnit::Nanoseconds, None)
            }
        }
    }

    pub fn from_polars(dtype: &PolarsDataType) -> Self {
        match dtype {
            PolarsDataType::Boolean => DataType::Bool,
            PolarsDataType::Int64 | PolarsDataType::Int32 | PolarsDataType::UInt32 => {
                DataType::Int64
            }
            PolarsDataType::Float64 | PolarsDataType::Float32 => DataType::Float64,
            PolarsDataType::Datetime(_, _) => DataType::Timestamp,
            _ => DataType::Utf8,
        }
    }
}

/// A single named, typed column slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub dtype: DataType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable: true,
        }
    }
}

/// The ordered collection of [`Field`]s describing a [`super::Table`]'s columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
