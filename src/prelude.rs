//! Convenience re-exports for downstream crates: `use epoch_ndframe::prelude::*;`

// 1. Columnar primitives
pub use crate::columnar::{ChunkedArray, DataType, Field, Schema, Scalar, Table};

// 2. Temporal primitives
pub use crate::temporal::{Date, DateTime, Time, TimeDelta};

// 3. Index
pub use crate::index::{date_range, from_range, make_datetime_index, make_object_index, Index, Label};

// 4. The NDFrame kernel
pub use crate::ndframe::{DataFrame, Series};

// 5. Compute dispatch
pub use crate::compute::{
    index_of, mode, quantile, round, round_binary, round_to_multiple, tdigest, variance, AggKernel,
    Axis, BinaryKernel, CumKernel, Datum, NullPropagation, RoundMode, UnaryKernel,
};

// 6. Calendar engine
pub use crate::calendar::{
    exchanges, BusinessDayCalendar, ForceSpecialTimes, HolidayCalendar, HolidayRule,
    MarketCalendar, MarketCalendarOptions, MarketTime, MarketTimeType, Observance, Offset,
    RollPolicy, SpecialTime, SpecialTimeAdHoc,
};

// 7. Errors
pub use crate::error::{CalendarError, ComputeError, Error, NdframeError, Result};

// 8. Configuration
pub use crate::config::{config, ComputeConfig};
