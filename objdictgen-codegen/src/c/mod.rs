//! CanFestival C code generation modules.

pub mod format;
pub mod types;
pub mod value_range;

pub use format::{format_name, format_value};
pub use types::c_type_name;
pub use value_range::{ValueRange, ValueRangeTableBuilder, is_range_name};
