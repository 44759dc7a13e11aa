//! C type spelling of target types.

use crate::resolver::TargetType;

/// Returns the C type used to store values of a target type.
///
/// 40 to 56 bit integers widen to their 64-bit type. Kinds without a scalar
/// C equivalent (24-bit integers, strings, blobs, value ranges) map to
/// `dummy`.
#[must_use]
pub const fn c_type_name(target: &TargetType) -> &'static str {
    match target {
        TargetType::Boolean => "bool",
        TargetType::Signed(8) => "int8_t",
        TargetType::Signed(16) => "int16_t",
        TargetType::Signed(32) => "int32_t",
        TargetType::Signed(40 | 48 | 56 | 64) => "int64_t",
        TargetType::Unsigned(8) => "uint8_t",
        TargetType::Unsigned(16) => "uint16_t",
        TargetType::Unsigned(32) => "uint32_t",
        TargetType::Unsigned(40 | 48 | 56 | 64) => "uint64_t",
        TargetType::Real(32) => "float",
        TargetType::Real(64) => "double",
        _ => "dummy",
    }
}
