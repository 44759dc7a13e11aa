//! Identifier and literal formatting for C sources.

use crate::error::CodegenError;
use crate::resolver::TargetType;
use objdictgen_schema::Value;
use std::fmt::Write;

/// Turns arbitrary text into a C identifier token.
///
/// Runs of ASCII letters, digits and underscores are kept and joined with a
/// single underscore; everything else is dropped. The result may be empty or
/// start with a digit.
#[must_use]
pub fn format_name(name: &str) -> String {
    name.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Renders a value as a C literal for the given target type.
///
/// Returns the literal and a trailing comment (empty when none applies).
/// Strings are quoted verbatim without escaping. Integers are printed in
/// uppercase hex with the decimal value in the comment; negative values put
/// the sign in front of the hex magnitude (`-0xA`).
///
/// # Errors
/// Returns `CodegenError::ContractViolation` if a domain value is not text,
/// or an integer-kind value is not an integer.
pub fn format_value(value: &Value, target: &TargetType) -> Result<(String, String), CodegenError> {
    match target {
        TargetType::VisibleString => Ok((format!("\"{value}\""), String::new())),
        TargetType::Domain => {
            let text = value.as_text().ok_or_else(|| {
                CodegenError::contract(format!("{target} value"), "text", value.kind_name())
            })?;
            let mut literal = String::with_capacity(text.len() * 4 + 2);
            literal.push('"');
            for c in text.chars() {
                let _ = write!(literal, "\\x{:02x}", u32::from(c));
            }
            literal.push('"');
            Ok((literal, String::new()))
        }
        TargetType::Real(_) => Ok((value.to_string(), String::new())),
        _ => {
            let v = match value {
                Value::Integer(v) => *v,
                Value::Boolean(b) => i128::from(*b),
                other => {
                    return Err(CodegenError::contract(
                        format!("{target} value"),
                        "integer",
                        other.kind_name(),
                    ));
                }
            };
            let literal = if v < 0 {
                format!("-0x{:X}", v.unsigned_abs())
            } else {
                format!("0x{v:X}")
            };
            Ok((literal, format!("/* {v} */")))
        }
    }
}
