//! Helpers shared by the repository implementations.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a decimal stored as TEXT. Values written by this crate always parse;
/// anything else is logged and read as zero rather than failing the whole query.
pub(crate) fn parse_decimal_tolerant(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or_else(|e| {
            log::error!(
                "Failed to parse stored {} '{}' as a decimal: {}",
                field_name,
                value,
                e
            );
            Decimal::ZERO
        })
}
