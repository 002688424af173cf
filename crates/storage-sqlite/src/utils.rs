//! Utility functions for SQLite storage operations.

use chrono::{NaiveDateTime, Timelike, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use academy_core::errors::{DatabaseError, Error, Result};

/// Maximum number of parameters for SQLite `IN (...)` queries.
///
/// SQLite has a compile-time limit on the number of parameters in a SQL
/// statement, typically 999 (SQLITE_MAX_VARIABLE_NUMBER). To stay safely
/// under it and leave room for other parameters in the query, batch lookups
/// run in chunks of 500 via [`chunk_for_sqlite`].
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a money TEXT column strictly.
///
/// Payout arithmetic must never proceed from a silently zeroed amount, so a
/// value that does not parse as a decimal surfaces as an internal database
/// error naming the column, instead of a fallback value.
pub fn parse_money(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::Internal(format!(
            "column '{}' holds unparseable decimal '{}': {}",
            column, value, e
        )))
    })
}

/// Current UTC time truncated to microseconds.
///
/// Listing cursors carry microsecond precision; stamping rows at the same
/// precision keeps keyset comparisons exact.
pub fn now_micros() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn chunking_splits_at_the_parameter_limit() {
        let items: Vec<i32> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[1].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn chunking_empty_input_yields_no_chunks() {
        let items: Vec<i32> = vec![];
        assert!(chunk_for_sqlite(&items).next().is_none());
    }

    #[test]
    fn money_parses_canonical_decimals() {
        assert_eq!(parse_money("11500", "rate").unwrap(), dec!(11500));
        assert_eq!(parse_money("-0.5", "rate").unwrap(), dec!(-0.5));
    }

    #[test]
    fn corrupt_money_is_an_error_not_zero() {
        let err = parse_money("banana", "teacher_base_rate").unwrap_err();
        assert!(err.to_string().contains("teacher_base_rate"));
        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn now_micros_has_no_sub_microsecond_part() {
        let now = now_micros();
        assert_eq!(now.nanosecond() % 1_000, 0);
    }
}
