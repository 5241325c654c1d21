use chrono::NaiveDate;
use mysql_async::consts::ColumnType;
use mysql_async::{Column, Row as DriverRow, Value};

use crate::error::DbSessionError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// Build a result set from driver rows
///
/// Every fetched value is stringified; only NULL survives as NULL.
///
/// # Errors
/// Returns `DbSessionError::ExecutionError` if a row is malformed or a
/// temporal value is out of range.
pub fn build_result_set(
    columns: &[Column],
    rows: Vec<DriverRow>,
) -> Result<ResultSet, DbSessionError> {
    let column_names: Vec<String> = columns
        .iter()
        .map(|col| col.name_str().into_owned())
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(column_names, rows.len());
    for row in rows {
        let raw = row.unwrap();
        if raw.len() != column_count {
            return Err(DbSessionError::ExecutionError(format!(
                "row has {} values but {column_count} columns",
                raw.len()
            )));
        }
        let mut values = Vec::with_capacity(column_count);
        for (value, column) in raw.into_iter().zip(columns) {
            values.push(extract_value(value, column)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}

/// Convert one driver value into the session's string-typed representation
///
/// # Errors
/// Returns `DbSessionError::ExecutionError` for temporal values the driver
/// hands back out of range.
pub fn extract_value(value: Value, column: &Column) -> Result<SqlValue, DbSessionError> {
    Ok(match value {
        Value::NULL => SqlValue::Null,
        Value::Bytes(bytes) => SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Int(i) => SqlValue::Text(i.to_string()),
        Value::UInt(u) => SqlValue::Text(u.to_string()),
        Value::Float(f) => SqlValue::Text(f.to_string()),
        Value::Double(d) => SqlValue::Text(d.to_string()),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            if column.column_type() == ColumnType::MYSQL_TYPE_DATE {
                SqlValue::Text(format!("{year:04}-{month:02}-{day:02}"))
            } else {
                SqlValue::Text(format_datetime(
                    year, month, day, hour, minute, second, micros,
                )?)
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            SqlValue::Text(format_time(negative, days, hours, minutes, seconds, micros))
        }
    })
}

fn format_datetime(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    micros: u32,
) -> Result<String, DbSessionError> {
    // MySQL zero dates can't be represented by chrono; render them verbatim.
    if month == 0 || day == 0 {
        return Ok(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
        ));
    }

    let datetime = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .and_then(|date| {
            date.and_hms_micro_opt(
                u32::from(hour),
                u32::from(minute),
                u32::from(second),
                micros,
            )
        })
        .ok_or_else(|| {
            DbSessionError::ExecutionError(format!(
                "invalid datetime {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        })?;

    let rendered = if micros == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    };
    Ok(rendered)
}

// MySQL TIME values can exceed 24 hours, so chrono is no help here.
fn format_time(negative: bool, days: u32, hours: u8, minutes: u8, seconds: u8, micros: u32) -> String {
    let total_hours = u64::from(days) * 24 + u64::from(hours);
    let sign = if negative { "-" } else { "" };
    if micros == 0 {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}
