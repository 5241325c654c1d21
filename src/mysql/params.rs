use mysql_async::{Params, Value};

use crate::error::DbSessionError;
use crate::types::SqlValue;

/// Convert a slice of values into positional driver parameters
///
/// Every value is bound as a string; NULL binds as NULL.
#[must_use]
pub fn to_positional_params(values: &[SqlValue]) -> Params {
    if values.is_empty() {
        return Params::Empty;
    }
    Params::Positional(values.iter().map(to_driver_value).collect())
}

fn to_driver_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Text(text) => Value::Bytes(text.clone().into_bytes()),
        SqlValue::Null => Value::NULL,
    }
}

/// Require the statement's `?` arity to match the number of supplied values
///
/// # Errors
/// Returns `DbSessionError::ParameterError` on a mismatch.
pub fn check_placeholder_arity(sql: &str, supplied: usize) -> Result<(), DbSessionError> {
    let expected = count_placeholders(sql);
    if expected != supplied {
        return Err(DbSessionError::ParameterError(format!(
            "statement has {expected} placeholder(s) but {supplied} value(s) were supplied"
        )));
    }
    Ok(())
}

enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backquoted,
    LineComment,
    BlockComment,
}

/// Count the `?` placeholders in a statement
///
/// Placeholders inside string literals, quoted identifiers, and comments are
/// not parameters and are skipped via a lightweight state machine.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut state = State::Normal;
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            State::Normal => match b {
                b'?' => count += 1,
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backquoted,
                b'#' => state = State::LineComment,
                // MySQL lexes `--` as a comment only when followed by
                // whitespace, a control character, or end of statement;
                // otherwise it is double negation.
                b'-' if bytes.get(i + 1) == Some(&b'-')
                    && bytes
                        .get(i + 2)
                        .is_none_or(|c| c.is_ascii_whitespace() || c.is_ascii_control()) =>
                {
                    state = State::LineComment;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = State::BlockComment;
                    i += 1;
                }
                _ => {}
            },
            State::SingleQuoted => match b {
                // backslash escape, or a doubled quote
                b'\\' => i += 1,
                b'\'' if bytes.get(i + 1) == Some(&b'\'') => i += 1,
                b'\'' => state = State::Normal,
                _ => {}
            },
            State::DoubleQuoted => match b {
                b'\\' => i += 1,
                b'"' if bytes.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => state = State::Normal,
                _ => {}
            },
            State::Backquoted => match b {
                b'`' if bytes.get(i + 1) == Some(&b'`') => i += 1,
                b'`' => state = State::Normal,
                _ => {}
            },
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = State::Normal;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bare_placeholders() {
        assert_eq!(count_placeholders("select * from t where a = ? and b = ?"), 2);
        assert_eq!(count_placeholders("select 1"), 0);
    }

    #[test]
    fn skips_inside_literals_and_comments() {
        let sql = "select '?', \"?\" -- ?\n/* ? */ from `t?` where a = ?";
        assert_eq!(count_placeholders(sql), 1);
    }

    #[test]
    fn dashes_without_trailing_whitespace_are_subtraction() {
        assert_eq!(count_placeholders("SELECT 1--?"), 1);
        assert_eq!(count_placeholders("SELECT 1--2, ?"), 1);
        assert_eq!(count_placeholders("SELECT 1 -- ?"), 0);
        assert_eq!(count_placeholders("SELECT 1 --"), 0);
    }

    #[test]
    fn skips_escaped_quotes() {
        assert_eq!(count_placeholders(r"select 'it''s ?', 'a\'? b', ?"), 1);
        assert_eq!(count_placeholders("select # ?\n?"), 1);
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let values = 1;
        let res = check_placeholder_arity("select ? where ? = ?", values);
        assert!(matches!(res, Err(DbSessionError::ParameterError(_))));
        assert!(check_placeholder_arity("select ?", 1).is_ok());
    }

    #[test]
    fn empty_values_bind_as_empty_params() {
        assert!(matches!(to_positional_params(&[]), Params::Empty));
    }

    #[test]
    fn values_bind_positionally_as_strings() {
        let params = to_positional_params(&[SqlValue::from(5_i64), SqlValue::Null]);
        match params {
            Params::Positional(values) => {
                assert_eq!(values[0], Value::Bytes(b"5".to_vec()));
                assert_eq!(values[1], Value::NULL);
            }
            _ => panic!("expected positional params"),
        }
    }
}
