use mysql_session::DbSessionError;
use mysql_session::mysql::{check_placeholder_arity, count_placeholders};

#[test]
fn placeholders_inside_literals_and_comments_are_not_parameters() {
    let sql = "SELECT '?' AS q, `col?` -- trailing ?\nFROM t /* ? */ WHERE a = ? AND b = ?";
    assert_eq!(count_placeholders(sql), 2);
}

#[test]
fn double_negation_is_not_a_comment() {
    // `--` only opens a comment when followed by whitespace
    assert_eq!(count_placeholders("SELECT 1--?"), 1);
    assert!(check_placeholder_arity("SELECT 1--?", 1).is_ok());
    assert_eq!(count_placeholders("SELECT a--b FROM t WHERE c = ?"), 1);
}

#[test]
fn arity_must_match_exactly() {
    assert!(check_placeholder_arity("SELECT ?, ?", 2).is_ok());
    assert!(matches!(
        check_placeholder_arity("SELECT ?, ?", 1),
        Err(DbSessionError::ParameterError(_))
    ));
    assert!(matches!(
        check_placeholder_arity("SELECT 1", 1),
        Err(DbSessionError::ParameterError(_))
    ));
}

#[test]
fn call_statements_scan_like_any_other() {
    assert_eq!(count_placeholders("CALL p(?,?)"), 2);
    assert_eq!(count_placeholders("CALL p()"), 0);
}
