use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

// `-- ...` up to and including the newline (or end of text), and `/* ... */`
// across lines. Each match is replaced by a newline.
static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)--.*?(?:\n|$)|/\*.*?\*/").expect("comment pattern is valid")
});

/// Split a script body into executable statements.
///
/// Comments are stripped, the text is split on `;`, blank pieces and
/// `USE <database>` statements are dropped, and every remaining statement is
/// trimmed and re-terminated with `;`.
pub fn split_statements(body: &str) -> Vec<String> {
    let stripped = COMMENT.replace_all(body, "\n");

    stripped
        .split(';')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty() && !is_use_statement(candidate))
        .map(|candidate| format!("{candidate};"))
        .collect()
}

fn is_use_statement(candidate: &str) -> bool {
    candidate.to_uppercase().starts_with("USE ")
}

/// Swap backtick-delimited `JSON` column types for `TEXT`.
///
/// MariaDB has no JSON column type but evaluates JSON functions over text.
pub fn rewrite_json_columns(statement: &str) -> Cow<'_, str> {
    if statement.contains("` JSON") {
        Cow::Owned(statement.replace("` JSON", "` TEXT"))
    } else {
        Cow::Borrowed(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn strips_comments_and_use() {
        let body = "-- comment\nCREATE TABLE t (a INT);\n/* block */ INSERT INTO t VALUES (1);\nUSE mydb;";
        assert_eq!(
            split_statements(body),
            vec!["CREATE TABLE t (a INT);", "INSERT INTO t VALUES (1);"]
        );
    }

    #[test]
    fn splitting_is_repeatable() {
        let body = "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);";
        assert_eq!(split_statements(body), split_statements(body));
        assert_eq!(split_statements(body).len(), 2);
    }

    #[test]
    fn multi_line_block_comment_keeps_boundaries() {
        let body = "CREATE TABLE a (id INT)/* one\ntwo\nthree */;\nDROP TABLE b;";
        assert_eq!(
            split_statements(body),
            vec!["CREATE TABLE a (id INT);", "DROP TABLE b;"]
        );
    }

    #[test]
    fn comment_without_trailing_newline() {
        let body = "DELETE FROM t;\n-- trailing note";
        assert_eq!(split_statements(body), vec!["DELETE FROM t;"]);
    }

    #[test]
    fn inline_comment_between_tokens() {
        let body = "ALTER TABLE t -- widen\n  ADD COLUMN b INT;";
        assert_eq!(split_statements(body), vec!["ALTER TABLE t \n  ADD COLUMN b INT;"]);
    }

    #[rstest]
    #[case::upper("USE documize;")]
    #[case::lower("use documize;")]
    #[case::mixed("  Use documize ;")]
    fn drops_use_statements(#[case] body: &str) {
        assert!(split_statements(body).is_empty());
    }

    #[test]
    fn keeps_statements_that_merely_start_with_use() {
        // No space after USE, so it is not a database switch.
        assert_eq!(split_statements("USERS_CLEANUP();"), vec!["USERS_CLEANUP();"]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_separators(";;\n;  ;")]
    #[case::only_comments("-- a\n/* b */\n-- c\n")]
    fn blank_input_yields_nothing(#[case] body: &str) {
        assert!(split_statements(body).is_empty());
    }

    #[test]
    fn rewrites_backtick_json_columns() {
        let stmt = "CREATE TABLE `dmz_config` (`c_key` CHAR(255), `payload` JSON, `meta` JSON NOT NULL);";
        assert_eq!(
            rewrite_json_columns(stmt),
            "CREATE TABLE `dmz_config` (`c_key` CHAR(255), `payload` TEXT, `meta` TEXT NOT NULL);"
        );
    }

    #[test]
    fn leaves_other_json_usage_alone() {
        let stmt = "SELECT JSON_EXTRACT(`c_config`, '$.database') FROM `dmz_config`;";
        assert!(matches!(rewrite_json_columns(stmt), Cow::Borrowed(_)));
    }
}
