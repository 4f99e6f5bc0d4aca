//! Naming conventions for sqlstep migration scripts.
//!
//! This crate knows how script files are named on disk and how the legacy
//! version label (`db_00021.sql`) is spelled. It has no dependencies and can be
//! used by any other sqlstep crate.

// ============================================================================
// Legacy version label
// ============================================================================

/// Prefix of the legacy version label stored by old installations.
pub const LEGACY_LABEL_PREFIX: &str = "db_000";

/// File extension shared by every migration script.
pub const SCRIPT_EXTENSION: &str = ".sql";

/// Render the legacy version label for a script version.
///
/// Old installations recorded the file name of the last applied script instead
/// of a bare number. The label is the version appended to `db_000`, so any
/// version survives a round trip through prefix stripping.
///
/// # Examples
/// ```
/// use sqlstep_naming::legacy_version_label;
///
/// assert_eq!(legacy_version_label(21), "db_00021.sql");
/// assert_eq!(legacy_version_label(7), "db_0007.sql");
/// assert_eq!(legacy_version_label(120), "db_000120.sql");
/// ```
pub fn legacy_version_label(version: u32) -> String {
    format!("{LEGACY_LABEL_PREFIX}{version}{SCRIPT_EXTENSION}")
}

// ============================================================================
// Script file names
// ============================================================================

/// Extract the version number from a script file name.
///
/// Accepted shapes:
/// - `db_00025.sql` (legacy zero-padded)
/// - `0025_add_users.sql` (zero-padded version followed by a description)
/// - `25.sql`
///
/// The version must be followed by the extension or by one of `_`, `-`, `.`.
/// Returns `None` when the name is not a script name at all.
///
/// # Examples
/// ```
/// use sqlstep_naming::parse_script_version;
///
/// assert_eq!(parse_script_version("db_00025.sql"), Some(25));
/// assert_eq!(parse_script_version("0003_add_users.sql"), Some(3));
/// assert_eq!(parse_script_version("README.md"), None);
/// ```
pub fn parse_script_version(file_name: &str) -> Option<u32> {
    let stem = strip_suffix_ignore_case(file_name, SCRIPT_EXTENSION)?;
    let stem = strip_prefix_ignore_case(stem, "db_").unwrap_or(stem);

    let digits_end = stem
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(stem.len());
    if digits_end == 0 {
        return None;
    }

    let (digits, rest) = stem.split_at(digits_end);
    if !(rest.is_empty() || rest.starts_with(['_', '-', '.'])) {
        return None;
    }

    digits.parse().ok()
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = value.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() < prefix.len() || !value.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = value.split_at(prefix.len());
    head.eq_ignore_ascii_case(prefix).then_some(tail)
}
