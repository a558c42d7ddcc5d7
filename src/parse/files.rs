//! File list parser
//!
//! Used for both `grep -l` and `find` output: one path per line, kept exactly
//! as the backend printed them.

use crate::core::util::output_lines;

/// Split newline-delimited backend output into paths.
///
/// Duplicates are kept and nothing is checked against the filesystem.
pub fn parse_file_list(raw: &str) -> Vec<String> {
    output_lines(raw).map(str::to_string).collect()
}
