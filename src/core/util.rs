//! Common utilities

use std::path::Path;

/// Check if a command is available in PATH.
///
/// A command containing a path separator is checked directly instead.
pub fn command_exists(cmd: &str) -> bool {
    if cmd.is_empty() {
        return false;
    }
    if cmd.contains(std::path::MAIN_SEPARATOR) || cmd.contains('/') {
        return is_executable(Path::new(cmd));
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| is_executable(&dir.join(cmd))))
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Decode captured process output, replacing invalid UTF-8
pub fn decode_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Split raw backend output into lines.
///
/// Blank or whitespace-only output yields no lines at all. Otherwise the
/// surrounding whitespace is trimmed and the rest is split on `\n` only, so
/// the lines themselves are kept as the backend printed them.
pub fn output_lines(raw: &str) -> impl Iterator<Item = &str> {
    let trimmed = raw.trim();
    let mut lines = trimmed.split('\n');
    if trimmed.is_empty() {
        // consume the single empty fragment
        lines.next();
    }
    lines
}
