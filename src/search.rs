//! Search operations
//!
//! The three public operations. Each one runs a single backend invocation,
//! parses whatever landed on stdout and packages it. Only a backend that cannot
//! be launched is an error; a failed or empty search is an empty result.

use crate::backends::backend::{Invocation, SearchBackend};
use crate::core::error::BackendError;
use crate::core::model::{FileListResult, MatchRecord, PathListResult};
use crate::parse::context::parse_context_output;
use crate::parse::files::parse_file_list;

/// Search path used when the caller gives none
pub const DEFAULT_PATH: &str = ".";

/// Context lines shown before and after each match by default
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Surrounding lines requested around each match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextSpec {
    pub before: usize,
    pub after: usize,
}

impl Default for ContextSpec {
    fn default() -> Self {
        Self {
            before: DEFAULT_CONTEXT_LINES,
            after: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// List files whose content matches `query`
pub fn search_files<B: SearchBackend>(
    backend: &B,
    query: &str,
    path: &str,
) -> Result<FileListResult, BackendError> {
    let raw = backend.run(&Invocation::ListFiles { query, path })?;
    let files = parse_file_list(&raw.stdout);
    tracing::debug!(query, path, count = files.len(), "search_files");
    Ok(FileListResult::new(files, query, path))
}

/// Matches with surrounding context, one record per grep block
pub fn search_files_with_context<B: SearchBackend>(
    backend: &B,
    query: &str,
    path: &str,
    context: ContextSpec,
) -> Result<Vec<MatchRecord>, BackendError> {
    let raw = backend.run(&Invocation::WithContext {
        query,
        path,
        before: context.before,
        after: context.after,
    })?;
    let records = parse_context_output(&raw.stdout);
    tracing::debug!(query, path, matches = records.len(), "search_files_with_context");
    Ok(records)
}

/// Regular files under `path` whose name matches the glob `pattern`
pub fn find_files_by_name<B: SearchBackend>(
    backend: &B,
    pattern: &str,
    path: &str,
) -> Result<PathListResult, BackendError> {
    let raw = backend.run(&Invocation::FindByName { pattern, path })?;
    let paths = parse_file_list(&raw.stdout);
    tracing::debug!(pattern, path, count = paths.len(), "find_files_by_name");
    Ok(PathListResult::from(paths))
}
