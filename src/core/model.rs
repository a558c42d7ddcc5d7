//! Result model
//!
//! Every search operation maps its parsed backend output onto one of these
//! shapes before it is rendered or handed back to a tool caller.

use serde::{Serialize, Serializer};

/// One contiguous block of grep output around a single hit.
///
/// `context` holds the raw backend lines verbatim (path prefix included) and
/// is never empty once the record has been sealed by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub file: String,
    #[serde(serialize_with = "join_lines")]
    pub context: Vec<String>,
}

impl MatchRecord {
    pub fn new(file: impl Into<String>, context: Vec<String>) -> Self {
        Self {
            file: file.into(),
            context,
        }
    }

    /// The block as a single newline-joined string
    pub fn context_text(&self) -> String {
        self.context.join("\n")
    }
}

fn join_lines<S: Serializer>(lines: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&lines.join("\n"))
}

/// Summary returned by `search_files`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListResult {
    pub files: Vec<String>,
    pub count: usize,
    pub query: String,
    pub search_path: String,
}

impl FileListResult {
    /// Wrap a parsed file list; `count` always mirrors `files.len()`
    pub fn new(files: Vec<String>, query: impl Into<String>, search_path: impl Into<String>) -> Self {
        Self {
            count: files.len(),
            files,
            query: query.into(),
            search_path: search_path.into(),
        }
    }
}

/// Paths returned by `find_files_by_name`, serialized as a bare array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathListResult {
    pub paths: Vec<String>,
}

impl From<Vec<String>> for PathListResult {
    fn from(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

/// Any of the three public response shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Files(FileListResult),
    Matches(Vec<MatchRecord>),
    Paths(PathListResult),
}

impl From<FileListResult> for Response {
    fn from(result: FileListResult) -> Self {
        Response::Files(result)
    }
}

impl From<Vec<MatchRecord>> for Response {
    fn from(records: Vec<MatchRecord>) -> Self {
        Response::Matches(records)
    }
}

impl From<PathListResult> for Response {
    fn from(paths: PathListResult) -> Self {
        Response::Paths(paths)
    }
}
