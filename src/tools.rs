//! Tool surface
//!
//! Describes the three search operations for an agent (name, JSON schema of
//! the parameters with their defaults, description) and dispatches a tool call
//! given as a name plus a JSON argument object.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::backends::backend::SearchBackend;
use crate::core::error::ToolError;
use crate::search::{self, ContextSpec, DEFAULT_CONTEXT_LINES, DEFAULT_PATH};

pub const SEARCH_FILES: &str = "search_files";
pub const SEARCH_FILES_WITH_CONTEXT: &str = "search_files_with_context";
pub const FIND_FILES_BY_NAME: &str = "find_files_by_name";

/// Definition of a callable tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema object
}

/// Definitions for every tool `dispatch` understands
pub fn tool_defs() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: SEARCH_FILES.into(),
            description: "Search for files containing a text query. Returns the list of matching files, how many there are, and the query and search path that were used.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The text to search for in files"
                    },
                    "path": {
                        "type": "string",
                        "description": "The directory path to search in (defaults to current directory)",
                        "default": DEFAULT_PATH
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDef {
            name: SEARCH_FILES_WITH_CONTEXT.into(),
            description: "Search for files containing text and return matches with context. Each entry holds the file and the block of lines around one match, with line numbers; several entries may refer to the same file.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The text to search for in files"
                    },
                    "path": {
                        "type": "string",
                        "description": "The directory path to search in (defaults to current directory)",
                        "default": DEFAULT_PATH
                    },
                    "lines_before": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Number of lines to show before match",
                        "default": DEFAULT_CONTEXT_LINES
                    },
                    "lines_after": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Number of lines to show after match",
                        "default": DEFAULT_CONTEXT_LINES
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDef {
            name: FIND_FILES_BY_NAME.into(),
            description: "Find files by name pattern using the shell find command. Returns the list of regular files whose name matches the pattern.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "The file name pattern to search for (supports wildcards)"
                    },
                    "path": {
                        "type": "string",
                        "description": "The directory path to search in (defaults to current directory)",
                        "default": DEFAULT_PATH
                    }
                },
                "required": ["pattern"]
            }),
        },
    ]
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchFilesArgs {
    query: String,
    #[serde(default = "default_path")]
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchWithContextArgs {
    query: String,
    #[serde(default = "default_path")]
    path: String,
    #[serde(default = "default_context_lines")]
    lines_before: usize,
    #[serde(default = "default_context_lines")]
    lines_after: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FindByNameArgs {
    pattern: String,
    #[serde(default = "default_path")]
    path: String,
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> Result<T, ToolError> {
    // a missing argument object means "all defaults"
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(ToolError::Encode)
}

/// Run a tool call and return its JSON result
pub fn dispatch<B: SearchBackend>(backend: &B, name: &str, args: Value) -> Result<Value, ToolError> {
    tracing::debug!(tool = name, "dispatching tool call");
    match name {
        SEARCH_FILES => {
            let args: SearchFilesArgs = parse_args(name, args)?;
            encode(&search::search_files(backend, &args.query, &args.path)?)
        }
        SEARCH_FILES_WITH_CONTEXT => {
            let args: SearchWithContextArgs = parse_args(name, args)?;
            let context = ContextSpec {
                before: args.lines_before,
                after: args.lines_after,
            };
            encode(&search::search_files_with_context(
                backend,
                &args.query,
                &args.path,
                context,
            )?)
        }
        FIND_FILES_BY_NAME => {
            let args: FindByNameArgs = parse_args(name, args)?;
            encode(&search::find_files_by_name(backend, &args.pattern, &args.path)?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}
