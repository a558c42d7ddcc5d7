//! Error types shared by the backends and the tool surface

use thiserror::Error;

/// Failure to run an external search backend.
///
/// Only launch failures are represented here. A backend that runs and exits
/// non-zero is reported through `RawOutput::status`, never as an error.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("search backend `{program}` could not be launched: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while dispatching a tool call
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool `{0}`")]
    UnknownTool(String),

    #[error("invalid arguments for `{tool}`: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to encode result: {0}")]
    Encode(serde_json::Error),
}
