//! Process backend
//!
//! Runs `grep` and `find` as child processes and captures their output.

use std::ffi::OsString;
use std::process::Command;

use crate::backends::backend::{Invocation, RawOutput, SearchBackend};
use crate::core::error::BackendError;
use crate::core::util::decode_output;

/// Default content search program
pub const DEFAULT_GREP: &str = "grep";

/// Default filename search program
pub const DEFAULT_FIND: &str = "find";

/// Backend that shells out to grep/find, one process per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBackend {
    grep_bin: String,
    find_bin: String,
}

impl Default for ProcessBackend {
    fn default() -> Self {
        Self::new(DEFAULT_GREP, DEFAULT_FIND)
    }
}

impl ProcessBackend {
    pub fn new(grep_bin: impl Into<String>, find_bin: impl Into<String>) -> Self {
        Self {
            grep_bin: grep_bin.into(),
            find_bin: find_bin.into(),
        }
    }

    pub fn grep_bin(&self) -> &str {
        &self.grep_bin
    }

    pub fn find_bin(&self) -> &str {
        &self.find_bin
    }

    /// Program and argument list for an invocation
    pub fn command_line(&self, invocation: &Invocation<'_>) -> (&str, Vec<OsString>) {
        match *invocation {
            Invocation::ListFiles { query, path } => (
                self.grep_bin.as_str(),
                vec!["-r".into(), "-l".into(), "-e".into(), query.into(), path.into()],
            ),
            Invocation::WithContext {
                query,
                path,
                before,
                after,
            } => (
                self.grep_bin.as_str(),
                vec![
                    "-r".into(),
                    "-n".into(),
                    "-H".into(),
                    format!("-B{}", before).into(),
                    format!("-A{}", after).into(),
                    "-e".into(),
                    query.into(),
                    path.into(),
                ],
            ),
            Invocation::FindByName { pattern, path } => (
                self.find_bin.as_str(),
                vec![
                    path.into(),
                    "-name".into(),
                    pattern.into(),
                    "-type".into(),
                    "f".into(),
                ],
            ),
        }
    }
}

impl SearchBackend for ProcessBackend {
    fn run(&self, invocation: &Invocation<'_>) -> Result<RawOutput, BackendError> {
        let (program, args) = self.command_line(invocation);
        tracing::debug!(kind = invocation.kind(), program, ?args, "running search backend");

        let output = Command::new(program)
            .args(&args)
            .output()
            .map_err(|source| BackendError::Unavailable {
                program: program.to_string(),
                source,
            })?;

        let raw = RawOutput {
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
            status: output.status.code(),
        };

        if raw.is_abnormal() {
            tracing::warn!(
                program,
                status = ?raw.status,
                stderr = raw.stderr.trim(),
                "search backend exited abnormally"
            );
        } else {
            tracing::debug!(program, status = ?raw.status, bytes = raw.stdout.len(), "search backend finished");
        }

        Ok(raw)
    }
}
