//! Search backend capability
//!
//! The search operations never spawn processes themselves; they describe what
//! they want as an `Invocation` and hand it to a `SearchBackend`.

use crate::core::error::BackendError;

/// One request to the external search tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Files whose content matches `query` (`grep -r -l`)
    ListFiles { query: &'a str, path: &'a str },
    /// Matching lines with `before`/`after` lines of context (`grep -r -n -B -A`)
    WithContext {
        query: &'a str,
        path: &'a str,
        before: usize,
        after: usize,
    },
    /// Regular files whose name matches a glob (`find -name -type f`)
    FindByName { pattern: &'a str, path: &'a str },
}

impl Invocation<'_> {
    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Invocation::ListFiles { .. } => "list_files",
            Invocation::WithContext { .. } => "with_context",
            Invocation::FindByName { .. } => "find_by_name",
        }
    }
}

/// What a backend process left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
}

impl RawOutput {
    /// Output of a successful run
    #[cfg(test)]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    /// The backend hit a problem rather than just finding nothing.
    ///
    /// grep exits 1 on no match and 2 on errors; find exits 1 on errors and
    /// says why on stderr.
    pub fn is_abnormal(&self) -> bool {
        match self.status {
            Some(0) => false,
            Some(1) => !self.stderr.trim().is_empty(),
            _ => true,
        }
    }
}

/// Runs an `Invocation` and captures its output.
///
/// Implementations must only fail when the backend cannot be launched at all.
/// A non-zero exit status is reported through `RawOutput::status`.
pub trait SearchBackend {
    fn run(&self, invocation: &Invocation<'_>) -> Result<RawOutput, BackendError>;
}

impl<B: SearchBackend + ?Sized> SearchBackend for &B {
    fn run(&self, invocation: &Invocation<'_>) -> Result<RawOutput, BackendError> {
        (**self).run(invocation)
    }
}

/// Backend that replays canned output and records what it was asked to run
#[cfg(test)]
pub(crate) struct StaticBackend {
    output: Option<RawOutput>,
    pub calls: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl StaticBackend {
    pub fn new(output: RawOutput) -> Self {
        Self {
            output: Some(output),
            calls: Default::default(),
        }
    }

    pub fn stdout(stdout: &str) -> Self {
        Self::new(RawOutput::success(stdout))
    }

    /// A backend whose program cannot be launched
    pub fn unavailable() -> Self {
        Self {
            output: None,
            calls: Default::default(),
        }
    }
}

#[cfg(test)]
impl SearchBackend for StaticBackend {
    fn run(&self, invocation: &Invocation<'_>) -> Result<RawOutput, BackendError> {
        self.calls.borrow_mut().push(format!("{:?}", invocation));
        self.output.clone().ok_or_else(|| BackendError::Unavailable {
            program: "static".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }
}
