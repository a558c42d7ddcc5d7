//! Doctor - Dependency checking

use anyhow::Result;
use serde::Serialize;

use crate::backends::process::ProcessBackend;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::util::command_exists;

/// Dependency status
#[derive(Debug, Clone, Serialize)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
    pub command: String,
    pub used_by: &'static str,
    pub notes: &'static str,
}

impl DependencyStatus {
    fn check(name: &str, command: &str, used_by: &'static str, notes: &'static str) -> Self {
        Self {
            name: name.to_string(),
            available: command_exists(command),
            command: command.to_string(),
            used_by,
            notes,
        }
    }

    pub fn summary(&self) -> String {
        let status = if self.available { "✓" } else { "✗" };
        let found = if self.available {
            format!("found: {}", self.command)
        } else {
            format!("not found: {}", self.command)
        };
        format!("{} {} ({}) - {}", status, self.name, self.used_by, found)
    }
}

/// Check the programs the backend is configured to run
pub fn check_dependencies(backend: &ProcessBackend) -> Vec<DependencyStatus> {
    vec![
        DependencyStatus::check(
            "grep",
            backend.grep_bin(),
            "search, context",
            "Install GNU grep, or point --grep-bin / GREPCTX_GREP at a compatible binary",
        ),
        DependencyStatus::check(
            "find",
            backend.find_bin(),
            "find",
            "Install findutils, or point --find-bin / GREPCTX_FIND at a compatible binary",
        ),
    ]
}

/// Run the doctor command
pub fn run_doctor(backend: &ProcessBackend, config: RenderConfig) -> Result<()> {
    let deps = check_dependencies(backend);

    match config.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let rendered = if config.pretty {
                serde_json::to_string_pretty(&deps)?
            } else {
                serde_json::to_string(&deps)?
            };
            println!("{}", rendered);
        }
        OutputFormat::Markdown | OutputFormat::Raw => {
            for dep in &deps {
                println!("{}", dep.summary());
                if !dep.available {
                    println!("  Note: {}", dep.notes);
                }
            }
        }
    }

    let missing: Vec<_> = deps.iter().filter(|d| !d.available).collect();
    if !missing.is_empty() {
        tracing::warn!(missing = missing.len(), "search backends are missing");
        eprintln!("\n⚠️  Some required dependencies are missing!");
    }

    Ok(())
}
