//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;

use crate::backends::process::{ProcessBackend, DEFAULT_FIND, DEFAULT_GREP};
use crate::core::model::Response;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::search::{self, ContextSpec, DEFAULT_CONTEXT_LINES, DEFAULT_PATH};
use crate::tools;

/// grepctx - structured text and filename search on top of grep and find.
#[derive(Parser, Debug)]
#[command(name = "grepctx")]
#[command(
    author,
    version,
    about,
    long_about = r#"grepctx runs grep/find over a directory tree and turns their plain-text
output into structured results.

Each command prints its result in the selected format (default: json).

Output formats:
- json: a single JSON document
- jsonl: one JSON value per line (one per match, one per path)
- md: human-friendly Markdown
- raw: grep-like plain text

Examples:
    grepctx search "TODO" src
    grepctx context "fn main" . -B 1 -A 3
    grepctx find "*.rs" crates
    grepctx call search_files_with_context '{"query": "panic!", "lines_after": 4}'
"#
)]
pub struct Cli {
    /// Output format (json/jsonl/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "json",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- json (default)\n\
- jsonl\n\
- md (markdown)\n\
- raw\n\n\
The `call` and `tools` commands always print JSON."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This affects raw match output and log lines on stderr."
    )]
    pub no_color: bool,

    /// Quiet mode (only errors are logged).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log backend invocations and result counts on stderr.\n\n\
The GREPCTX_LOG environment variable (an EnvFilter directive) takes precedence."
    )]
    pub verbose: bool,

    /// Program used for content search.
    #[arg(long, global = true, env = "GREPCTX_GREP", default_value = DEFAULT_GREP, value_name = "PROGRAM")]
    pub grep_bin: String,

    /// Program used for filename search.
    #[arg(long, global = true, env = "GREPCTX_FIND", default_value = DEFAULT_FIND, value_name = "PROGRAM")]
    pub find_bin: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List files whose content matches QUERY.
    #[command(
        long_about = r#"Run a recursive, case-sensitive grep and list the files that contain QUERY.

Prints {files, count, query, search_path}. Files are listed in the order grep
reported them; nothing is deduplicated.

Examples:
    grepctx search "unsafe" src
"#
    )]
    Search {
        /// Text or regular expression to search for.
        #[arg(value_name = "QUERY", allow_hyphen_values = true)]
        query: String,

        /// Directory to search in.
        #[arg(value_name = "PATH", default_value = DEFAULT_PATH)]
        path: String,
    },

    /// Show matches for QUERY with surrounding lines.
    #[command(
        long_about = r#"Run grep with context lines and split its output into one entry per
match block: {file, context}. Blocks from the same file stay separate.

Examples:
    grepctx context "fn main"
    grepctx context "TODO" src -B 0 -A 5
"#
    )]
    Context {
        /// Text or regular expression to search for.
        #[arg(value_name = "QUERY", allow_hyphen_values = true)]
        query: String,

        /// Directory to search in.
        #[arg(value_name = "PATH", default_value = DEFAULT_PATH)]
        path: String,

        /// Lines of context before each match.
        #[arg(short = 'B', long = "before", value_name = "N", default_value_t = DEFAULT_CONTEXT_LINES)]
        before: usize,

        /// Lines of context after each match.
        #[arg(short = 'A', long = "after", value_name = "N", default_value_t = DEFAULT_CONTEXT_LINES)]
        after: usize,
    },

    /// Find regular files whose name matches a glob.
    #[command(long_about = r#"Run find with -name PATTERN -type f and list the matching paths.

Quote the pattern so the shell does not expand it.

Examples:
    grepctx find "*.toml"
    grepctx find "mod.rs" src
"#)]
    Find {
        /// File name pattern (shell wildcards).
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Directory to search in.
        #[arg(value_name = "PATH", default_value = DEFAULT_PATH)]
        path: String,
    },

    /// Print the tool definitions (name, description, parameter schema).
    Tools,

    /// Invoke a tool by name with a JSON argument object.
    #[command(
        long_about = r#"Dispatch a tool call the way an agent would: TOOL is one of the names
printed by `grepctx tools`, ARGS is a JSON object with its parameters.

When ARGS is omitted or `-`, the object is read from stdin. Missing optional
parameters take their defaults.

Examples:
    grepctx call search_files '{"query": "TODO"}'
    echo '{"pattern": "*.md"}' | grepctx call find_files_by_name
"#
    )]
    Call {
        /// Tool name.
        #[arg(value_name = "TOOL")]
        tool: String,

        /// JSON argument object (defaults to stdin).
        #[arg(value_name = "ARGS")]
        args: Option<String>,
    },

    /// Check that the configured grep and find programs are available.
    Doctor,
}

/// Read the tool arguments from the command line or stdin
fn read_call_args(args: Option<String>) -> Result<serde_json::Value> {
    let text = match args {
        Some(text) if text != "-" => text,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read tool arguments from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&text).context("tool arguments are not valid JSON")
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_else(|err: String| {
        tracing::warn!("{}, falling back to json", err);
        OutputFormat::Json
    });
    if cli.no_color {
        colored::control::set_override(false);
    }
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(!cli.no_color);

    let backend = ProcessBackend::new(cli.grep_bin, cli.find_bin);

    let response: Response = match cli.command {
        Commands::Search { query, path } => {
            search::search_files(&backend, &query, &path)?.into()
        }
        Commands::Context {
            query,
            path,
            before,
            after,
        } => search::search_files_with_context(
            &backend,
            &query,
            &path,
            ContextSpec { before, after },
        )?
        .into(),
        Commands::Find { pattern, path } => {
            search::find_files_by_name(&backend, &pattern, &path)?.into()
        }
        Commands::Tools => return print_json(&tools::tool_defs(), cli.pretty),
        Commands::Call { tool, args } => {
            let args = read_call_args(args)?;
            let value = tools::dispatch(&backend, &tool, args)?;
            return print_json(&value, cli.pretty);
        }
        Commands::Doctor => return crate::backends::doctor::run_doctor(&backend, render_config),
    };

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&response));

    Ok(())
}
