//! Renderer module
//!
//! Renders a Response to different output formats: json, jsonl, md, raw

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{FileListResult, MatchRecord, PathListResult, Response};
use crate::parse::context::{split_known, Delimiter, SEPARATOR};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Jsonl,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Renderer for search responses
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_config(RenderConfig::new(format))
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a response to a string
    pub fn render(&self, response: &Response) -> String {
        match self.config.format {
            OutputFormat::Json => self.encode_json(response),
            OutputFormat::Jsonl => self.render_jsonl(response),
            OutputFormat::Markdown => self.render_markdown(response),
            OutputFormat::Raw => self.render_raw(response),
        }
    }

    fn encode_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }

    /// Render as JSON Lines (one JSON value per line)
    fn render_jsonl(&self, response: &Response) -> String {
        let lines: Vec<String> = match response {
            Response::Files(result) => vec![self.encode_json(result)],
            Response::Matches(records) => records.iter().map(|r| self.encode_json(r)).collect(),
            Response::Paths(paths) => paths.paths.iter().map(|p| self.encode_json(p)).collect(),
        };
        lines.join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as Markdown
    fn render_markdown(&self, response: &Response) -> String {
        match response {
            Response::Files(result) => render_files_md(result),
            Response::Matches(records) => render_matches_md(records),
            Response::Paths(paths) => render_paths_md(paths),
        }
    }

    /// Render as plain text in grep's own layout
    fn render_raw(&self, response: &Response) -> String {
        match response {
            Response::Files(result) => result.files.join("\n"),
            Response::Paths(paths) => paths.paths.join("\n"),
            Response::Matches(records) => records
                .iter()
                .map(|record| self.render_block_raw(record))
                .collect::<Vec<_>>()
                .join(format!("\n{}\n", SEPARATOR).as_str()),
        }
    }

    fn render_block_raw(&self, record: &MatchRecord) -> String {
        if !self.config.color {
            return record.context_text();
        }
        record
            .context
            .iter()
            .map(|line| match split_known(line, &record.file) {
                Some(content) => {
                    let prefix = &line[..line.len() - content.text.len()];
                    match content.delimiter {
                        Delimiter::Match => {
                            format!("{}{}", prefix.magenta(), content.text.bold())
                        }
                        Delimiter::Context => format!("{}{}", prefix.dimmed(), content.text),
                    }
                }
                None => line.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_files_md(result: &FileListResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "## Files containing `{}` in `{}` ({})\n\n",
        result.query, result.search_path, result.count
    ));
    for file in &result.files {
        output.push_str(&format!("- `{}`\n", file));
    }
    output
}

fn render_matches_md(records: &[MatchRecord]) -> String {
    let mut output = String::new();
    output.push_str(&format!("## Matches ({})\n\n", records.len()));
    for record in records {
        output.push_str(&format!("### {}\n\n", record.file));
        output.push_str("```\n");
        output.push_str(&record.context_text());
        output.push_str("\n```\n\n");
    }
    output
}

fn render_paths_md(paths: &PathListResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("## Paths ({})\n\n", paths.paths.len()));
    for path in &paths.paths {
        output.push_str(&format!("- `{}`\n", path));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matches() -> Response {
        Response::from(vec![
            MatchRecord::new(
                "file1.txt",
                vec!["file1.txt:5:hello world".to_string(), "file1.txt-6-more".to_string()],
            ),
            MatchRecord::new("file2.txt", vec!["file2.txt:11:hello again".to_string()]),
        ])
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("raw".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json_matches() {
        let output = Renderer::new(OutputFormat::Json).render(&sample_matches());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["context"], "file1.txt:5:hello world\nfile1.txt-6-more");
    }

    #[test]
    fn test_render_json_pretty_is_multiline() {
        let config = RenderConfig::new(OutputFormat::Json).with_pretty(true);
        let output = Renderer::with_config(config).render(&sample_matches());
        assert!(output.lines().count() > 2);
    }

    #[test]
    fn test_render_jsonl_one_line_per_record() {
        let output = Renderer::new(OutputFormat::Jsonl).render(&sample_matches());
        assert_eq!(output.lines().count(), 2);

        let files = Response::from(FileListResult::new(vec!["a".into(), "b".into()], "q", "."));
        let output = Renderer::new(OutputFormat::Jsonl).render(&files);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_render_raw_matches_uses_separator() {
        let output = Renderer::new(OutputFormat::Raw).render(&sample_matches());
        assert_eq!(
            output,
            "file1.txt:5:hello world\nfile1.txt-6-more\n--\nfile2.txt:11:hello again"
        );
    }

    #[test]
    fn test_render_raw_color_keeps_text() {
        colored::control::set_override(true);
        let config = RenderConfig::new(OutputFormat::Raw).with_color(true);
        let output = Renderer::with_config(config).render(&sample_matches());
        colored::control::unset_override();
        assert!(output.contains("hello world"));
        assert!(output.contains("file1.txt:5:"));
    }

    #[test]
    fn test_render_raw_paths() {
        let paths = Response::from(PathListResult::from(vec!["./a".into(), "./b".into()]));
        assert_eq!(Renderer::new(OutputFormat::Raw).render(&paths), "./a\n./b");
    }

    #[test]
    fn test_render_markdown_files() {
        let files = Response::from(FileListResult::new(vec!["src/lib.rs".into()], "fn", "src"));
        let output = Renderer::new(OutputFormat::Markdown).render(&files);
        assert!(output.starts_with("## Files containing `fn` in `src` (1)"));
        assert!(output.contains("- `src/lib.rs`"));
    }

    #[test]
    fn test_render_markdown_matches() {
        let output = Renderer::new(OutputFormat::Markdown).render(&sample_matches());
        assert!(output.contains("### file1.txt"));
        assert!(output.contains("```\nfile2.txt:11:hello again\n```"));
    }
}
