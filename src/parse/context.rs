//! Context block parser
//!
//! Turns the output of `grep -n -B<n> -A<m>` into one `MatchRecord` per
//! contiguous block:
//!
//! ```text
//! file1.txt:5:hello world        <- match line   (path:N:text)
//! file1.txt-6-more context       <- context line (path-N-text)
//! --                             <- block separator
//! file2.txt:11:hello again
//! ```
//!
//! Parsing runs in two stages. `classify` lexes a single line, and a fold
//! over `BlockState` groups the lexed lines into records. A record is filed
//! under the path of the last line attributed before it was sealed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::MatchRecord;
use crate::core::util::output_lines;

/// Token grep prints between two unrelated blocks
pub const SEPARATOR: &str = "--";

/// `:N:` (match line) or `-N-` (context line) directly after the path
static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(\d+):|-(\d+)-").expect("Invalid NUMBERED_PREFIX regex"));

/// Same as `NUMBERED_PREFIX`, anchored at the start of the remainder
static NUMBERED_PREFIX_AT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?::(\d+):|-(\d+)-)").expect("Invalid NUMBERED_PREFIX_AT_START regex"));

/// Which delimiter separated the path from the line content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `:` - the line matched the query
    Match,
    /// `-` - the line is surrounding context
    Context,
}

impl Delimiter {
    #[cfg(test)]
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Match => ':',
            Delimiter::Context => '-',
        }
    }
}

/// A backend line with its path prefix recovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub path: &'a str,
    pub delimiter: Delimiter,
    /// Present when grep was run with `-n`
    pub line_number: Option<u64>,
    /// Everything after the path prefix (and line number, if any)
    pub text: &'a str,
    /// The full line as the backend printed it
    pub raw: &'a str,
}

/// A lexed line of grep output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    Separator,
    Content(ContentLine<'a>),
    /// No recognizable path prefix; contributes to no block
    Malformed(&'a str),
}

/// Where the previous numbered content line of the current block left off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'s> {
    pub file: &'s str,
    pub line_number: u64,
}

/// Split `line` assuming it starts with `file` followed by `:N:` or `-N-`
pub fn split_known<'a>(line: &'a str, file: &str) -> Option<ContentLine<'a>> {
    if file.is_empty() {
        return None;
    }
    let rest = line.strip_prefix(file)?;
    let caps = NUMBERED_PREFIX_AT_START.captures(rest)?;
    numbered_content(line, file.len(), &caps)
}

/// Numbered prefix that ends the path, honouring the first `:` of the line.
///
/// A `:N:` only counts when it starts at the first `:`, and a `-N-` only when
/// it starts before it. The match form wins when both qualify.
fn split_leftmost(line: &str) -> Option<ContentLine<'_>> {
    let first_colon = line.find(':');
    let mut context_form = None;
    for caps in NUMBERED_PREFIX.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        let start = whole.start();
        if first_colon.is_some_and(|colon| start > colon) {
            break;
        }
        if start == 0 {
            continue;
        }
        match numbered_content(line, start, &caps) {
            Some(content) if content.delimiter == Delimiter::Match => return Some(content),
            Some(content) => {
                context_form.get_or_insert(content);
            }
            None => {}
        }
    }
    context_form
}

/// Classify one line of grep output.
///
/// Path recovery tries, in order:
/// 1. the path of the previous line, if the line continues it with the next
///    line number (`prev`), so paths like `2024-01-05-post.md` and contents
///    like `10:30:45` do not confuse the split;
/// 2. a `:N:` starting at the first `:`, since every block holds at least
///    one match line;
/// 3. the leftmost `-N-` before the first `:`;
/// 4. the first `:` (`a/b.txt:foo:bar` -> `a/b.txt`).
///
/// Nothing past the first `:` can end the path.
///
/// A line that is exactly `--` is always a separator, even if it was really
/// part of a file's content: plain grep output cannot tell the two apart.
pub fn classify<'a>(line: &'a str, prev: Option<Cursor<'_>>) -> RawLine<'a> {
    if line == SEPARATOR {
        return RawLine::Separator;
    }

    if let Some(prev) = prev {
        if let Some(content) = split_known(line, prev.file)
            .filter(|c| c.line_number == prev.line_number.checked_add(1))
        {
            return RawLine::Content(content);
        }
    }

    if let Some(content) = split_leftmost(line) {
        return RawLine::Content(content);
    }

    // Unnumbered output: only the first ':' separates path from text
    match line.find(':') {
        Some(idx) if idx > 0 => RawLine::Content(ContentLine {
            path: &line[..idx],
            delimiter: Delimiter::Match,
            line_number: None,
            text: &line[idx + 1..],
            raw: line,
        }),
        _ => RawLine::Malformed(line),
    }
}

/// Build a content line whose path ends at `path_end`, where the numbered
/// prefix captured in `caps` begins.
fn numbered_content<'a>(
    line: &'a str,
    path_end: usize,
    caps: &regex::Captures<'_>,
) -> Option<ContentLine<'a>> {
    let (delimiter, digits) = match (caps.get(1), caps.get(2)) {
        (Some(d), _) => (Delimiter::Match, d.as_str()),
        (None, Some(d)) => (Delimiter::Context, d.as_str()),
        (None, None) => return None,
    };
    let line_number = digits.parse::<u64>().ok()?;
    let prefix_len = caps.get(0)?.len();

    Some(ContentLine {
        path: &line[..path_end],
        delimiter,
        line_number: Some(line_number),
        text: &line[path_end + prefix_len..],
        raw: line,
    })
}

/// Parser state threaded through the fold
#[derive(Debug, Default)]
struct BlockState {
    current_file: Option<String>,
    /// Line number of the last numbered line in the open block
    last_line: Option<u64>,
    current_block: Vec<String>,
    records: Vec<MatchRecord>,
}

impl BlockState {
    fn cursor(&self) -> Option<Cursor<'_>> {
        let file = self.current_file.as_deref()?;
        let line_number = self.last_line?;
        Some(Cursor { file, line_number })
    }

    fn step(mut self, line: RawLine<'_>) -> Self {
        match line {
            RawLine::Separator => {
                // current_file survives the separator
                self.seal();
                self.last_line = None;
            }
            RawLine::Content(content) => {
                self.current_block.push(content.raw.to_string());
                self.last_line = content.line_number;
                if self.current_file.as_deref() != Some(content.path) {
                    self.current_file = Some(content.path.to_string());
                }
            }
            RawLine::Malformed(raw) => {
                tracing::trace!(line = raw, "dropping line without a path prefix");
            }
        }
        self
    }

    fn seal(&mut self) {
        if self.current_block.is_empty() {
            return;
        }
        if let Some(file) = &self.current_file {
            let context = std::mem::take(&mut self.current_block);
            self.records.push(MatchRecord::new(file.clone(), context));
        }
    }

    fn finish(mut self) -> Vec<MatchRecord> {
        self.seal();
        self.records
    }
}

/// Parse grep context output into per-block match records.
///
/// Records keep the input order and are not merged per file: two blocks from
/// the same file yield two records. Blank input yields no records.
pub fn parse_context_output(raw: &str) -> Vec<MatchRecord> {
    let records = output_lines(raw)
        .fold(BlockState::default(), |state, line| {
            let lexed = classify(line, state.cursor());
            state.step(lexed)
        })
        .finish();

    tracing::debug!(records = records.len(), "parsed context output");
    records
}
