//! Source injection
//!
//! Splices rendered documentation into the `DOCUMENTATION`, `RETURN` and
//! `EXAMPLES` assignments of a module source. Locating and rewriting the
//! literals sits behind [`SourceEditor`]; [`AssignmentEditor`] handles
//! top-level Python string assignments and leaves every other byte as is.

use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use tracing::debug;

use crate::error::{Result, SpecDocError};

/// Finds and rewrites named top-level string literals in a source unit
pub trait SourceEditor {
    /// Body of the literal assigned to `name`, without quotes or prefix
    fn find_literal(&self, source: &str, name: &str) -> Option<String>;

    /// Replace the literal assigned to `name` so that its body is `body`
    fn replace_literal(&self, source: &str, name: &str, body: &str) -> Result<String>;

    /// Whether `name` is assigned at all, literal or not
    fn has_assignment(&self, source: &str, name: &str) -> bool {
        self.find_literal(source, name).is_some()
    }
}

/// Names of the assignments that receive each documentation block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionTargets {
    #[serde(default = "default_documentation_field")]
    pub documentation_field: String,

    #[serde(default = "default_return_field")]
    pub return_field: String,

    #[serde(default = "default_examples_field")]
    pub examples_field: String,
}

fn default_documentation_field() -> String {
    "DOCUMENTATION".to_string()
}

fn default_return_field() -> String {
    "RETURN".to_string()
}

fn default_examples_field() -> String {
    "EXAMPLES".to_string()
}

impl Default for InjectionTargets {
    fn default() -> Self {
        Self {
            documentation_field: default_documentation_field(),
            return_field: default_return_field(),
            examples_field: default_examples_field(),
        }
    }
}

/// Rendered text for each documentation block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectedDocs {
    pub documentation: String,
    pub return_values: String,
    pub examples: String,
}

impl InjectedDocs {
    /// Empty blocks, used to clear previously injected docs
    pub fn cleared() -> Self {
        Self::default()
    }

    fn by_field<'a>(&'a self, targets: &'a InjectionTargets) -> [(&'a str, &'a str); 3] {
        [
            (targets.documentation_field.as_str(), self.documentation.as_str()),
            (targets.return_field.as_str(), self.return_values.as_str()),
            (targets.examples_field.as_str(), self.examples.as_str()),
        ]
    }
}

/// Literal body written for a block: a leading newline, then the text
fn literal_body(text: &str) -> String {
    format!("\n{}", text)
}

/// Write `docs` into the target assignments of `source`
pub fn inject_docs(
    source: &str,
    docs: &InjectedDocs,
    editor: &dyn SourceEditor,
    targets: &InjectionTargets,
) -> Result<String> {
    let mut output = source.to_string();
    for (field, text) in docs.by_field(targets) {
        debug!(field, bytes = text.len(), "injecting documentation block");
        output = editor.replace_literal(&output, field, &literal_body(text))?;
    }
    Ok(output)
}

/// A documentation block whose injected text is out of date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDrift {
    pub field: String,
    /// Unified diff from the current literal to the generated one
    pub diff: String,
}

/// Compare the blocks currently in `source` with `docs`
pub fn check_injected(
    source: &str,
    docs: &InjectedDocs,
    editor: &dyn SourceEditor,
    targets: &InjectionTargets,
) -> Result<Vec<FieldDrift>> {
    let mut drift = Vec::new();
    for (field, text) in docs.by_field(targets) {
        let current = editor
            .find_literal(source, field)
            .ok_or_else(|| SpecDocError::MissingInjectionField {
                field: field.to_string(),
            })?;
        let expected = literal_body(text);
        if current == expected {
            continue;
        }

        let text_diff = TextDiff::from_lines(current.as_str(), expected.as_str());
        let current_header = format!("{} (current)", field);
        let generated_header = format!("{} (generated)", field);
        let diff = text_diff
            .unified_diff()
            .header(&current_header, &generated_header)
            .to_string();
        drift.push(FieldDrift {
            field: field.to_string(),
            diff,
        });
    }
    Ok(drift)
}

/// Span of a string literal inside a source unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LiteralSpan {
    /// Start of the prefix or opening quote
    start: usize,
    /// One past the closing quote
    end: usize,
    body_start: usize,
    body_end: usize,
}

/// What a top-level assignment binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assignment {
    Literal(LiteralSpan),
    /// Any other expression, such as a call
    Expression,
}

/// Edits `NAME = "..."` assignments at the top level of a Python module.
///
/// Only statements are considered: text inside string literals, comments
/// and open brackets never counts as an assignment.
#[derive(Debug, Clone)]
pub struct AssignmentEditor {
    assignment: Regex,
}

impl Default for AssignmentEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentEditor {
    pub fn new() -> Self {
        Self {
            assignment: Regex::new(r"\A([A-Za-z_][A-Za-z0-9_]*)[ \t]*=[ \t]*")
                .expect("assignment pattern is valid"),
        }
    }

    /// First top-level assignment to `name`
    fn locate(&self, source: &str, name: &str) -> Option<Assignment> {
        let bytes = source.as_bytes();
        let mut depth = 0usize;
        let mut i = 0;

        while i < bytes.len() {
            // Line starts are always char boundaries
            if depth == 0 && (i == 0 || bytes[i - 1] == b'\n') {
                if let Some(caps) = self.assignment.captures(&source[i..]) {
                    let value_start = i + caps.get(0).map_or(0, |m| m.end());
                    if &caps[1] == name && bytes.get(value_start) != Some(&b'=') {
                        return Some(match scan_literal(source, value_start) {
                            Some(span) => Assignment::Literal(span),
                            None => Assignment::Expression,
                        });
                    }
                }
            }

            match bytes[i] {
                b'#' => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                    continue;
                }
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                b'"' | b'\'' => {
                    if let Some(span) = scan_literal(source, i) {
                        i = span.end;
                        continue;
                    }
                }
                b if b.is_ascii_alphabetic() || b == b'_' => {
                    // Identifiers, including string prefixes such as `r` or `rb`
                    let word_start = i;
                    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                        i += 1;
                    }
                    if matches!(bytes.get(i), Some(b'"' | b'\'')) {
                        if let Some(span) = scan_literal(source, word_start) {
                            i = span.end;
                        }
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    fn locate_literal(&self, source: &str, name: &str) -> Option<LiteralSpan> {
        match self.locate(source, name)? {
            Assignment::Literal(span) => Some(span),
            Assignment::Expression => None,
        }
    }
}

impl SourceEditor for AssignmentEditor {
    fn find_literal(&self, source: &str, name: &str) -> Option<String> {
        self.locate_literal(source, name)
            .map(|span| source[span.body_start..span.body_end].to_string())
    }

    fn replace_literal(&self, source: &str, name: &str, body: &str) -> Result<String> {
        // Raw triple-quoted strings cannot hold `"""`, end in a backslash or end in a quote
        if body.contains("\"\"\"") || body.ends_with('\\') || body.ends_with('"') {
            return Err(SpecDocError::UnrepresentableLiteral {
                field: name.to_string(),
            });
        }

        let span = self
            .locate_literal(source, name)
            .ok_or_else(|| SpecDocError::MissingInjectionField {
                field: name.to_string(),
            })?;

        let mut output = String::with_capacity(source.len() + body.len());
        output.push_str(&source[..span.start]);
        output.push_str("r\"\"\"");
        output.push_str(body);
        output.push_str("\"\"\"");
        output.push_str(&source[span.end..]);
        Ok(output)
    }

    fn has_assignment(&self, source: &str, name: &str) -> bool {
        self.locate(source, name).is_some()
    }
}

/// Scan a Python string literal starting at `start`
fn scan_literal(source: &str, start: usize) -> Option<LiteralSpan> {
    let rest = &source[start..];
    let prefix_len = rest
        .chars()
        .take(2)
        .take_while(|c| matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F'))
        .count();
    let after_prefix = &rest[prefix_len..];

    let quote = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|quote| after_prefix.starts_with(quote))?;

    let body_start = start + prefix_len + quote.len();
    // Byte-wise scan: quotes and backslashes are ASCII, so every stop is a char boundary
    let bytes = source.as_bytes();
    let mut i = body_start;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if quote.len() == 1 && bytes[i] == b'\n' {
            return None;
        }
        if bytes[i..].starts_with(quote.as_bytes()) {
            return Some(LiteralSpan {
                start,
                end: i + quote.len(),
                body_start,
                body_end: i,
            });
        }
        i += 1;
    }
    None
}
