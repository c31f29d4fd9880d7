//! Target template parsing and rendering.
//!
//! A placeholder is `{` + one or more characters other than `{`/`}` + `}`.
//! Anything else, including stray or unbalanced braces, is literal text.
//! There is no escape syntax.

use crate::routing::captures::CaptureLookup;
use crate::routing::resolver::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed upstream URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTemplate {
    segments: Vec<Segment>,
}

impl TargetTemplate {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find(['{', '}']) {
                Some(end) if end > 0 && after.as_bytes()[end] == b'}' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(after[..end].to_string()));
                    rest = &after[end + 1..];
                }
                _ => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Placeholder tokens in template order, without braces.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(token) => Some(token.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `captures`.
    ///
    /// A token is looked up as a named group first, then as a group index.
    /// The first token with no value fails the whole render.
    pub fn render<C>(&self, captures: &C) -> Result<String, ResolveError>
    where
        C: CaptureLookup + ?Sized,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(token) => {
                    let value = captures
                        .named(token)
                        .or_else(|| token.parse::<usize>().ok().and_then(|i| captures.positional(i)))
                        .ok_or_else(|| ResolveError::MissingCapture(format!("{{{token}}}")))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
