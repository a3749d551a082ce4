use regex::Regex;
use std::sync::LazyLock;

use super::line::Line;

// Capture group 1: tag name, e.g. `readonly`, `psalm-readonly`, `phpstan:type`
static TAG_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:/\*\*)?\s*\*?\s*@([a-zA-Z0-9_\\-]+(?::[a-zA-Z0-9_\\-]+)?)").unwrap()
});

/// A tagged entry of a [`super::DocBlock`]: the tag line plus its
/// continuation lines.
///
/// Line indices point into the owning doc block and stay valid across
/// removals, since removed lines keep their slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    tag: String,
    start: usize,
    end: usize,
}

impl Annotation {
    pub(super) fn new(tag: String, start: usize, end: usize) -> Self {
        Self { tag, start, end }
    }

    /// Tag name without the leading `@`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Index of the tag line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last line, inclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    pub(super) fn tag_name(line: &Line) -> Option<String> {
        TAG_NAME_REGEX
            .captures(line.content())
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }
}
