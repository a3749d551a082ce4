use regex::Regex;
use std::sync::LazyLock;

// `*` followed by optional whitespace and `@`
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\s*@").unwrap());

// `*` followed by something other than whitespace
static USEFUL_CONTENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\s*\S").unwrap());

// Keeps the opening `/**` of a line
static START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\s*/\*\*)[^\r\n]*").unwrap());

// Keeps the indentation and closing `*/` of a line
static END_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\s*)\S.*(\*/.*)").unwrap());

/// One line of a doc comment, including its line ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: String,
}

impl Line {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn contains_a_tag(&self) -> bool {
        TAG_REGEX.is_match(&self.content)
    }

    /// Whether the line carries text beyond the comment delimiters.
    pub fn contains_useful_content(&self) -> bool {
        USEFUL_CONTENT_REGEX.is_match(&self.content)
            && !self
                .content
                .replace(['/', '*'], " ")
                .trim()
                .is_empty()
    }

    pub fn is_the_start(&self) -> bool {
        self.content.contains("/**")
    }

    pub fn is_the_end(&self) -> bool {
        self.content.contains("*/")
    }

    pub(super) fn clear(&mut self) {
        self.content.clear();
    }

    /// Drops everything after the opening `/**`, keeping the line ending.
    pub(super) fn keep_start(&mut self) {
        self.content = START_REGEX.replace(&self.content, "$1").into_owned();
    }

    /// Drops everything before the closing `*/` except the indentation.
    pub(super) fn keep_end(&mut self) {
        self.content = END_REGEX.replace(&self.content, "$1$2").into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_a_tag() {
        assert!(Line::new("     * @readonly\n").contains_a_tag());
        assert!(Line::new("/** @readonly */").contains_a_tag());
        assert!(!Line::new("     * mail me at a@b.c\n").contains_a_tag());
    }

    #[test]
    fn test_contains_useful_content() {
        assert!(Line::new("     * Description\n").contains_useful_content());
        assert!(!Line::new("     *\n").contains_useful_content());
        assert!(!Line::new("/**\n").contains_useful_content());
        assert!(!Line::new("     */").contains_useful_content());
    }

    #[test]
    fn test_start_and_end() {
        assert!(Line::new("/**\n").is_the_start());
        assert!(Line::new("     */").is_the_end());
        assert!(!Line::new("     * @var int\n").is_the_start());
    }

    #[test]
    fn test_keep_start() {
        let mut line = Line::new("/** @readonly\n");
        line.keep_start();
        assert_eq!(line.content(), "/**\n");
    }

    #[test]
    fn test_keep_start_preserves_crlf() {
        let mut line = Line::new("/** @readonly\r\n");
        line.keep_start();
        assert_eq!(line.content(), "/**\r\n");
    }

    #[test]
    fn test_keep_end() {
        let mut line = Line::new("     * @readonly */");
        line.keep_end();
        assert_eq!(line.content(), "     */");
    }
}
