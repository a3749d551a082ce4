//! Structured view over a `/** ... */` doc comment.
//!
//! A [`DocBlock`] is an ordered list of [`Line`]s. Annotations are derived
//! from the lines on demand and can be removed surgically; everything that
//! was not removed is re-serialised byte-for-byte by [`DocBlock::content`].
//!
//! ```
//! use rofix::docblock::DocBlock;
//!
//! let mut doc = DocBlock::parse("/**\n * Name.\n * @readonly\n */").unwrap();
//! let annotation = doc.annotations_of_type(&["readonly"]).remove(0);
//! doc.remove_annotation(&annotation);
//! assert_eq!(doc.content(), "/**\n * Name.\n */");
//! ```

mod annotation;
mod line;

use thiserror::Error;

pub use annotation::Annotation;
pub use line::Line;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocBlockError {
    #[error("doc comment does not start with `/**`")]
    MissingOpening,
    #[error("doc comment is not terminated with `*/`")]
    Unterminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    lines: Vec<Line>,
}

impl DocBlock {
    pub fn parse(content: &str) -> Result<Self, DocBlockError> {
        if !content.starts_with("/**") {
            return Err(DocBlockError::MissingOpening);
        }
        if content.len() < 5 || !content.ends_with("*/") {
            return Err(DocBlockError::Unterminated);
        }

        Ok(Self {
            lines: content.split_inclusive('\n').map(Line::new).collect(),
        })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All annotations in source order.
    pub fn annotations(&self) -> Vec<Annotation> {
        let mut annotations = Vec::new();
        let mut index = 0;

        while index < self.lines.len() {
            let line = &self.lines[index];
            if !line.contains_a_tag() {
                index += 1;
                continue;
            }

            let tag = Annotation::tag_name(line).unwrap_or_default();
            let end = self.annotation_end(index);
            annotations.push(Annotation::new(tag, index, end));
            index = end + 1;
        }

        annotations
    }

    /// Annotations whose tag is one of `tags`, in source order.
    pub fn annotations_of_type(&self, tags: &[&str]) -> Vec<Annotation> {
        self.annotations()
            .into_iter()
            .filter(|annotation| tags.contains(&annotation.tag()))
            .collect()
    }

    /// Source text of one annotation.
    pub fn annotation_content(&self, annotation: &Annotation) -> String {
        self.lines[annotation.start()..=annotation.end()]
            .iter()
            .map(Line::content)
            .collect()
    }

    /// Removes an annotation in place.
    ///
    /// When nothing but delimiters is left afterwards the whole doc block
    /// becomes empty, so [`DocBlock::content`] returns `""`.
    pub fn remove_annotation(&mut self, annotation: &Annotation) {
        let end = annotation.end().min(self.lines.len().saturating_sub(1));
        for line in &mut self.lines[annotation.start()..=end] {
            if line.is_the_start() && line.is_the_end() {
                line.clear();
            } else if line.is_the_start() {
                line.keep_start();
            } else if line.is_the_end() {
                line.keep_end();
            } else {
                line.clear();
            }
        }

        if !self.has_text() {
            self.lines.iter_mut().for_each(Line::clear);
        }
    }

    pub fn content(&self) -> String {
        self.lines.iter().map(Line::content).collect()
    }

    /// Last line that belongs to the annotation starting at `start`.
    ///
    /// A line without useful content ends the annotation unless the line
    /// after it continues the annotation text.
    fn annotation_end(&self, start: usize) -> usize {
        let mut index = start;

        while let Some(line) = self.lines.get(index + 1) {
            if line.contains_a_tag() {
                break;
            }
            if !line.contains_useful_content() {
                let continues = self
                    .lines
                    .get(index + 2)
                    .is_some_and(|next| next.contains_useful_content() && !next.contains_a_tag());
                if !continues {
                    break;
                }
            }
            index += 1;
        }

        index
    }

    /// Whether anything besides delimiters, leading asterisks and whitespace
    /// is left.
    fn has_text(&self) -> bool {
        let content = self.content();
        let inner = content.trim();
        let inner = inner.strip_prefix("/**").unwrap_or(inner);
        let inner = inner.strip_suffix("*/").unwrap_or(inner);

        inner
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .any(|line| !line.is_empty())
    }
}
