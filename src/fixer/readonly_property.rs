//! Migrates `@readonly` phpdoc annotations to native `readonly` properties.
//!
//! ```text
//! /**
//!  * @readonly                    →     public readonly string $bar;
//!  */
//! public string $bar;
//! ```
//!
//! For every doc comment, each read-only annotation is resolved to the
//! declaration it documents by walking past the modifiers that may precede a
//! property name. Annotations that do not document a property are left alone.

use std::path::Path;

use tracing::debug;

use super::{CodeSample, FixError, Fixer, FixerDefinition, PhpVersion};
use crate::docblock::{Annotation, DocBlock};
use crate::tokenizer::{Token, TokenKind, Tokens};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadonlyPropertyOptions {
    /// Version the fixed code targets; below 8.1 the fixer does nothing.
    pub php_version: PhpVersion,
    /// Also add the native `readonly` modifier to the declaration.
    pub insert_modifier: bool,
    /// Tags treated as the read-only marker.
    pub annotations: Vec<String>,
}

impl Default for ReadonlyPropertyOptions {
    fn default() -> Self {
        Self {
            php_version: PhpVersion::default(),
            insert_modifier: true,
            annotations: vec!["readonly".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadonlyPropertyFixer {
    options: ReadonlyPropertyOptions,
}

/// A visibility or `var` keyword, spanning a `(set)` suffix when present.
#[derive(Debug, Clone, Copy)]
struct Modifier {
    keyword: usize,
    end: usize,
}

/// Property declaration a doc comment was found to document.
#[derive(Debug)]
struct PropertyDeclaration {
    /// Visibility and `var` modifiers, in source order.
    modifiers: Vec<Modifier>,
    /// Index of an existing `readonly` modifier.
    readonly: Option<usize>,
    has_type: bool,
    variable: usize,
}

impl PropertyDeclaration {
    /// Index `readonly` goes after: the end of the last visibility modifier.
    fn last_visibility(&self, tokens: &Tokens) -> Option<usize> {
        self.modifiers
            .iter()
            .rev()
            .find(|modifier| !tokens[modifier.keyword].is_given_kind(TokenKind::Var))
            .map(|modifier| modifier.end)
    }
}

impl ReadonlyPropertyFixer {
    pub fn new(options: ReadonlyPropertyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReadonlyPropertyOptions {
        &self.options
    }

    /// Fixes one doc comment. Returns `true` when the comment token was
    /// removed from the stream.
    fn fix_doc_comment(
        &self,
        file: &Path,
        tokens: &mut Tokens,
        index: usize,
    ) -> Result<bool, FixError> {
        let mut doc = DocBlock::parse(tokens[index].content())?;
        let tags: Vec<&str> = self.options.annotations.iter().map(String::as_str).collect();
        let annotations = doc.annotations_of_type(&tags);

        for annotation in &annotations {
            let Some(declaration) = find_declaration(tokens, index) else {
                continue;
            };
            let property = tokens[declaration.variable].content().to_string();

            if self.options.insert_modifier && declaration.readonly.is_none() {
                if declaration.modifiers.is_empty() || !declaration.has_type {
                    debug!(
                        file = %file.display(),
                        property = %property,
                        "skipping untyped or unmodified declaration"
                    );
                    continue;
                }
                insert_readonly_modifier(tokens, &declaration);
            }

            let removed = self.remove_annotation(tokens, index, &mut doc, annotation);
            debug!(
                file = %file.display(),
                property = %property,
                comment_removed = removed,
                "migrated readonly annotation"
            );
            if removed {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Removes the annotation and writes the comment back, dropping the
    /// comment token when nothing is left of it. Returns `true` on drop.
    fn remove_annotation(
        &self,
        tokens: &mut Tokens,
        index: usize,
        doc: &mut DocBlock,
        annotation: &Annotation,
    ) -> bool {
        doc.remove_annotation(annotation);
        let content = doc.content();

        if content.is_empty() {
            tokens.clear_token_and_merge_surrounding_whitespace(index);
            return true;
        }

        tokens.replace_at(index, Token::new(TokenKind::DocComment, content));
        false
    }
}

impl Fixer for ReadonlyPropertyFixer {
    fn name(&self) -> &'static str {
        "readonly_property_declaration"
    }

    fn definition(&self) -> FixerDefinition {
        FixerDefinition {
            summary: "Replace readonly signature from docblock to property declaration (PHP 8.1).",
            samples: vec![
                CodeSample::new(
                    "<?php\nclass Foo {\n    /**\n     * @readonly\n     */\n    public string $bar;\n}\n",
                ),
                CodeSample::new("<?php\nclass Foo {\n    /** @readonly */\n    public string $foo;\n}\n"),
            ],
        }
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_token_kind_found(TokenKind::DocComment)
    }

    fn apply_fix(&self, file: &Path, tokens: &mut Tokens) -> Result<(), FixError> {
        if !self.options.php_version.supports_readonly_properties() {
            debug!(
                file = %file.display(),
                php_version = %self.options.php_version,
                "native readonly properties unavailable"
            );
            return Ok(());
        }

        let mut index = 0;
        while index < tokens.len() {
            if tokens[index].is_given_kind(TokenKind::DocComment)
                && self.fix_doc_comment(file, tokens, index)?
            {
                // The next token now sits at `index`.
                continue;
            }
            index += 1;
        }

        Ok(())
    }
}

/// Walks from the doc comment at `comment` to the variable it documents.
///
/// Visibility and `var` modifiers are skipped, as is an existing `readonly`.
/// Once a modifier was seen, a property type may follow. Anything else
/// means the comment does not document a property.
///
/// A visibility keyword may carry a set-visibility suffix, as in
/// `private(set)`. Any other `(` right after a visibility keyword aborts.
fn find_declaration(tokens: &Tokens, comment: usize) -> Option<PropertyDeclaration> {
    let mut index = tokens.next_meaningful(comment)?;
    let mut modifiers = Vec::new();
    let mut readonly = None;

    loop {
        let token = &tokens[index];
        if token.is_any_kind(&TokenKind::PROPERTY_MODIFIERS) {
            let end = set_visibility_end(tokens, index)?;
            modifiers.push(Modifier {
                keyword: index,
                end,
            });
            index = end;
        } else if token.is_given_kind(TokenKind::Readonly) {
            readonly = Some(index);
        } else {
            break;
        }
        index = tokens.next_meaningful(index)?;
    }

    let mut has_type = false;
    if !modifiers.is_empty() || readonly.is_some() {
        while is_type_token(&tokens[index]) {
            has_type = true;
            index = tokens.next_meaningful(index)?;
        }
    }

    tokens[index]
        .is_given_kind(TokenKind::Variable)
        .then_some(PropertyDeclaration {
            modifiers,
            readonly,
            has_type,
            variable: index,
        })
}

/// End of the modifier starting at `keyword`: the `)` of a directly attached
/// `(set)` suffix, or the keyword itself. `None` when another `(` follows.
fn set_visibility_end(tokens: &Tokens, keyword: usize) -> Option<usize> {
    let attached = |offset: usize| tokens.get(keyword + offset);

    if !attached(1).is_some_and(|token| token.is_punct("(")) {
        return Some(keyword);
    }

    let is_set = attached(2).is_some_and(|token| token.content().eq_ignore_ascii_case("set"));
    let is_closed = attached(3).is_some_and(|token| token.is_punct(")"));
    (is_set && is_closed).then_some(keyword + 3)
}

/// Tokens that can make up a property type, including nullable, union,
/// intersection and DNF types.
fn is_type_token(token: &Token) -> bool {
    match token.kind() {
        TokenKind::Identifier | TokenKind::Name => true,
        TokenKind::Keyword => token.content().eq_ignore_ascii_case("array"),
        TokenKind::Punct => matches!(token.content(), "?" | "|" | "&" | "(" | ")"),
        _ => false,
    }
}

/// Adds `readonly` after the last visibility modifier. A lone `var` becomes
/// `public readonly`, since `var` cannot be combined with other modifiers.
fn insert_readonly_modifier(tokens: &mut Tokens, declaration: &PropertyDeclaration) {
    let after = match declaration.last_visibility(tokens) {
        Some(index) => index,
        None => {
            let Some(var) = declaration.modifiers.last().map(|modifier| modifier.keyword) else {
                return;
            };
            tokens.replace_at(var, Token::new(TokenKind::Public, "public"));
            var
        }
    };

    tokens.insert_at(
        after + 1,
        [
            Token::whitespace(" "),
            Token::new(TokenKind::Readonly, "readonly"),
        ],
    );
}
