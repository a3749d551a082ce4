//! Token model for PHP source.

use std::fmt;

/// Lexical category of a [`Token`].
///
/// Only the kinds the fixers need to tell apart get their own variant; every
/// other reserved word is a [`TokenKind::Keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<?php` or `<?=` including the trailing whitespace that PHP folds into it.
    OpenTag,
    /// `?>`
    CloseTag,
    /// Text outside of PHP tags.
    InlineHtml,
    Whitespace,
    /// `//`, `#` or `/* */` comment.
    Comment,
    /// `/** */` comment.
    DocComment,
    /// `$name`
    Variable,
    Public,
    Protected,
    Private,
    Var,
    Readonly,
    Static,
    Function,
    Class,
    Const,
    /// Any other reserved word.
    Keyword,
    /// Bare identifier (`string`, `Foo`, `int`).
    Identifier,
    /// Qualified or fully qualified name (`Foo\Bar`, `\Foo`, `namespace\Foo`).
    Name,
    Number,
    /// Single or double quoted string literal.
    String,
    /// Heredoc or nowdoc, from `<<<` to the closing label.
    Heredoc,
    /// `#[` opening an attribute group.
    Attribute,
    /// Operators and punctuation.
    Punct,
}

impl TokenKind {
    /// Visibility and legacy `var` modifiers that may precede a property name.
    pub const PROPERTY_MODIFIERS: [TokenKind; 4] = [
        TokenKind::Private,
        TokenKind::Protected,
        TokenKind::Public,
        TokenKind::Var,
    ];

    /// Maps a word to its keyword kind, matching PHP's case-insensitive keywords.
    pub fn from_word(word: &str) -> Option<Self> {
        let lower = word.to_ascii_lowercase();
        let kind = match lower.as_str() {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "var" => Self::Var,
            "readonly" => Self::Readonly,
            "static" => Self::Static,
            "function" | "fn" => Self::Function,
            "class" | "interface" | "trait" | "enum" => Self::Class,
            "const" => Self::Const,
            "abstract" | "and" | "array" | "as" | "break" | "callable" | "case" | "catch"
            | "clone" | "continue" | "declare" | "default" | "do" | "echo" | "else"
            | "elseif" | "empty" | "enddeclare" | "endfor" | "endforeach" | "endif"
            | "endswitch" | "endwhile" | "eval" | "exit" | "die" | "extends" | "final"
            | "finally" | "for" | "foreach" | "global" | "goto" | "if" | "implements"
            | "include" | "include_once" | "instanceof" | "insteadof" | "isset" | "list"
            | "match" | "namespace" | "new" | "or" | "print" | "require" | "require_once"
            | "return" | "switch" | "throw" | "try" | "unset" | "use" | "while" | "xor"
            | "yield" => Self::Keyword,
            _ => return None,
        };
        Some(kind)
    }
}

/// A single lexical token: a kind tag plus its literal source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    content: String,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn whitespace(content: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, content)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_given_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any_kind(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment | TokenKind::DocComment)
    }

    /// Whether the token matters to the grammar (not whitespace, not a comment).
    pub fn is_meaningful(&self) -> bool {
        !self.is_whitespace() && !self.is_comment()
    }

    /// Whether the token is the given punctuation.
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punct && self.content == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
