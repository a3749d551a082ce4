//! PHP lexer producing a lossless token sequence.
//!
//! Concatenating the contents of the produced tokens yields the input text
//! byte-for-byte. String literals, heredocs and comments are kept as opaque
//! single tokens.

use thiserror::Error;

use super::token::{Token, TokenKind};

/// Lexing failures. Unterminated comments are not errors: like PHP, the
/// comment simply runs to the end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },
    #[error("unterminated heredoc `{label}` starting at byte {offset}")]
    UnterminatedHeredoc { label: String, offset: usize },
}

/// Operators longer than one character, longest first.
const MULTI_CHAR_OPERATORS: &[&str] = &[
    "**=", "...", "<=>", "===", "!==", "<<=", ">>=", "??=", "?->", "++", "--", "->", "=>", "::",
    "==", "!=", "<>", "<=", ">=", "&&", "||", "??", "+=", "-=", "*=", "/=", ".=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

/// Byte cursor over the input text.
struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    fn peek_byte_at(&self, n: usize) -> Option<u8> {
        self.input.as_bytes().get(self.offset + n).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advances by `count` bytes, clamped to the input length.
    fn advance_by(&mut self, count: usize) {
        self.offset = (self.offset + count).min(self.input.len());
    }

    /// Advances past one (possibly multi-byte) character.
    fn advance_char(&mut self) {
        let width = self.rest().chars().next().map_or(1, char::len_utf8);
        self.advance_by(width);
    }

    fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while let Some(byte) = self.peek_byte() {
            if !predicate(byte) {
                break;
            }
            self.offset += 1;
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0x80
}

fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

fn is_php_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Tokenizes a complete PHP file.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while !self.cursor.is_eof() {
            self.lex_inline_html();
            while !self.cursor.is_eof() {
                if self.cursor.starts_with("?>") {
                    self.lex_close_tag();
                    break;
                }
                self.lex_php_token()?;
            }
        }
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let content = self.cursor.slice_from(start);
        if !content.is_empty() {
            self.tokens.push(Token::new(kind, content));
        }
    }

    /// Consumes text up to and including the next open tag.
    fn lex_inline_html(&mut self) {
        let start = self.cursor.offset;
        let rest = self.cursor.rest();
        let Some((html_len, tag_len)) = find_open_tag(rest) else {
            self.cursor.advance_by(rest.len());
            self.push(TokenKind::InlineHtml, start);
            return;
        };

        self.cursor.advance_by(html_len);
        self.push(TokenKind::InlineHtml, start);

        let tag_start = self.cursor.offset;
        self.cursor.advance_by(tag_len);
        self.push(TokenKind::OpenTag, tag_start);
    }

    fn lex_close_tag(&mut self) {
        let start = self.cursor.offset;
        self.cursor.advance_by(2);
        if self.cursor.starts_with("\r\n") {
            self.cursor.advance_by(2);
        } else if self.cursor.peek_byte() == Some(b'\n') {
            self.cursor.advance_by(1);
        }
        self.push(TokenKind::CloseTag, start);
    }

    fn lex_php_token(&mut self) -> Result<(), LexError> {
        let start = self.cursor.offset;
        let Some(byte) = self.cursor.peek_byte() else {
            return Ok(());
        };

        match byte {
            b if is_php_whitespace(b) => {
                self.cursor.advance_while(is_php_whitespace);
                self.push(TokenKind::Whitespace, start);
            }
            b'#' if self.cursor.peek_byte_at(1) == Some(b'[') => {
                self.cursor.advance_by(2);
                self.push(TokenKind::Attribute, start);
            }
            b'#' => self.lex_line_comment(start),
            b'/' if self.cursor.peek_byte_at(1) == Some(b'/') => self.lex_line_comment(start),
            b'/' if self.cursor.peek_byte_at(1) == Some(b'*') => self.lex_block_comment(start),
            b'$' if self.cursor.peek_byte_at(1).is_some_and(is_ident_start) => {
                self.cursor.advance_by(1);
                self.cursor.advance_while(is_ident_continue);
                self.push(TokenKind::Variable, start);
            }
            b'\\' if self.cursor.peek_byte_at(1).is_some_and(is_ident_start) => {
                self.lex_name(start);
            }
            b if is_ident_start(b) => self.lex_name(start),
            b if b.is_ascii_digit() => self.lex_number(start),
            b'.' if self.cursor.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.lex_number(start)
            }
            b'\'' => {
                self.lex_quoted(b'\'')?;
                self.push(TokenKind::String, start);
            }
            b'"' | b'`' => {
                self.lex_quoted(byte)?;
                self.push(TokenKind::String, start);
            }
            b'<' if self.cursor.starts_with("<<<") && self.heredoc_label().is_some() => {
                self.lex_heredoc(start)?;
            }
            _ => self.lex_punct(start),
        }
        Ok(())
    }

    /// `//` and `#` comments end before the line break or a close tag.
    fn lex_line_comment(&mut self, start: usize) {
        while let Some(byte) = self.cursor.peek_byte() {
            if byte == b'\n' || byte == b'\r' || self.cursor.starts_with("?>") {
                break;
            }
            self.cursor.advance_char();
        }
        self.push(TokenKind::Comment, start);
    }

    fn lex_block_comment(&mut self, start: usize) {
        let is_doc = self.cursor.starts_with("/**")
            && self.cursor.peek_byte_at(3).is_some_and(is_php_whitespace);
        self.cursor.advance_by(2);
        match self.cursor.rest().find("*/") {
            Some(end) => self.cursor.advance_by(end + 2),
            None => self.cursor.advance_by(self.cursor.rest().len()),
        }
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.push(kind, start);
    }

    fn lex_name(&mut self, start: usize) {
        loop {
            if self.cursor.peek_byte() == Some(b'\\') {
                self.cursor.advance_by(1);
            }
            self.cursor.advance_while(is_ident_continue);
            let continues = self.cursor.peek_byte() == Some(b'\\')
                && self.cursor.peek_byte_at(1).is_some_and(is_ident_start);
            if !continues {
                break;
            }
        }

        let word = self.cursor.slice_from(start);
        let kind = if word.contains('\\') {
            TokenKind::Name
        } else if self.after_member_access() {
            TokenKind::Identifier
        } else {
            TokenKind::from_word(word).unwrap_or(TokenKind::Identifier)
        };
        self.push(kind, start);
    }

    /// Words right after `->`, `?->` or `::` are member names, never keywords.
    fn after_member_access(&self) -> bool {
        self.tokens
            .iter()
            .rev()
            .find(|token| token.is_meaningful())
            .is_some_and(|token| {
                token.is_punct("->") || token.is_punct("?->") || token.is_punct("::")
            })
    }

    fn lex_number(&mut self, start: usize) {
        loop {
            self.cursor
                .advance_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
            let text = self.cursor.slice_from(start);
            let is_hex = text.starts_with("0x") || text.starts_with("0X");
            let exponent_sign = !is_hex
                && text.ends_with(['e', 'E'])
                && matches!(self.cursor.peek_byte(), Some(b'+' | b'-'))
                && self.cursor.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit());
            if !exponent_sign {
                break;
            }
            self.cursor.advance_by(1);
        }
        self.push(TokenKind::Number, start);
    }

    /// Consumes a quoted literal including both quotes.
    fn lex_quoted(&mut self, quote: u8) -> Result<(), LexError> {
        let start = self.cursor.offset;
        self.cursor.advance_by(1);
        while let Some(byte) = self.cursor.peek_byte() {
            match byte {
                b'\\' => {
                    self.cursor.advance_by(1);
                    self.cursor.advance_char();
                }
                b if b == quote => {
                    self.cursor.advance_by(1);
                    return Ok(());
                }
                b'{' if quote != b'\'' && self.cursor.peek_byte_at(1) == Some(b'$') => {
                    self.skip_interpolation()?;
                }
                _ => self.cursor.advance_char(),
            }
        }
        Err(LexError::UnterminatedString { offset: start })
    }

    /// Skips a `{$...}` interpolation, which may itself contain quoted strings.
    fn skip_interpolation(&mut self) -> Result<(), LexError> {
        let mut depth = 0usize;
        while let Some(byte) = self.cursor.peek_byte() {
            match byte {
                b'{' => {
                    depth += 1;
                    self.cursor.advance_by(1);
                }
                b'}' => {
                    self.cursor.advance_by(1);
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'\'' | b'"' => self.lex_quoted(byte)?,
                _ => self.cursor.advance_char(),
            }
        }
        Ok(())
    }

    /// Returns the heredoc label and the length of the `<<<` header line.
    fn heredoc_label(&self) -> Option<(String, usize)> {
        let rest = self.cursor.rest();
        let header = &rest[3..];
        let trimmed = header.trim_start_matches([' ', '\t']);
        let mut consumed = 3 + header.len() - trimmed.len();

        let (quote, body) = match trimmed.as_bytes().first() {
            Some(b'\'') => (Some('\''), &trimmed[1..]),
            Some(b'"') => (Some('"'), &trimmed[1..]),
            _ => (None, trimmed),
        };
        if quote.is_some() {
            consumed += 1;
        }

        let label_len = body
            .bytes()
            .take_while(|b| is_ident_continue(*b))
            .count();
        if label_len == 0 || !body.as_bytes().first().is_some_and(|b| is_ident_start(*b)) {
            return None;
        }
        let label = body[..label_len].to_string();
        consumed += label_len;

        let mut after = &body[label_len..];
        if let Some(q) = quote {
            after = after.strip_prefix(q)?;
            consumed += 1;
        }
        if after.starts_with("\r\n") {
            consumed += 2;
        } else if after.starts_with('\n') {
            consumed += 1;
        } else {
            return None;
        }
        Some((label, consumed))
    }

    fn lex_heredoc(&mut self, start: usize) -> Result<(), LexError> {
        let Some((label, header_len)) = self.heredoc_label() else {
            return Ok(());
        };
        self.cursor.advance_by(header_len);

        loop {
            let rest = self.cursor.rest();
            if rest.is_empty() {
                return Err(LexError::UnterminatedHeredoc {
                    label,
                    offset: start,
                });
            }
            let line_len = rest.find('\n').map_or(rest.len(), |i| i + 1);
            let line = &rest[..line_len];
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let candidate = &line[indent..];
            let closes = candidate.starts_with(label.as_str())
                && !candidate
                    .as_bytes()
                    .get(label.len())
                    .is_some_and(|b| is_ident_continue(*b));
            if closes {
                self.cursor.advance_by(indent + label.len());
                self.push(TokenKind::Heredoc, start);
                return Ok(());
            }
            self.cursor.advance_by(line_len);
        }
    }

    fn lex_punct(&mut self, start: usize) {
        let len = MULTI_CHAR_OPERATORS
            .iter()
            .find(|op| self.cursor.starts_with(op))
            .map(|op| op.len());
        match len {
            Some(len) => self.cursor.advance_by(len),
            None => self.cursor.advance_char(),
        }
        self.push(TokenKind::Punct, start);
    }
}

/// Finds the next open tag. Returns the offset of the tag and its length,
/// including the single whitespace character PHP folds into `<?php`.
fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find("<?") {
        let at = search_from + found;
        let after = &text[at + 2..];
        if after.starts_with('=') {
            return Some((at, 3));
        }
        if after
            .as_bytes()
            .get(..3)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(b"php"))
        {
            let tail = &after[3..];
            if tail.is_empty() {
                return Some((at, 5));
            }
            if tail.starts_with("\r\n") {
                return Some((at, 7));
            }
            if tail.as_bytes().first().is_some_and(|b| is_php_whitespace(*b)) {
                return Some((at, 6));
            }
        }
        search_from = at + 2;
    }
    None
}
