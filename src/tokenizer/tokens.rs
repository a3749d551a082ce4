//! Mutable token sequence for one source file.

use std::ops::Index;

use super::lexer::{LexError, tokenize};
use super::token::{Token, TokenKind};

/// Ordered, in-place mutable sequence of tokens.
///
/// Indices are only stable until a mutation at or before them; callers that
/// mutate while walking re-derive positions with [`Tokens::next_meaningful`]
/// from a live index instead of caching offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    tokens: Vec<Token>,
}

impl Tokens {
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::from_tokens(tokenize(source)?))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Re-serialises the stream to source text.
    pub fn to_source(&self) -> String {
        self.tokens.iter().map(Token::content).collect()
    }

    /// Whether any token of the given kind exists. Stops at the first match.
    pub fn is_token_kind_found(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|token| token.is_given_kind(kind))
    }

    /// Index of the first meaningful token after `index`.
    pub fn next_meaningful(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].is_meaningful())
    }

    /// Index of the last meaningful token before `index`.
    pub fn prev_meaningful(&self, index: usize) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| self.tokens[i].is_meaningful())
    }

    pub fn insert_at(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) {
        let index = index.min(self.tokens.len());
        self.tokens.splice(index..index, tokens);
    }

    pub fn replace_at(&mut self, index: usize, token: Token) {
        if let Some(slot) = self.tokens.get_mut(index) {
            *slot = token;
        }
    }

    /// Removes the token at `index` and joins the whitespace on both sides of
    /// the gap into a single token.
    ///
    /// When both sides break lines, the removed token sat on its own line and
    /// that line is dropped with it. Otherwise the side that breaks the line is
    /// kept, falling back to the preceding whitespace.
    pub fn clear_token_and_merge_surrounding_whitespace(&mut self, index: usize) {
        if index >= self.tokens.len() {
            return;
        }
        self.tokens.remove(index);

        let prev = index
            .checked_sub(1)
            .filter(|&i| self.tokens[i].is_whitespace());
        let next = Some(index).filter(|&i| i < self.tokens.len() && self.tokens[i].is_whitespace());
        let (Some(prev), Some(next)) = (prev, next) else {
            return;
        };

        let merged = merge_whitespace(self.tokens[prev].content(), self.tokens[next].content());
        self.tokens[prev] = Token::whitespace(merged);
        self.tokens.remove(next);
    }
}

fn merge_whitespace(before: &str, after: &str) -> String {
    match (before.rfind('\n'), after.contains('\n')) {
        (Some(last_break), true) => {
            let kept = &before[..last_break];
            let kept = kept.strip_suffix('\r').unwrap_or(kept);
            format!("{}{}", kept, after)
        }
        (None, true) => after.to_string(),
        _ => before.to_string(),
    }
}

impl Index<usize> for Tokens {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
