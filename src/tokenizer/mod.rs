//! PHP tokenizer.
//!
//! - `token`: [`Token`] and [`TokenKind`]
//! - `lexer`: source text to token list
//! - `tokens`: [`Tokens`], the mutable per-file token stream fixers work on

mod lexer;
mod token;
mod tokens;

pub use lexer::{LexError, tokenize};
pub use token::{Token, TokenKind};
pub use tokens::Tokens;
