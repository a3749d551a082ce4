//! Rofix - migrate `@readonly` phpdoc annotations to PHP 8.1 readonly properties
//!
//! Rofix is a CLI tool and library that rewrites PHP sources token by token:
//! a property documented with `@readonly` gets the native `readonly` modifier
//! and the annotation is removed from its docblock.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reports)
//! - `config`: Configuration file loading and parsing
//! - `docblock`: PHPDoc comment model (lines, annotations, removal)
//! - `fixer`: The `Fixer` trait and the readonly property fixer
//! - `runner`: File discovery and the parallel fix driver
//! - `tokenizer`: PHP lexer and the editable token collection

pub mod cli;
pub mod config;
pub mod docblock;
pub mod fixer;
pub mod runner;
pub mod tokenizer;
