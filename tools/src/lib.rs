#![deny(warnings)]

pub mod check;
pub use crate::check::{check, Verdict};

pub mod grammar_file;
pub use crate::grammar_file::{load_grammar, parse_grammar, GrammarFileError};
