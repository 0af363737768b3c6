#![deny(warnings)]

mod grammar;
pub use crate::grammar::{Grammar, GrammarBuilder, GrammarError, Rule, Symbol};

mod items;
pub use crate::items::{Chart, Column, Item};

mod recognizer;
pub use crate::recognizer::{recognize, EarleyRecognizer, Recognition};

#[cfg(test)]
mod recognizer_test;
