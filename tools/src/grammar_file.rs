#![deny(warnings)]

//! Reader for the line based grammar format:
//!
//! ```text
//! Terminais
//! [ a ]
//! [ b ]
//! Variaveis
//! [ S ]
//! Inicial
//! [ S ]
//! Regras
//! [ S ] > [ a ] [ S ] [ b ] ;
//! [ S ] > ;                     # empty production
//! ```
//!
//! English section names (`Terminals`, `Variables`, `Initial`, `Rules`) are
//! accepted too. `#` comments run to the end of the line.

use earlrec::{Grammar, GrammarError};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
    #[error("no initial symbol declared")]
    MissingStart,
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Section {
    Terminals,
    Variables,
    Initial,
    Rules,
}

fn section_header(line: &str) -> Option<Section> {
    match line {
        "Terminais" | "Terminals" => Some(Section::Terminals),
        "Variaveis" | "Variables" => Some(Section::Variables),
        "Inicial" | "Initial" => Some(Section::Initial),
        "Regras" | "Rules" => Some(Section::Rules),
        _ => None,
    }
}

// Names inside `[ ... ]` groups, eg: "[ a ] [ S ]" -> ["a", "S"]
fn bracketed(text: &str) -> Result<Vec<String>, String> {
    let mut names = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .ok_or_else(|| format!("expected '[' before '{}'", rest))?;
        let close = inner.find(']').ok_or("missing ']'")?;
        let name = inner[..close].trim();
        if name.is_empty() {
            return Err("empty symbol name".to_string());
        }
        names.push(name.to_string());
        rest = inner[close + 1..].trim_start();
    }
    Ok(names)
}

fn single(text: &str) -> Result<String, String> {
    let mut names = bracketed(text)?;
    match names.len() {
        1 => Ok(names.remove(0)),
        n => Err(format!("expected one symbol, found {}", n)),
    }
}

// "[ S ] > [ a ] [ S ] ;" -> ("S", " [ a ] [ S ] ")
fn split_rule(line: &str) -> Result<(String, &str), String> {
    let close = line.find(']').ok_or("missing ']'")?;
    let head = single(&line[..=close])?;
    let spec = line[close + 1..]
        .trim_start()
        .strip_prefix('>')
        .ok_or("expected '>' after rule head")?;
    Ok((head, spec.trim_end().trim_end_matches(';')))
}

/// Parse grammar declarations and build the typed `Grammar`.
pub fn parse_grammar(source: &str) -> Result<Grammar, GrammarFileError> {
    let mut section = None;
    let mut variables = Vec::new();
    let mut terminals = Vec::new();
    let mut start = None;
    let mut productions = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = section_header(line) {
            section = Some(header);
            continue;
        }
        let syntax = |msg: String| GrammarFileError::Syntax { line: idx + 1, msg };
        match section {
            None => return Err(syntax(format!("'{}' outside of any section", line))),
            Some(Section::Terminals) => terminals.extend(bracketed(line).map_err(syntax)?),
            Some(Section::Variables) => variables.extend(bracketed(line).map_err(syntax)?),
            Some(Section::Initial) => {
                if start.is_some() {
                    return Err(syntax("initial symbol declared twice".to_string()));
                }
                start = Some(single(line).map_err(syntax)?);
            }
            Some(Section::Rules) => {
                let (head, spec) = split_rule(line).map_err(syntax)?;
                productions.push((head, bracketed(spec).map_err(syntax)?));
            }
        }
    }

    let start = start.ok_or(GrammarFileError::MissingStart)?;
    Ok(Grammar::from_declarations(variables, terminals, &start, productions)?)
}

/// Read and parse a grammar file.
pub fn load_grammar(path: impl AsRef<Path>) -> Result<Grammar, GrammarFileError> {
    let source = fs_err::read_to_string(path.as_ref())?;
    parse_grammar(&source)
}

///////////////////////////////////////////////////////////////////////////////
