#![deny(warnings)]

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    NonTerm(String),
    // A terminal accepts exactly the input token spelled like its name
    Term(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerm(name) => name,
            Symbol::Term(name) => name,
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Symbol::Term(name) => name == input,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Term(_))
    }

    pub fn nonterm(&self) -> Option<&str> {
        match self {
            Symbol::NonTerm(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Term(name) => write!(f, "Term({})", name),
            Symbol::NonTerm(name) => write!(f, "NonTerm({})", name),
        }
    }
}

/// A production `head -> spec`. An empty `spec` derives the empty string.
#[derive(PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: String,
    pub spec: Vec<Rc<Symbol>>,
}

impl Rule {
    #[cfg(test)]
    pub fn new(head: &str, spec: &[Rc<Symbol>]) -> Self {
        Rule {
            head: head.to_string(),
            spec: spec.to_vec(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.head,
            self.spec
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(" ")
        )
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Duplicate Symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Missing Symbol: {0}")]
    MissingSymbol(String),
    #[error("Rule head must be NonTerm: {0}")]
    TerminalHead(String),
    #[error("Duplicate Rule: {0}")]
    DuplicateRule(String),
    #[error("Start symbol must be NonTerm: {0}")]
    StartNotNonTerm(String),
}

/// An immutable context-free grammar. Every declared NonTerm owns an ordered
/// (possibly empty) group of rules.
#[derive(Clone)]
pub struct Grammar {
    start: String,
    rules: Vec<Rc<Rule>>,
    groups: HashMap<String, Vec<Rc<Rule>>>,
    nonterms: Vec<String>,
    terminals: Vec<String>,
}

impl Grammar {
    /// Build a grammar from raw declarations. Each raw symbol in a
    /// production is classified by looking it up in the declared names.
    /// Repeated declarations and productions collapse into one, and a name
    /// declared both ways is a NonTerm. Only undeclared symbols fail.
    pub fn from_declarations<V, T, P, H, R>(
        variables: V,
        terminals: T,
        start: &str,
        productions: P,
    ) -> Result<Grammar, GrammarError>
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
        P: IntoIterator<Item = (H, R)>,
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut builder = GrammarBuilder::default();
        // NonTerms go first so they win over a terminal of the same name
        for v in variables {
            builder.add_symbol(Symbol::NonTerm(v.as_ref().to_string()), true);
        }
        for t in terminals {
            builder.add_symbol(Symbol::Term(t.as_ref().to_string()), true);
        }
        for (head, spec) in productions {
            let spec: Vec<_> = spec.into_iter().collect();
            builder.add_rule(head.as_ref(), &spec, true);
        }
        builder.into_grammar(start)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> &[Rc<Rule>] {
        &self.rules
    }

    /// Rules for `head` in declaration order, `None` if `head` isn't a NonTerm.
    pub fn productions(&self, head: &str) -> Option<&[Rc<Rule>]> {
        self.groups.get(head).map(|group| group.as_slice())
    }

    pub fn nonterms(&self) -> &[String] {
        &self.nonterms
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Start: {}", self.start)?;
        for head in &self.nonterms {
            let group = &self.groups[head];
            if group.is_empty() {
                continue;
            }
            writeln!(f)?;
            for rule in group {
                writeln!(f, "{}", rule)?;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct GrammarBuilder {
    symbols: HashMap<String, Rc<Symbol>>,
    nonterms: Vec<String>,
    terminals: Vec<String>,
    rules: Vec<Rc<Rule>>,
    groups: HashMap<String, Vec<Rc<Rule>>>,
    error: Option<GrammarError>,
}

/// Builds a Gramar while validating existence of Symbols and checking rules.
/// The first error found is kept and reported by `into_grammar`.
impl GrammarBuilder {
    fn fail(&mut self, error: GrammarError) {
        self.error.get_or_insert(error);
    }

    fn add_symbol(&mut self, symbol: Symbol, ignore_dups: bool) {
        // Check for duplicate symbols to avoid overwriting by mistake
        if self.symbols.contains_key(symbol.name()) {
            if !ignore_dups {
                self.fail(GrammarError::DuplicateSymbol(symbol.name().to_string()));
            }
            return;
        }
        let name = symbol.name().to_string();
        match &symbol {
            Symbol::NonTerm(_) => {
                self.groups.insert(name.clone(), Vec::new());
                self.nonterms.push(name.clone());
            }
            Symbol::Term(_) => self.terminals.push(name.clone()),
        }
        self.symbols.insert(name, Rc::new(symbol));
    }

    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(Symbol::NonTerm(name.into()), false);
        self
    }

    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(Symbol::Term(name.into()), false);
        self
    }

    // Try versions silently ignore pre-existent symbols and don't chain,
    // which is convenient when declaring symbols in loops.

    pub fn nonterm_try(&mut self, name: impl Into<String>) {
        self.add_symbol(Symbol::NonTerm(name.into()), true);
    }

    pub fn terminal_try(&mut self, name: impl Into<String>) {
        self.add_symbol(Symbol::Term(name.into()), true);
    }

    // Register new rules for the grammar
    fn add_rule<S: AsRef<str>>(&mut self, head: &str, spec: &[S], ignore_dups: bool) {
        // First check that all symbols have been registered (need references)
        if let Some(s) = spec.iter().find(|s| !self.symbols.contains_key(s.as_ref())) {
            self.fail(GrammarError::MissingSymbol(s.as_ref().to_string()));
            return;
        }
        // Check the head
        match self.symbols.get(head).map(|s| s.is_terminal()) {
            Some(true) => {
                self.fail(GrammarError::TerminalHead(head.to_string()));
                return;
            }
            Some(false) => (),
            None => {
                self.fail(GrammarError::MissingSymbol(head.to_string()));
                return;
            }
        }
        let rule = Rc::new(Rule {
            head: head.to_string(),
            spec: spec.iter().map(|s| self.symbols[s.as_ref()].clone()).collect(),
        });
        // NOTE: `Rc`s compare on inner value
        if self.groups[head].contains(&rule) {
            if !ignore_dups {
                self.fail(GrammarError::DuplicateRule(rule.to_string()));
            }
            return;
        }
        if let Some(group) = self.groups.get_mut(head) {
            group.push(rule.clone());
        }
        self.rules.push(rule);
    }

    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
    where
        S: AsRef<str>,
        S2: AsRef<str>,
    {
        self.add_rule(head.as_ref(), spec, false);
        self
    }

    pub fn rule_try<S, S2>(&mut self, head: S, spec: &[S2])
    where
        S: AsRef<str>,
        S2: AsRef<str>,
    {
        self.add_rule(head.as_ref(), spec, true)
    }

    pub fn into_grammar(self, start: impl Into<String>) -> Result<Grammar, GrammarError> {
        let start = start.into();
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.symbols.get(&start) {
            None => Err(GrammarError::MissingSymbol(start)),
            Some(s) if s.is_terminal() => Err(GrammarError::StartNotNonTerm(start)),
            Some(_) => Ok(Grammar {
                start,
                rules: self.rules,
                groups: self.groups,
                nonterms: self.nonterms,
                terminals: self.terminals,
            }),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////
