#![deny(warnings)]

use crate::grammar::{Grammar, Rule, Symbol};
use crate::items::{Chart, Column, Item};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

pub struct EarleyRecognizer {
    pub grammar: Grammar,
}

/// Verdict of a run together with every Column built on the way.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub accepted: bool,
    pub chart: Chart,
}

/// Check if `tokens` is a sentence of `grammar`.
pub fn recognize<T>(grammar: &Grammar, tokens: T) -> bool
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    build_chart(grammar, tokens).accepted
}

///////////////////////////////////////////////////////////////////////////////

impl EarleyRecognizer {
    pub fn new(grammar: Grammar) -> EarleyRecognizer {
        EarleyRecognizer { grammar }
    }

    pub fn recognize<T>(&self, tokens: T) -> bool
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        build_chart(&self.grammar, tokens).accepted
    }

    /// Same as `recognize` but hands back the Chart for inspection.
    pub fn trace<T>(&self, tokens: T) -> Recognition
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        build_chart(&self.grammar, tokens)
    }
}

// Builder made grammars have a (maybe empty) group for every NonTerm
fn productions<'g>(grammar: &'g Grammar, head: &str) -> &'g [Rc<Rule>] {
    grammar
        .productions(head)
        .unwrap_or_else(|| panic!("No rule group for NonTerm: {}", head))
}

/// Populate column 0 with every rule reachable from the start symbol through
/// leftmost NonTerms. Each NonTerm is expanded once.
fn initial_column(grammar: &Grammar) -> Column {
    let mut column = Column::new();
    let mut scheduled = HashSet::new();
    let mut pending = VecDeque::new();
    scheduled.insert(grammar.start());
    pending.push_back(grammar.start());
    while let Some(head) = pending.pop_front() {
        for rule in productions(grammar, head) {
            column.insert(Item::predict_new(rule, 0));
            if let Some(Symbol::NonTerm(next)) = rule.spec.first().map(|s| &**s) {
                if scheduled.insert(next.as_str()) {
                    pending.push_back(next.as_str());
                }
            }
        }
    }
    column
}

/// Advance items in `column` whose next symbol is a Terminal matching `lexeme`.
fn scans(column: &Column, lexeme: &str) -> Column {
    column
        .iter()
        .filter(|item| item.next_symbol().is_some_and(|s| s.matches(lexeme)))
        .map(Item::advance)
        .collect()
}

/// Predict/Complete starting from the scanned items of column `idx` until no
/// new Items are added to it.
fn close(grammar: &Grammar, chart: &mut [Column], idx: usize) {
    let mut pending: VecDeque<Item> = chart[idx].iter().cloned().collect();
    while let Some(trigger) = pending.pop_front() {
        let new_items: Vec<Item> = match trigger.next_symbol() {
            // Completion: advance items in the origin column waiting on this
            // head. Collected first since origin can be this same column.
            None => chart[trigger.start]
                .iter()
                .filter(|item| item.expects(trigger.head()))
                .map(Item::advance)
                .collect(),
            Some(Symbol::NonTerm(name)) => {
                let mut predicted: Vec<Item> = productions(grammar, name)
                    .iter()
                    .map(|rule| Item::predict_new(rule, idx))
                    .collect();
                // `name` may already have derived the empty string here. Its
                // completion won't be replayed, so step over it now.
                let nulled = chart[idx]
                    .iter()
                    .any(|item| item.start == idx && item.complete() && item.head() == name);
                if nulled {
                    predicted.push(trigger.advance());
                }
                predicted
            }
            // Scans populate the next column once this one is done
            Some(Symbol::Term(_)) => continue,
        };
        for item in new_items {
            // Only Items new to the column get (re)processed
            if chart[idx].insert(item.clone()) {
                pending.push_back(item);
            }
        }
    }
}

fn debug_column(idx: usize, column: &Column) {
    if cfg!(feature = "debug") {
        eprintln!("=== Column {} ===", idx);
        for item in column {
            eprintln!("{}", item);
        }
    }
}

fn build_chart<T>(grammar: &Grammar, tokens: T) -> Recognition
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut chart = vec![initial_column(grammar)];
    debug_column(0, &chart[0]);

    for (idx, token) in tokens.into_iter().enumerate() {
        let lexeme = token.as_ref();
        let scanned = scans(&chart[idx], lexeme);
        // Nothing consumes this token, no later column can have items
        if scanned.is_empty() {
            if cfg!(feature = "debug") {
                eprintln!("=== Rejected: nothing scans {:?} at {} ===", lexeme, idx);
            }
            return Recognition { accepted: false, chart: Chart(chart) };
        }
        chart.push(scanned);
        close(grammar, &mut chart, idx + 1);
        debug_column(idx + 1, &chart[idx + 1]);
    }

    // Check that at least one item is a. complete, b. starts at column 0,
    // and c. the name of the rule matches the starting symbol.
    // It spans the whole input because we search at the last column
    let accepted = chart.last().is_some_and(|column| {
        column.iter().any(|item| {
            item.start == 0 && item.complete() && item.head() == grammar.start()
        })
    });
    if cfg!(feature = "debug") {
        eprintln!("=== {} ===", if accepted { "Accepted" } else { "Rejected" });
    }
    Recognition { accepted, chart: Chart(chart) }
}
