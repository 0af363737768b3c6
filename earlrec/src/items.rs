#![deny(warnings)]

use crate::grammar::{Rule, Symbol};
use std::collections::HashSet;
use std::ops::Index;
use std::rc::Rc;
use std::{fmt, slice};

/// An Item is a partially matched `Rule`. `dot` shows the match progress.
/// Items are deduped by rule (head and spec), dot and start.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct Item {
    pub rule: Rc<Rule>, // LR0item (dotted rule)
    pub dot: usize,     // dot position within the rule
    pub start: usize,   // column where recognition of this item began
}

impl Item {
    /// Build a new `Prediction` based Item.
    pub fn predict_new(rule: &Rc<Rule>, start: usize) -> Item {
        Item {
            rule: rule.clone(),
            dot: 0,
            start,
        }
    }

    /// A copy of this Item with the dot moved over the next symbol.
    pub fn advance(&self) -> Item {
        debug_assert!(!self.complete(), "Can't advance a complete Item");
        Item {
            rule: self.rule.clone(),
            dot: self.dot + 1,
            start: self.start,
        }
    }

    pub fn head(&self) -> &str {
        &self.rule.head
    }

    /// Item is complete if Rule has being fully matched
    pub fn complete(&self) -> bool {
        self.dot >= self.rule.spec.len()
    }

    /// Exposes the next symbol in the progress of the Rule
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.rule.spec.get(self.dot).map(|sym| &**sym)
    }

    /// Item is waiting on NonTerm `head` to complete
    pub fn expects(&self, head: &str) -> bool {
        self.next_symbol().and_then(Symbol::nonterm) == Some(head)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut spec: Vec<_> = self.rule.spec.iter().map(|s| s.name()).collect();
        spec.insert(self.dot.min(spec.len()), "\u{00b7}");
        write!(f, "({}) {} -> {}", self.start, self.rule.head, spec.join(" "))
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Items of one input position. Keeps insertion order, ignores duplicates.
#[derive(Clone, Default)]
pub struct Column {
    order: Vec<Item>,
    dedup: HashSet<Item>,
}

impl Column {
    pub fn new() -> Column {
        Column::default()
    }

    /// Returns whether `item` was new to this column.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.dedup.contains(&item) {
            return false;
        }
        self.order.push(item.clone());
        self.dedup.insert(item);
        true
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.dedup.contains(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Item> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Item;
    type IntoIter = slice::Iter<'a, Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl Extend<Item> for Column {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iterable: I) {
        for item in iterable {
            self.insert(item);
        }
    }
}

impl FromIterator<Item> for Column {
    fn from_iter<I: IntoIterator<Item = Item>>(iterable: I) -> Self {
        let mut column = Column::new();
        column.extend(iterable);
        column
    }
}

impl Index<usize> for Column {
    type Output = Item;
    fn index(&self, idx: usize) -> &Item {
        &self.order[idx]
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.order.fmt(f)
    }
}

///////////////////////////////////////////////////////////////////////////////

/// One Column per input boundary, built left to right.
#[derive(Clone, Default)]
pub struct Chart(pub(crate) Vec<Column>);

impl Chart {
    pub fn columns(&self) -> &[Column] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Column> {
        self.0.last()
    }
}

impl Index<usize> for Chart {
    type Output = Column;
    fn index(&self, idx: usize) -> &Column {
        &self.0[idx]
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, column) in self.0.iter().enumerate() {
            writeln!(f, "=== Column {} ===", idx)?;
            for item in column {
                writeln!(f, "{}", item)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
