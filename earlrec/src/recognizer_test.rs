#![deny(warnings)]

use crate::grammar::{Grammar, GrammarBuilder};
use crate::recognizer::{recognize, EarleyRecognizer};
use std::collections::HashSet;

// S -> a S b | <e>
fn grammar_anbn() -> Grammar {
    GrammarBuilder::default()
      .nonterm("S")
      .terminal("a")
      .terminal("b")
      .rule("S", &["a", "S", "b"])
      .rule::<_, &str>("S", &[])
      .into_grammar("S")
      .expect("Bad grammar")
}

fn grammar_math() -> Grammar {
    // Sum -> Sum + Mul | Mul
    // Mul -> Mul * Pow | Pow
    // Pow -> Num ^ Pow | Num
    // Num -> n | ( Sum )
    GrammarBuilder::default()
      .nonterm("Sum")
      .nonterm("Mul")
      .nonterm("Pow")
      .nonterm("Num")
      .terminal("n")
      .terminal("+")
      .terminal("*")
      .terminal("^")
      .terminal("(")
      .terminal(")")
      .rule("Sum", &["Sum", "+", "Mul"])
      .rule("Sum", &["Mul"])
      .rule("Mul", &["Mul", "*", "Pow"])
      .rule("Mul", &["Pow"])
      .rule("Pow", &["Num", "^", "Pow"])
      .rule("Pow", &["Num"])
      .rule("Num", &["(", "Sum", ")"])
      .rule("Num", &["n"])
      .into_grammar("Sum")
      .expect("Bad grammar")
}

fn accepts(grammar: &Grammar, input: &str) -> bool {
    recognize(grammar, input.split_whitespace())
}

///////////////////////////////////////////////////////////////////////////////

#[test]
fn anbn() {
    let g = grammar_anbn();
    assert!(accepts(&g, "a b"));
    assert!(accepts(&g, "a a b b"));
    assert!(accepts(&g, "a a a b b b"));
    assert!(accepts(&g, ""));
    assert!(!accepts(&g, "a b b"));
    assert!(!accepts(&g, "a a b"));
    assert!(!accepts(&g, "a"));
    assert!(!accepts(&g, "b"));
    assert!(!accepts(&g, "b a"));
}

#[test]
fn trace_chart() {
    let p = EarleyRecognizer::new(grammar_anbn());
    let trace = p.trace(["a", "b"]);
    assert!(trace.accepted);
    assert_eq!(trace.chart.len(), 3);
    expect_test::expect![[r#"
        === Column 0 ===
        (0) S -> · a S b
        (0) S -> ·
        === Column 1 ===
        (0) S -> a · S b
        (1) S -> · a S b
        (1) S -> ·
        (0) S -> a S · b
        === Column 2 ===
        (0) S -> a S b ·
    "#]]
    .assert_eq(&trace.chart.to_string());
}

#[test]
fn recognizer_matches_free_fn() {
    let g = grammar_math();
    let p = EarleyRecognizer::new(g.clone());
    for input in ["n", "n + n * n", "( n + n ) ^ n ^ n", "n +", "( n", "n n", ""] {
        let tokens: Vec<String> = input.split_whitespace().map(String::from).collect();
        assert_eq!(p.recognize(&tokens), accepts(&g, input), "input: {}", input);
        assert_eq!(p.recognize(&tokens), p.trace(&tokens).accepted);
    }
}

#[test]
fn math_grammar() {
    let g = grammar_math();
    assert!(accepts(&g, "n + ( n * n ) ^ n"));
    assert!(accepts(&g, "( ( n ) )"));
    assert!(accepts(&g, "n * n + n * n"));
    assert!(!accepts(&g, "n + * n"));
    assert!(!accepts(&g, "( n"));
    assert!(!accepts(&g, "n )"));
    assert!(!accepts(&g, ""));
}

#[test]
fn unknown_token_rejects() {
    let g = grammar_math();
    // '-' is not a terminal of the grammar, '1' neither (terminals match by name)
    assert!(!accepts(&g, "n - n"));
    assert!(!accepts(&g, "1"));
}

#[test]
fn scan_failure_stops() {
    let p = EarleyRecognizer::new(grammar_anbn());
    // token 2 can't be scanned: columns 0..=2 exist, nothing after
    let trace = p.trace(["a", "b", "b", "a", "b"]);
    assert!(!trace.accepted);
    assert_eq!(trace.chart.len(), 3);
    // first token fails
    let trace = p.trace(["b"]);
    assert!(!trace.accepted);
    assert_eq!(trace.chart.len(), 1);
    // tokens after a failure aren't pulled from the input
    let mut pulled = 0;
    let tokens = ["b", "a", "b"].into_iter().inspect(|_| pulled += 1);
    assert!(!p.recognize(tokens));
    assert_eq!(pulled, 1);
}

#[test]
fn left_recurse() {
    // A -> A b | c
    let g = GrammarBuilder::default()
      .nonterm("A")
      .terminal("b")
      .terminal("c")
      .rule("A", &["A", "b"])
      .rule("A", &["c"])
      .into_grammar("A")
      .expect("Bad grammar");
    assert!(accepts(&g, "c"));
    assert!(accepts(&g, "c b b b"));
    assert!(!accepts(&g, "b"));
    assert!(!accepts(&g, "c c"));
    // the left recursive NonTerm is only expanded once per column
    let trace = EarleyRecognizer::new(g).trace(["c", "b"]);
    assert_eq!(trace.chart[0].len(), 2);
}

#[test]
fn mutual_left_recurse() {
    // A -> B x
    // B -> A y | z
    let g = GrammarBuilder::default()
      .nonterm("A")
      .nonterm("B")
      .terminal("x")
      .terminal("y")
      .terminal("z")
      .rule("A", &["B", "x"])
      .rule("B", &["A", "y"])
      .rule("B", &["z"])
      .into_grammar("A")
      .expect("Bad grammar");
    assert!(accepts(&g, "z x"));
    assert!(accepts(&g, "z x y x"));
    assert!(accepts(&g, "z x y x y x"));
    assert!(!accepts(&g, "z x y"));
    assert!(!accepts(&g, "z"));
}

#[test]
fn initial_column_expands_once() {
    // S -> A x | B
    // A -> B
    // B -> A | y
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("A")
      .nonterm("B")
      .terminal("x")
      .terminal("y")
      .rule("S", &["A", "x"])
      .rule("S", &["B"])
      .rule("A", &["B"])
      .rule("B", &["A"])
      .rule("B", &["y"])
      .into_grammar("S")
      .expect("Bad grammar");
    let trace = EarleyRecognizer::new(g).trace(Vec::<&str>::new());
    assert!(!trace.accepted);
    assert_eq!(trace.chart.len(), 1);
    let column0: Vec<_> = trace.chart[0].iter().map(|i| i.to_string()).collect();
    assert_eq!(column0, vec![
        "(0) S -> · A x",
        "(0) S -> · B",
        "(0) A -> · B",
        "(0) B -> · A",
        "(0) B -> · y",
    ]);
}

#[test]
fn unit_cycle_terminates() {
    // S -> S | a
    let g = GrammarBuilder::default()
      .nonterm("S")
      .terminal("a")
      .rule("S", &["S"])
      .rule("S", &["a"])
      .into_grammar("S")
      .expect("Bad grammar");
    assert!(accepts(&g, "a"));
    assert!(!accepts(&g, "a a"));
}

#[test]
fn grammar_ambiguous() {
    // S -> S S | b
    let g = GrammarBuilder::default()
      .nonterm("S")
      .terminal("b")
      .rule("S", &["S", "S"])
      .rule("S", &["b"])
      .into_grammar("S")
      .expect("Bad grammar");
    let trace = EarleyRecognizer::new(g).trace("b b b".split_whitespace());
    // two derivations, a single verdict
    assert!(trace.accepted);
    let accepting = trace.chart[3].iter()
        .filter(|item| item.start == 0 && item.complete() && item.head() == "S")
        .count();
    assert_eq!(accepting, 1);
}

#[test]
fn columns_are_sets() {
    let g = grammar_math();
    let trace = EarleyRecognizer::new(g).trace("( n + n ) * n ^ ( n )".split_whitespace());
    assert!(trace.accepted);
    for column in trace.chart.columns() {
        let unique: HashSet<_> = column.iter().collect();
        assert_eq!(unique.len(), column.len());
    }
}

#[test]
fn chart_invariants() {
    let g = grammar_math();
    let trace = EarleyRecognizer::new(g).trace("n + ( n * n ) ^ n".split_whitespace());
    assert_eq!(trace.chart.len(), 10);
    for (idx, column) in trace.chart.columns().iter().enumerate() {
        assert!(!column.is_empty());
        for item in column {
            assert!(item.start <= idx);
            assert!(item.dot <= item.rule.spec.len());
            if idx == 0 {
                assert_eq!(item.start, 0);
                assert_eq!(item.dot, 0);
            }
        }
    }
}

#[test]
fn empty_input() {
    // start has an empty rule
    assert!(accepts(&grammar_anbn(), ""));
    // start can't derive <e>
    assert!(!accepts(&grammar_math(), ""));
}

#[test]
fn empty_input_indirect_nullable() {
    // S -> A
    // A -> <e>
    // Column 0 is only predicted, completions aren't chased there. S derives
    // the empty string through A but the empty input is still rejected.
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("A")
      .rule("S", &["A"])
      .rule::<_, &str>("A", &[])
      .into_grammar("S")
      .expect("Bad grammar");
    let trace = EarleyRecognizer::new(g).trace(Vec::<String>::new());
    assert!(!trace.accepted);
    assert_eq!(trace.chart[0].len(), 2);
}

#[test]
fn nullable_after_scan() {
    // S -> a A b
    // A -> <e>
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("A")
      .terminal("a")
      .terminal("b")
      .rule("S", &["a", "A", "b"])
      .rule::<_, &str>("A", &[])
      .into_grammar("S")
      .expect("Bad grammar");
    assert!(accepts(&g, "a b"));
    assert!(!accepts(&g, "a"));
}

#[test]
fn nullable_predicted_twice() {
    // S -> a X
    // X -> A A b
    // A -> <e>
    // The second A is predicted after A's empty rule already completed in
    // column 1. The prediction is a duplicate, the caller still steps over A.
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("X")
      .nonterm("A")
      .terminal("a")
      .terminal("b")
      .rule("S", &["a", "X"])
      .rule("X", &["A", "A", "b"])
      .rule::<_, &str>("A", &[])
      .into_grammar("S")
      .expect("Bad grammar");
    let trace = EarleyRecognizer::new(g).trace(["a", "b"]);
    assert!(trace.accepted);
    let column1: Vec<_> = trace.chart[1].iter().map(|i| i.to_string()).collect();
    assert_eq!(column1, vec![
        "(0) S -> a · X",
        "(1) X -> · A A b",
        "(1) A -> ·",
        "(1) X -> A · A b",
        "(1) X -> A A · b",
    ]);
}

#[test]
fn consecutive_nullables() {
    // S -> a A A b
    // A -> <e>
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("A")
      .terminal("a")
      .terminal("b")
      .rule("S", &["a", "A", "A", "b"])
      .rule::<_, &str>("A", &[])
      .into_grammar("S")
      .expect("Bad grammar");
    assert!(accepts(&g, "a b"));
    assert!(!accepts(&g, "a"));
    assert!(!accepts(&g, "a b b"));
}

#[test]
fn indirect_nullable_after_scan() {
    // S -> a B B b
    // B -> C
    // C -> <e>
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("B")
      .nonterm("C")
      .terminal("a")
      .terminal("b")
      .rule("S", &["a", "B", "B", "b"])
      .rule("B", &["C"])
      .rule::<_, &str>("C", &[])
      .into_grammar("S")
      .expect("Bad grammar");
    assert!(accepts(&g, "a b"));
    assert!(!accepts(&g, "b"));
}

#[test]
fn dead_nonterm() {
    // S -> D x | y, D has no rules
    let g = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("D")
      .terminal("x")
      .terminal("y")
      .rule("S", &["D", "x"])
      .rule("S", &["y"])
      .into_grammar("S")
      .expect("Bad grammar");
    assert!(accepts(&g, "y"));
    assert!(!accepts(&g, "x"));
}

#[test]
fn from_declarations_recognize() {
    let g = Grammar::from_declarations(
        ["E", "T"],
        ["id", "+"],
        "E",
        vec![
            ("E", vec!["E", "+", "T"]),
            ("E", vec!["T"]),
            ("T", vec!["id"]),
        ],
    )
    .expect("Bad grammar");
    assert!(accepts(&g, "id + id + id"));
    assert!(!accepts(&g, "id +"));
}
