use anyhow::Context;
use clap::Parser;
use earlrec::EarleyRecognizer;
use earlrec_tools::{check, Verdict};
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check sentences against a context-free grammar", long_about = None)]
struct Args {
    /// Print the chart built for every sentence
    #[arg(short, long)]
    trace: bool,

    /// Grammar file
    grammar: PathBuf,

    /// Sentence to check. Starts a prompt when missing
    words: Vec<String>,
}

fn report(recognizer: &EarleyRecognizer, sentence: &str, trace: bool) -> Verdict {
    let verdict = check(recognizer, sentence);
    if trace {
        print!("{}", verdict.recognition.chart);
    }
    println!("{}", verdict.message);
    verdict
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let grammar = earlrec_tools::load_grammar(&args.grammar)
        .with_context(|| format!("Could not load grammar {}", args.grammar.display()))?;
    if args.trace {
        println!("{:?}", grammar);
    }
    let recognizer = EarleyRecognizer::new(grammar);

    if !args.words.is_empty() {
        let verdict = report(&recognizer, &args.words.join(" "), args.trace);
        return Ok(ExitCode::from(verdict.exit_status()));
    }

    let mut rl = rustyline::DefaultEditor::new().context("Could not start the prompt")?;
    loop {
        let line = match rl.readline("~> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break,
            Err(e) => return Err(e).context("Could not read input"),
        };
        // An empty sentence ends the session
        let sentence = line.trim();
        if sentence.is_empty() {
            break;
        }
        if report(&recognizer, sentence, args.trace).accepted() {
            rl.add_history_entry(sentence)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
