#![deny(warnings)]

use earlrec::{EarleyRecognizer, Recognition};

/// Outcome of checking one sentence, ready to be printed.
pub struct Verdict {
    pub recognition: Recognition,
    pub message: String,
}

impl Verdict {
    pub fn accepted(&self) -> bool {
        self.recognition.accepted
    }

    /// Process exit status for a one-shot check: 0 accepted, 1 rejected.
    pub fn exit_status(&self) -> u8 {
        if self.accepted() { 0 } else { 1 }
    }
}

/// Recognize the whitespace separated words of `sentence`.
pub fn check(recognizer: &EarleyRecognizer, sentence: &str) -> Verdict {
    let recognition = recognizer.trace(sentence.split_whitespace());
    let message = if recognition.accepted {
        format!("'{}' is in the language.", sentence)
    } else {
        format!("'{}' is not in the language.", sentence)
    };
    Verdict { recognition, message }
}
