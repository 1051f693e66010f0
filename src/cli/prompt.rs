//! Interactive questions

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Asks the user for the dump file name
pub trait FilenamePrompt {
    /// Ask `question`, returning `default` for an empty answer
    fn ask(&self, question: &str, default: &str) -> Result<String>;
}

/// Prompt on the terminal
pub struct StdinPrompt;

impl FilenamePrompt for StdinPrompt {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{} [{}]: ", question, default)?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer_or_default(&answer, default))
    }
}

fn answer_or_default(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_string(),
        answer => answer.to_string(),
    }
}
