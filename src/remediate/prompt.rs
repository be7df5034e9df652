use inquire::InquireError;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::PromptError;

/// Source of answers to yes/no questions.
pub trait Prompter {
    /// Asks `question` and returns the raw answer. End of input is an
    /// empty answer.
    fn ask(&mut self, question: &str) -> Result<String, PromptError>;
}

/// Only `y` and `yes` (any case) confirm; everything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Reads one line per question from any reader.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

/// Prompts on the controlling terminal, or reads piped stdin when there is
/// no terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        if !io::stdin().is_terminal() {
            return LinePrompter::new(io::stdin().lock(), io::stdout()).ask(question);
        }

        match inquire::Text::new(question.trim()).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(String::new()),
            Err(InquireError::OperationInterrupted) => Err(PromptError::Interrupted),
            Err(InquireError::IO(e)) => Err(PromptError::Io(e)),
            Err(e) => Err(PromptError::Terminal(e.to_string())),
        }
    }
}
