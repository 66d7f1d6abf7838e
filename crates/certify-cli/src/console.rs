//! Line-oriented console I/O shared by the interactive menus.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use certify_core::model::option_letter;
use certify_core::traits::{AnswerSource, QuestionPrompt};

/// Reads one line per prompt from `R` and writes prompts to `W`.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// First I/O error hit while acting as an answer source.
    deferred: Option<io::Error>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            deferred: None,
        }
    }

    /// Print `label` and read the reply, trimmed. `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(self.read_reply()?)
    }

    /// One trimmed line of input. Bytes that are not valid UTF-8 become
    /// U+FFFD, so a garbled reply simply fails to match anything.
    fn read_reply(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Like [`Console::prompt`], parsed as a number. Unparseable replies
    /// come back as `Some(None)`.
    pub fn prompt_number(&mut self, label: &str) -> Result<Option<Option<usize>>> {
        Ok(self.prompt(label)?.map(|s| s.parse().ok()))
    }

    pub fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Surface an I/O error swallowed while answering questions.
    pub fn take_deferred_error(&mut self) -> io::Result<()> {
        match self.deferred.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn ask(&mut self, prompt: &QuestionPrompt<'_>) -> io::Result<Option<char>> {
        if prompt.position == 1 {
            writeln!(self.output, "Answer questions for {}:", prompt.course_name)?;
        }
        writeln!(
            self.output,
            "{}/{}. {}",
            prompt.position,
            prompt.total,
            prompt.question()
        )?;
        for (idx, option) in prompt.options().iter().enumerate() {
            let letter = option_letter(idx).unwrap_or('?');
            writeln!(self.output, "{letter}) {option}")?;
        }
        write!(self.output, "Answer: ")?;
        self.output.flush()?;

        Ok(self.read_reply()?.and_then(|line| line.chars().next()))
    }
}

impl<R: BufRead, W: Write> AnswerSource for Console<R, W> {
    fn answer(&mut self, prompt: &QuestionPrompt<'_>) -> Option<char> {
        match self.ask(prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("failed to read answer: {e}");
                if self.deferred.is_none() {
                    self.deferred = Some(e);
                }
                None
            }
        }
    }
}
