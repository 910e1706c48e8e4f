//! Line-based console interaction.
//!
//! [`Console`] wraps any `BufRead` / `Write` pair so the prompts can run
//! against the real terminal or against in-memory buffers in tests.

use std::io::{BufRead, Stdin, Stdout, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::AFFIRMATIVE;
use tracing::debug;

// ── Console ───────────────────────────────────────────────────────────────────

/// A prompt-and-answer channel.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<std::io::StdinLock<'static>, Stdout> {
    /// Console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Write `text` as-is and flush.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write `text` followed by a newline.
    pub fn println(&mut self, text: &str) -> Result<()> {
        self.print(text)?;
        self.print("\n")
    }

    /// Print `question`, then read one answer, trimmed and lower-cased.
    ///
    /// Returns `None` when the input is exhausted. Bytes that are not valid
    /// UTF-8 are replaced, so such a line reads as an ordinary wrong answer.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.print(question)?;

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_lowercase()))
    }

    /// Ask until the answer is one of `allowed`; return the lower-cased answer.
    ///
    /// Invalid answers print the allowed values and re-prompt. Fails with
    /// [`BikeshareError::InputClosed`] if the input ends first.
    pub fn get_input(&mut self, prompt: &str, allowed: &[&str]) -> Result<String> {
        let choices = allowed.join(", ");
        let question = format!("{} ({}): ", prompt, choices);

        loop {
            let answer = self.ask(&question)?.ok_or(BikeshareError::InputClosed)?;
            if allowed.iter().any(|a| a.eq_ignore_ascii_case(&answer)) {
                return Ok(answer);
            }
            debug!("rejected answer {:?} for \"{}\"", answer, prompt);
            self.println(&format!("invalid input please select one of {}", choices))?;
        }
    }

    /// `true` only for an answer of `yes` (any case). End of input counts as
    /// a refusal.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.as_deref() == Some(AFFIRMATIVE))
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
