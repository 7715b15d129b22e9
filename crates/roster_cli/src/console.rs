//! Prompt/response primitives over any line-based input and output.
//!
//! `None` from a prompt means the input stream ended; callers treat it as a
//! cancel.

use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
    Warning,
}

impl MessageKind {
    fn symbol(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
        }
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes raw text without a trailing newline.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn message(&mut self, kind: MessageKind, text: &str) -> io::Result<()> {
        writeln!(self.output, "\n{} {text}", kind.symbol())
    }

    /// Prints `label` and reads one trimmed line.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.write(label)?;
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// Re-prompts until the answer is a whole number.
    pub fn prompt_int(&mut self, label: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                self.line("Input cannot be empty. Please try again.")?;
                continue;
            }
            match answer.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    self.line("Invalid input type. Expected a whole number. Please try again.")?
                }
            }
        }
    }

    /// Asks a yes/no question until answered; end of input counts as no.
    pub fn confirm(&mut self, action: &str) -> io::Result<bool> {
        loop {
            let label = format!("Are you sure you want to {action}? (y/n): ");
            let Some(answer) = self.prompt(&label)? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.line("Please enter 'y' for yes or 'n' for no.")?,
            }
        }
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.prompt("\nPress Enter to continue...")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, MessageKind};

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn prompt_trims_and_reports_end_of_input() {
        let mut console = console("  Jane  \n");
        assert_eq!(console.prompt("Name: ").unwrap().as_deref(), Some("Jane"));
        assert_eq!(console.prompt("Name: ").unwrap(), None);
    }

    #[test]
    fn prompt_int_retries_until_number() {
        let mut console = console("\nabc\n42\n");
        assert_eq!(console.prompt_int("Team Size: ").unwrap(), Some(42));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Input cannot be empty"));
        assert!(output.contains("Expected a whole number"));
    }

    #[test]
    fn confirm_accepts_yes_and_rejects_on_eof() {
        let mut console = console("maybe\nYES\n");
        assert!(console.confirm("delete it").unwrap());
        assert!(!console.confirm("delete it").unwrap());
    }

    #[test]
    fn message_prefixes_symbol() {
        let mut console = console("");
        console.message(MessageKind::Error, "bad").unwrap();
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "\n✗ bad\n");
    }
}
