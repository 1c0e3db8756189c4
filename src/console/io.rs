//! Blocking line-based console over any reader and writer.

use std::io::{self, BufRead, Write};

/// Prints lines and reads answers, one line at a time.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Print `question` without a newline and wait for one line of input.
    ///
    /// The trailing line break is removed; end of input is reported as
    /// [`io::ErrorKind::UnexpectedEof`].
    pub fn prompt(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        let trimmed = answer.trim_end_matches(['\n', '\r']).len();
        answer.truncate(trimmed);
        Ok(answer)
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_strips_line_endings_only() {
        let mut console = Console::new(Cursor::new("  Brazil \r\nnext\n"), Vec::new());
        assert_eq!(console.prompt("Country: ").unwrap(), "  Brazil ");
        assert_eq!(console.prompt("> ").unwrap(), "next");
        assert_eq!(String::from_utf8(console.output().clone()).unwrap(), "Country: > ");
    }

    #[test]
    fn prompt_reports_closed_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        let err = console.prompt("> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
