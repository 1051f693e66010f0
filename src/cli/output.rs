//! Console output for commands
//!
//! Everything the user sees goes through one writer, so tests can capture
//! it. Log records go to stderr through `tracing` instead.

use std::io::{self, Write};

/// Line-oriented console writer
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    /// Console writing to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write a line of text
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Write an underlined section header surrounded by blank lines
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Write each line of an error message
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
