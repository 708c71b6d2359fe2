use std::io::Write;

/// Append-only destination for everything a session prints.
///
/// Lines arrive in processing order. The session never reads a sink back.
pub trait OutputSink {
    /// Append one line. `is_echo` marks the prompt-prefixed echo of an input line.
    fn append_line(&mut self, text: &str, is_echo: bool);
}

/// A single appended line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub is_echo: bool,
}

/// Memory-backed sink that records every line.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<OutputLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    /// Text of every line, echoes included.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl OutputSink for Transcript {
    fn append_line(&mut self, text: &str, is_echo: bool) {
        self.lines.push(OutputLine {
            text: text.to_string(),
            is_echo,
        });
    }
}

/// Writes lines straight to a terminal-like writer, flushing each one.
///
/// Echo lines can be hidden for interactive use, where the line editor already
/// shows what was typed.
pub struct TerminalSink<W: Write> {
    writer: W,
    show_echo: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W, show_echo: bool) -> Self {
        Self { writer, show_echo }
    }

    pub fn set_show_echo(&mut self, show_echo: bool) {
        self.show_echo = show_echo;
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn append_line(&mut self, text: &str, is_echo: bool) {
        if is_echo && !self.show_echo {
            return;
        }
        let written = writeln!(self.writer, "{}", text).and_then(|_| self.writer.flush());
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write output line");
        }
    }
}
