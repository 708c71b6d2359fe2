//! Non-interactive replay of command lines.
//!
//! A script is fed through exactly the same pipeline as interactive input, so
//! its transcript looks as if the lines had been typed at the prompt.

use crate::error::ScriptError;
use crate::io_adapters::OutputSink;
use crate::session::{Flow, Session};
use std::fs;
use std::path::Path;

/// Marker appended once a script run ends, whatever the reason.
pub const SCRIPT_FINISHED: &str = "Script finished.";

/// Counters describing one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Lines echoed and dispatched, including a terminating `exit`.
    pub executed: usize,
    /// Blank and comment lines.
    pub skipped: usize,
    /// Whether the script ended the session.
    pub exited: bool,
}

/// Blank lines and lines starting with `#` (after trimming) are not commands.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Execute `lines` in order, stopping at `exit`, then append [`SCRIPT_FINISHED`].
pub fn run_lines<I, S>(session: &mut Session, lines: I, sink: &mut dyn OutputSink) -> ScriptSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = ScriptSummary::default();
    for line in lines {
        let line = line.as_ref();
        if is_skippable(line) {
            summary.skipped += 1;
            continue;
        }
        summary.executed += 1;
        if session.execute_line(line, sink) == Flow::Exit {
            summary.exited = true;
            break;
        }
    }
    sink.append_line(SCRIPT_FINISHED, false);
    summary
}

/// Read a script file and run it. An unreadable file runs nothing.
///
/// The error is reported to `sink` before it is returned, followed by the
/// finished marker, so callers may treat it as informational.
pub fn run_file(
    session: &mut Session,
    path: &Path,
    sink: &mut dyn OutputSink,
) -> Result<ScriptSummary, ScriptError> {
    tracing::info!(path = %path.display(), "running script");
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) => {
            let err = ScriptError::Unreadable {
                path: path.to_path_buf(),
                source,
            };
            tracing::warn!(%err, "script not run");
            sink.append_line(&format!("Error: {}", err), false);
            sink.append_line(SCRIPT_FINISHED, false);
            return Err(err);
        }
    };

    let summary = run_lines(session, text.lines(), sink);
    tracing::info!(
        executed = summary.executed,
        skipped = summary.skipped,
        exited = summary.exited,
        "script finished"
    );
    Ok(summary)
}
