use crate::command::{self, Command, Outcome};
use crate::config::SessionConfig;
use crate::error::LoadError;
use crate::io_adapters::OutputSink;
use crate::loader;
use crate::script;
use crate::vfs::Vfs;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::Path;

pub const BANNER: &str = "Shell Emulator started. Type 'exit' to close.";
pub const DEFAULT_VFS_MESSAGE: &str = "Default VFS created in memory.";

/// Whether the session keeps accepting input after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One shell session: the VFS it operates on plus its startup configuration.
///
/// Front ends feed lines in through [`Session::execute_line`] and read results
/// only through an [`OutputSink`] and [`Session::prompt`].
///
/// Example
/// ```
/// use vfs_shell::{Session, SessionConfig, Transcript};
/// let mut session = Session::new(SessionConfig::default());
/// let mut out = Transcript::new();
/// session.execute_line("cd default_dir", &mut out);
/// assert_eq!(session.prompt(), "/default_dir $ ");
/// ```
pub struct Session {
    vfs: Vfs,
    config: SessionConfig,
}

impl Session {
    /// Create a session over the default VFS without printing anything.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            vfs: Vfs::default(),
            config,
        }
    }

    /// Create a session, loading the configured VFS and reporting progress to `sink`.
    ///
    /// A table that cannot be loaded is reported and the default VFS is used instead.
    pub fn start(config: SessionConfig, sink: &mut dyn OutputSink) -> Self {
        let mut session = Self::new(config);
        match session.config.vfs_path.clone() {
            Some(path) => match session.load_vfs(&path) {
                Ok(_) => sink.append_line(&format!("VFS loaded from {}", path.display()), false),
                Err(e) => {
                    sink.append_line(&format!("Error: {}", e), false);
                    sink.append_line(DEFAULT_VFS_MESSAGE, false);
                }
            },
            None => sink.append_line(DEFAULT_VFS_MESSAGE, false),
        }
        sink.append_line(BANNER, false);
        session
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the whole VFS with the table at `path`, returning the number of entries.
    ///
    /// On failure the current VFS, including the working directory, is kept.
    pub fn load_vfs(&mut self, path: &Path) -> Result<usize, LoadError> {
        match loader::load_from_path(path) {
            Ok(entries) => {
                self.vfs.replace_all(entries);
                tracing::info!(path = %path.display(), entries = self.vfs.entry_count(), "VFS loaded");
                Ok(self.vfs.entry_count())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), err = %e, "VFS load failed");
                Err(e)
            }
        }
    }

    /// Current prompt: working directory followed by the prompt symbol.
    pub fn prompt(&self) -> String {
        format!("{} {} ", self.vfs.cwd(), self.config.prompt_symbol())
    }

    /// Echo `line` with the current prompt, run it and append its output.
    ///
    /// Blank input does nothing at all.
    pub fn execute_line(&mut self, line: &str, sink: &mut dyn OutputSink) -> Flow {
        let Some(cmd) = Command::parse(line) else {
            return Flow::Continue;
        };
        sink.append_line(&format!("{}{}", self.prompt(), line), true);

        match command::dispatch(&cmd, &mut self.vfs) {
            Outcome::Exit => Flow::Exit,
            Outcome::Output(lines) => {
                for l in &lines {
                    sink.append_line(l, false);
                }
                Flow::Continue
            }
        }
    }

    /// Run the script at `path`. A missing script is reported and otherwise ignored.
    pub fn run_script(&mut self, path: &Path, sink: &mut dyn OutputSink) -> Flow {
        match script::run_file(self, path, sink) {
            Ok(summary) if summary.exited => Flow::Exit,
            _ => Flow::Continue,
        }
    }

    /// Read-Eval-Print Loop on the controlling terminal.
    ///
    /// Ends on `exit`, Ctrl-C or end of input.
    pub fn repl(&mut self, sink: &mut dyn OutputSink) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if self.execute_line(&line, sink) == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    sink.append_line("Interrupted", false);
                    break;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}
