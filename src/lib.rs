//! A small shell over a synthetic, in-memory filesystem.
//!
//! The filesystem ([`vfs::Vfs`]) is either built in or loaded from a
//! comma-separated table of `path,kind,content` rows. Commands arrive one line at
//! a time, typed at a prompt or replayed from a script, and every line of output
//! goes to an [`OutputSink`].
//!
//! The main entry point is [`Session`], which owns the VFS and turns command
//! lines into output. The [`command`] module holds the builtins (`ls`, `cd`,
//! `exit`) and [`script`] the batch runner.

pub mod command;
pub mod config;
pub mod error;
mod io_adapters;
pub mod loader;
pub mod path;
pub mod script;
mod session;
pub mod table;
pub mod vfs;

pub use config::SessionConfig;
pub use io_adapters::{OutputLine, OutputSink, TerminalSink, Transcript};
pub use session::{Flow, Session};
