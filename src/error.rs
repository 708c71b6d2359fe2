//! Error types reported by the VFS, the loader and the script runner.
//!
//! None of these are fatal to a session: each one ends up as a single output line.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve a path to a usable VFS entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("path not found: {0}")]
    PathNotFound(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
}

/// Failure to build a VFS population from a table.
///
/// A failed load never touches the population that was active before it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("VFS file not found at '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read VFS file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected 3 fields (path, kind, content), found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: unknown entry kind '{kind}', expected 'dir' or 'file'")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: empty path")]
    EmptyPath { line: usize },

    #[error("'{path}' has no parent directory '{parent}'")]
    MissingParent { path: String, parent: String },

    #[error("parent of '{path}' is a file: '{parent}'")]
    ParentNotDirectory { path: String, parent: String },
}

/// The startup script could not be read.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot read script '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
