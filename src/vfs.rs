use crate::error::VfsError;
use crate::path::{self, ROOT};
use std::collections::BTreeMap;
use std::str::FromStr;

/// All entries of a VFS keyed by canonical absolute path.
///
/// A `BTreeMap` keeps siblings in lexical order, which is the order `ls` prints.
pub type Entries = BTreeMap<String, VfsEntry>;

/// The kind of a VFS entry, as spelled in the table's `kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl FromStr for EntryKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dir" => Ok(EntryKind::Directory),
            "file" => Ok(EntryKind::File),
            _ => Err(()),
        }
    }
}

/// One addressable object of the VFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsEntry {
    Directory,
    File { content: String },
}

impl VfsEntry {
    pub fn file(content: impl Into<String>) -> Self {
        VfsEntry::File {
            content: content.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            VfsEntry::Directory => EntryKind::Directory,
            VfsEntry::File { .. } => EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, VfsEntry::Directory)
    }

    /// Text payload of a file; directories have none.
    pub fn content(&self) -> Option<&str> {
        match self {
            VfsEntry::Directory => None,
            VfsEntry::File { content } => Some(content),
        }
    }
}

/// The synthetic filesystem: entries plus the current working directory.
///
/// `cwd` always names an existing directory. It only changes through
/// [`Vfs::set_cwd`] and resets to `/` whenever the entries are replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vfs {
    entries: Entries,
    cwd: String,
}

impl Vfs {
    /// Create a VFS over `entries`, working directory `/`.
    pub fn new(entries: Entries) -> Self {
        let mut vfs = Self {
            entries: Entries::new(),
            cwd: ROOT.to_string(),
        };
        vfs.replace_all(entries);
        vfs
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Number of entries, the root included.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Resolve `path` against the working directory and return its entry.
    pub fn lookup(&self, path: &str) -> Result<&VfsEntry, VfsError> {
        let resolved = path::resolve(path, &self.cwd);
        self.entries
            .get(&resolved)
            .ok_or(VfsError::PathNotFound(resolved))
    }

    /// Change the working directory. On error `cwd` is left as it was.
    pub fn set_cwd(&mut self, path: &str) -> Result<(), VfsError> {
        let resolved = self.resolve_dir(path)?;
        self.cwd = resolved;
        Ok(())
    }

    /// Direct children of the directory at `path`, ordered by name.
    pub fn list_children(&self, path: &str) -> Result<Vec<(String, EntryKind)>, VfsError> {
        let dir = self.resolve_dir(path)?;
        let children = self
            .entries
            .iter()
            .filter_map(|(candidate, entry)| {
                path::child_name(&dir, candidate).map(|name| (name.to_string(), entry.kind()))
            })
            .collect();
        Ok(children)
    }

    /// Swap in a whole new population. The root is always a directory afterwards.
    pub fn replace_all(&mut self, mut entries: Entries) {
        entries.insert(ROOT.to_string(), VfsEntry::Directory);
        self.entries = entries;
        self.cwd = ROOT.to_string();
    }

    fn resolve_dir(&self, path: &str) -> Result<String, VfsError> {
        let resolved = path::resolve(path, &self.cwd);
        match self.entries.get(&resolved) {
            Some(entry) if entry.is_dir() => Ok(resolved),
            Some(_) => Err(VfsError::NotADirectory(resolved)),
            None => Err(VfsError::PathNotFound(resolved)),
        }
    }
}

impl Default for Vfs {
    /// The fixed in-memory population used when no table is supplied.
    fn default() -> Self {
        Self::new(crate::loader::create_default())
    }
}
