//! Building VFS populations from tables or from the built-in default.
//!
//! Every function here produces a fresh [`Entries`] map and never touches a live
//! [`Vfs`](crate::vfs::Vfs); the caller installs the result with
//! [`Vfs::replace_all`](crate::vfs::Vfs::replace_all) only after the load succeeded.

use crate::error::LoadError;
use crate::path::{self, ROOT};
use crate::table::{self, Record};
use crate::vfs::{Entries, EntryKind, VfsEntry};
use std::fs;
use std::io;
use std::path::Path;

/// Content of the file in the default population.
pub const DEFAULT_FILE_CONTENT: &str = "This is a default file.";

/// Build entries from `(path, kind, content)` rows.
///
/// The root is always present. Rows naming `/` are ignored, later rows for the
/// same path win, and every non-root entry must sit inside an existing directory.
///
/// The last rule trades compatibility for a consistent tree: plain CSV tables
/// often list files without their parent directories, and such a table (say,
/// one holding only `/a/b.txt`) is not loaded as-is. It fails with
/// [`LoadError::MissingParent`], and a session falls back to the default VFS.
pub fn load_from_table<I>(rows: I) -> Result<Entries, LoadError>
where
    I: IntoIterator<Item = Record>,
{
    let mut entries = Entries::new();
    entries.insert(ROOT.to_string(), VfsEntry::Directory);

    for Record { line, fields } in rows {
        let [raw_path, kind, content]: [String; 3] =
            fields
                .try_into()
                .map_err(|fields: Vec<String>| LoadError::ColumnCount {
                    line,
                    found: fields.len(),
                })?;

        let kind: EntryKind = kind
            .parse()
            .map_err(|_| LoadError::UnknownKind { line, kind })?;
        if raw_path.is_empty() {
            return Err(LoadError::EmptyPath { line });
        }

        let canonical = path::resolve(&raw_path, ROOT);
        if canonical == ROOT {
            continue;
        }

        let entry = match kind {
            EntryKind::Directory => VfsEntry::Directory,
            EntryKind::File => VfsEntry::File { content },
        };
        if entries.insert(canonical.clone(), entry).is_some() {
            tracing::debug!(line, path = %canonical, "duplicate table row replaces earlier entry");
        }
    }

    check_ancestors(&entries)?;
    Ok(entries)
}

fn check_ancestors(entries: &Entries) -> Result<(), LoadError> {
    for path in entries.keys() {
        let Some(parent) = path::parent(path) else {
            continue;
        };
        match entries.get(parent) {
            Some(VfsEntry::Directory) => {}
            Some(VfsEntry::File { .. }) => {
                return Err(LoadError::ParentNotDirectory {
                    path: path.clone(),
                    parent: parent.to_string(),
                });
            }
            None => {
                return Err(LoadError::MissingParent {
                    path: path.clone(),
                    parent: parent.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Parse table text and build entries from it.
pub fn load_from_str(text: &str) -> Result<Entries, LoadError> {
    load_from_table(table::read_records(text))
}

/// Read a table file from the host filesystem and build entries from it.
pub fn load_from_path(path: &Path) -> Result<Entries, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    load_from_str(&text)
}

/// The fixed population used when no table is given: one directory and one file.
pub fn create_default() -> Entries {
    Entries::from([
        (ROOT.to_string(), VfsEntry::Directory),
        ("/default_dir".to_string(), VfsEntry::Directory),
        (
            "/default_file.txt".to_string(),
            VfsEntry::file(DEFAULT_FILE_CONTENT),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::Vfs;
    use std::io::Write;

    #[test]
    fn test_well_formed_table() {
        let entries = load_from_str(
            "/docs,dir,ignored\n/docs/readme.md,file,\"# Title, with comma\"\n/docs/sub,dir,\n",
        )
        .unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries["/"], VfsEntry::Directory);
        assert_eq!(entries["/docs"], VfsEntry::Directory);
        assert_eq!(entries["/docs/sub"].content(), None);
        assert_eq!(
            entries["/docs/readme.md"].content(),
            Some("# Title, with comma")
        );
    }

    #[test]
    fn test_root_row_is_ignored_and_paths_are_canonicalized() {
        let entries = load_from_str("/,file,oops\ndocs/,dir,\n/docs/./a.txt,file,x\n").unwrap();
        assert_eq!(entries["/"], VfsEntry::Directory);
        assert!(entries.contains_key("/docs"));
        assert!(entries.contains_key("/docs/a.txt"));
    }

    #[test]
    fn test_later_duplicate_row_wins() {
        let entries = load_from_str("/a,file,first\n/a,file,second\n").unwrap();
        assert_eq!(entries["/a"].content(), Some("second"));
    }

    #[test]
    fn test_wrong_column_count_fails() {
        let err = load_from_str("/a,dir,\n/b,dir\n").unwrap_err();
        assert!(matches!(err, LoadError::ColumnCount { line: 2, found: 2 }));

        let err = load_from_str("/a,dir,\n\n").unwrap_err();
        assert!(matches!(err, LoadError::ColumnCount { line: 2, found: 0 }));

        let err = load_from_str("/a,file,x,y\n").unwrap_err();
        assert!(matches!(err, LoadError::ColumnCount { line: 1, found: 4 }));
    }

    #[test]
    fn test_unknown_kind_fails() {
        let err = load_from_str("/a,directory,\n").unwrap_err();
        match err {
            LoadError::UnknownKind { line, kind } => {
                assert_eq!(line, 1);
                assert_eq!(kind, "directory");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_path_fails() {
        let err = load_from_str(",dir,\n").unwrap_err();
        assert!(matches!(err, LoadError::EmptyPath { line: 1 }));
    }

    #[test]
    fn test_missing_ancestor_is_rejected() {
        let err = load_from_str("/a,dir,\n/a/b/c,file,x\n").unwrap_err();
        match err {
            LoadError::MissingParent { path, parent } => {
                assert_eq!(path, "/a/b/c");
                assert_eq!(parent, "/a/b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_quote_at_end_of_table_still_loads() {
        let entries = load_from_str("/a,dir,\n/a/f,file,\"open\nstill open").unwrap();
        assert_eq!(entries["/a/f"].content(), Some("open\nstill open"));
    }

    #[test]
    fn test_children_may_precede_parents() {
        let entries = load_from_str("/a/b,file,x\n/a,dir,\n").unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_file_parent_is_rejected() {
        let err = load_from_str("/a,file,x\n/a/b,file,y\n").unwrap_err();
        assert!(matches!(err, LoadError::ParentNotDirectory { .. }));
    }

    #[test]
    fn test_second_load_fully_replaces_first() {
        let mut vfs = Vfs::new(load_from_str("/only_first,dir,\n/shared,file,1\n").unwrap());
        assert!(vfs.lookup("/only_first").is_ok());

        vfs.replace_all(load_from_str("/shared,file,2\n/only_second,dir,\n").unwrap());
        assert!(vfs.lookup("/only_first").is_err());
        assert_eq!(vfs.lookup("/shared").unwrap().content(), Some("2"));
        assert!(vfs.lookup("/only_second").is_ok());
    }

    #[test]
    fn test_malformed_row_leaves_vfs_untouched() {
        let mut vfs = Vfs::new(load_from_str("/keep,dir,\n").unwrap());
        vfs.set_cwd("/keep").unwrap();
        let before = vfs.clone();

        if let Ok(entries) = load_from_str("/new,dir,\n/bad,symlink,\n") {
            vfs.replace_all(entries);
        }
        assert_eq!(vfs, before);
    }

    #[test]
    fn test_load_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "/etc,dir,\n/etc/motd,file,welcome\n").unwrap();

        let entries = load_from_path(file.path()).unwrap();
        assert_eq!(entries["/etc/motd"].content(), Some("welcome"));
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = load_from_path(&missing).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_default_population() {
        let entries = create_default();
        assert_eq!(entries.len(), 3);
        assert!(entries["/default_dir"].is_dir());
        assert_eq!(
            entries["/default_file.txt"].content(),
            Some(DEFAULT_FILE_CONTENT)
        );
        assert_eq!(create_default(), entries);
    }
}
