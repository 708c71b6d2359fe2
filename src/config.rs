use std::path::PathBuf;

/// Symbol shown after the working directory when no custom prompt is configured.
pub const DEFAULT_PROMPT_SYMBOL: &str = "$";

/// Startup options handed to a [`Session`](crate::Session) by the launcher.
///
/// Every field is independently optional:
/// - without `vfs_path` the default in-memory VFS is used;
/// - without `prompt` the prompt ends in [`DEFAULT_PROMPT_SYMBOL`];
/// - without `script_path` the session is interactive only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub vfs_path: Option<PathBuf>,
    pub prompt: Option<String>,
    pub script_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn prompt_symbol(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT_SYMBOL)
    }
}
