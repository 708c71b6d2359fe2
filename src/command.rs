use crate::vfs::Vfs;
use argh::{EarlyExit, FromArgs};

/// A single parsed command line: a name followed by its arguments.
///
/// Tokens are split on whitespace; there is no quoting or escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    /// Tokenize `line`. Returns `None` when it holds no tokens at all.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let name = tokens.next()?;
        Some(Self {
            name,
            args: tokens.collect(),
        })
    }
}

/// What running one command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to append to the output, possibly none.
    Output(Vec<String>),
    /// The session must end. Nothing else is printed.
    Exit,
}

impl Outcome {
    fn line(text: impl Into<String>) -> Self {
        Outcome::Output(vec![text.into()])
    }

    fn empty() -> Self {
        Outcome::Output(Vec::new())
    }
}

/// The static command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Exit,
    List,
    ChangeDirectory,
    Unknown,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "exit" => CommandKind::Exit,
            n if n == Ls::name() => CommandKind::List,
            n if n == Cd::name() => CommandKind::ChangeDirectory,
            _ => CommandKind::Unknown,
        }
    }
}

/// Run `command` against `vfs`.
///
/// Never fails: every problem is reported as an output line.
pub fn dispatch(command: &Command, vfs: &mut Vfs) -> Outcome {
    tracing::debug!(name = %command.name, args = ?command.args, cwd = vfs.cwd(), "dispatch");
    match CommandKind::from_name(&command.name) {
        CommandKind::Exit => Outcome::Exit,
        CommandKind::List => run_builtin::<Ls>(command, vfs),
        CommandKind::ChangeDirectory => run_builtin::<Cd>(command, vfs),
        CommandKind::Unknown => Outcome::line(format!("Error: Unknown command '{}'", command.name)),
    }
}

/// Built-in commands operating on the VFS.
///
/// Arguments are parsed with [`argh`] as plain positionals, so tokens such as
/// `help` or `-x` always reach the VFS as paths.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "ls" or "cd".
    fn name() -> &'static str;

    fn execute(self, vfs: &mut Vfs) -> Outcome;
}

fn run_builtin<T: BuiltinCommand>(command: &Command, vfs: &mut Vfs) -> Outcome {
    // Every token is a path, never a flag: `help` or `-x` may name a directory.
    let args: Vec<&str> = std::iter::once("--")
        .chain(command.args.iter().map(String::as_str))
        .collect();
    match T::from_args(&[T::name()], &args) {
        Ok(cmd) => cmd.execute(vfs),
        Err(EarlyExit { output, .. }) => {
            Outcome::Output(output.lines().map(str::to_string).collect())
        }
    }
}

#[derive(FromArgs)]
/// List the entries of a directory, one name per line, in lexical order.
pub struct Ls {
    #[argh(positional, greedy)]
    /// directory to list; defaults to the current directory. Extra arguments are ignored.
    pub targets: Vec<String>,
}

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn execute(self, vfs: &mut Vfs) -> Outcome {
        let target = match self.targets.first() {
            Some(t) => t.as_str(),
            None => vfs.cwd(),
        };
        match vfs.list_children(target) {
            Ok(children) => Outcome::Output(children.into_iter().map(|(name, _)| name).collect()),
            Err(e) => Outcome::line(format!("Error: {}: {}", Self::name(), e)),
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory. Without a target, go to the root.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; absolute or relative to the current directory. Extra arguments are ignored.
    pub targets: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, vfs: &mut Vfs) -> Outcome {
        let target = self.targets.first().map_or(crate::path::ROOT, String::as_str);
        match vfs.set_cwd(target) {
            Ok(()) => Outcome::empty(),
            Err(e) => Outcome::line(format!("Error: {}: {}", Self::name(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_str;

    fn run(line: &str, vfs: &mut Vfs) -> Outcome {
        dispatch(&Command::parse(line).unwrap(), vfs)
    }

    fn lines(outcome: Outcome) -> Vec<String> {
        match outcome {
            Outcome::Output(lines) => lines,
            Outcome::Exit => panic!("unexpected exit"),
        }
    }

    #[test]
    fn test_parse_splits_on_whitespace() {
        let cmd = Command::parse("  cd \t /a/b   extra ").unwrap();
        assert_eq!(cmd.name, "cd");
        assert_eq!(cmd.args, vec!["/a/b", "extra"]);
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_command_table() {
        assert_eq!(CommandKind::from_name("exit"), CommandKind::Exit);
        assert_eq!(CommandKind::from_name("ls"), CommandKind::List);
        assert_eq!(CommandKind::from_name("cd"), CommandKind::ChangeDirectory);
        assert_eq!(CommandKind::from_name("LS"), CommandKind::Unknown);
    }

    #[test]
    fn test_ls_default_vfs() {
        let mut vfs = Vfs::default();
        assert_eq!(lines(run("ls", &mut vfs)), vec!["default_dir", "default_file.txt"]);
    }

    #[test]
    fn test_ls_lists_file_and_dir_in_lexical_order() {
        let mut vfs = Vfs::new(load_from_str("/d,dir,\n/d/b,dir,\n/d/a,file,x\n").unwrap());
        assert_eq!(lines(run("ls /d", &mut vfs)), vec!["a", "b"]);
        assert_eq!(lines(run("ls d/b", &mut vfs)), Vec::<String>::new());
    }

    #[test]
    fn test_ls_errors_name_the_failure() {
        let mut vfs = Vfs::default();
        assert_eq!(
            lines(run("ls nope", &mut vfs)),
            vec!["Error: ls: path not found: /nope"]
        );
        assert_eq!(
            lines(run("ls default_file.txt", &mut vfs)),
            vec!["Error: ls: not a directory: /default_file.txt"]
        );
    }

    #[test]
    fn test_cd_changes_cwd_silently() {
        let mut vfs = Vfs::default();
        assert_eq!(lines(run("cd default_dir", &mut vfs)), Vec::<String>::new());
        assert_eq!(vfs.cwd(), "/default_dir");
        assert_eq!(lines(run("cd", &mut vfs)), Vec::<String>::new());
        assert_eq!(vfs.cwd(), "/");
    }

    #[test]
    fn test_cd_failure_keeps_cwd() {
        let mut vfs = Vfs::default();
        run("cd default_dir", &mut vfs);
        assert_eq!(
            lines(run("cd nope", &mut vfs)),
            vec!["Error: cd: path not found: /default_dir/nope"]
        );
        assert_eq!(vfs.cwd(), "/default_dir");
        assert_eq!(
            lines(run("cd /default_file.txt", &mut vfs)),
            vec!["Error: cd: not a directory: /default_file.txt"]
        );
        assert_eq!(vfs.cwd(), "/default_dir");
    }

    #[test]
    fn test_cd_ignores_extra_arguments() {
        let mut vfs = Vfs::default();
        assert_eq!(lines(run("cd default_dir extra", &mut vfs)), Vec::<String>::new());
        assert_eq!(vfs.cwd(), "/default_dir");
    }

    #[test]
    fn test_exit_ignores_arguments() {
        let mut vfs = Vfs::default();
        assert_eq!(run("exit", &mut vfs), Outcome::Exit);
        assert_eq!(run("exit 3", &mut vfs), Outcome::Exit);
    }

    #[test]
    fn test_unknown_command() {
        let mut vfs = Vfs::default();
        assert_eq!(
            lines(run("rm -rf /", &mut vfs)),
            vec!["Error: Unknown command 'rm'"]
        );
    }

    #[test]
    fn test_flag_like_tokens_are_paths() {
        let mut vfs = Vfs::new(load_from_str("/help,dir,\n/-x,dir,\n/-x/inner,file,i\n").unwrap());

        assert_eq!(lines(run("cd help", &mut vfs)), Vec::<String>::new());
        assert_eq!(vfs.cwd(), "/help");

        assert_eq!(lines(run("ls /-x", &mut vfs)), vec!["inner"]);
        run("cd /", &mut vfs);
        assert_eq!(lines(run("ls -x", &mut vfs)), vec!["inner"]);
        assert_eq!(lines(run("cd -x", &mut vfs)), Vec::<String>::new());
        assert_eq!(vfs.cwd(), "/-x");

        assert_eq!(
            lines(run("cd --help", &mut vfs)),
            vec!["Error: cd: path not found: /-x/--help"]
        );
        assert_eq!(
            lines(run("ls -", &mut vfs)),
            vec!["Error: ls: path not found: /-x/-"]
        );
        assert_eq!(vfs.cwd(), "/-x");
    }
}
