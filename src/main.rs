mod logging;

use argh::FromArgs;
use std::path::PathBuf;
use vfs_shell::{Flow, Session, SessionConfig, TerminalSink};

#[derive(FromArgs)]
/// Shell emulator over an in-memory virtual filesystem.
struct Args {
    #[argh(option, short = 'v')]
    /// CSV file describing the VFS as `path,kind,content` rows
    vfs: Option<PathBuf>,

    #[argh(option, short = 'p')]
    /// prompt symbol shown after the working directory (default: `$`)
    prompt: Option<String>,

    #[argh(option, short = 's')]
    /// script of commands to run before the interactive prompt
    script: Option<PathBuf>,

    #[argh(switch)]
    /// exit after the startup script instead of reading commands from the terminal
    no_interactive: bool,
}

impl From<Args> for SessionConfig {
    fn from(args: Args) -> Self {
        SessionConfig {
            vfs_path: args.vfs,
            prompt: args.prompt,
            script_path: args.script,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Args = argh::from_env();
    let interactive = !args.no_interactive;
    let config = SessionConfig::from(args);

    let mut sink = TerminalSink::new(std::io::stdout(), true);
    let mut session = Session::start(config, &mut sink);

    if let Some(script) = session.config().script_path.clone() {
        if session.run_script(&script, &mut sink) == Flow::Exit {
            return Ok(());
        }
    }

    if interactive {
        // The line editor already shows what was typed.
        sink.set_show_echo(false);
        session.repl(&mut sink)?;
    }
    Ok(())
}
