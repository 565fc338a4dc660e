use argh::FromArgs;
use dsh::Interpreter;
use dsh::banner;
use dsh::input::{DEFAULT_PROMPT, EditorSource, PlainSource};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(FromArgs)]
/// A small interactive shell.
struct Options {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text shown before each input line.
    prompt: String,

    #[argh(option)]
    /// banner file printed at startup; defaults to $HOME/.dsh_motd.
    motd: Option<PathBuf>,

    #[argh(switch)]
    /// read plain lines without the line editor, even on a terminal.
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let options: Options = argh::from_env();

    let mut interpreter = Interpreter::default();
    let home = interpreter.env().get_var_os("HOME");
    let motd = options
        .motd
        .or_else(|| banner::default_motd_path(home.as_deref()));
    banner::print_banner(motd.as_deref(), &mut io::stdout())?;

    if options.plain || !io::stdin().is_terminal() {
        let mut source = PlainSource::new(io::stdin().lock(), io::stdout());
        interpreter.repl(&mut source, &options.prompt)?;
    } else {
        let mut source = EditorSource::new()?;
        interpreter.repl(&mut source, &options.prompt)?;
    }
    Ok(())
}
