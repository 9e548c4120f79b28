use crate::command::{CommandFactory, ExecutableCommand, Signal};
use crate::env::ShellEnv;
use crate::interpreter::Factory;
use anyhow::{Context, Result, bail};
use argh::{EarlyExit, FromArgs};
use std::fs;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// in-process without spawning a child. Errors they return are user-level:
/// the interpreter reports them on standard error and keeps looping.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "newname".
    fn name() -> &'static str;

    /// Executes the command against the shell state.
    fn run(self, stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        (*self).run(stdout, env)
    }
}

/// Outcome of a failed (or `--help`) argh parse, replayed as a command.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _env: &mut ShellEnv) -> Result<Signal> {
        if self.is_error {
            bail!("{}", self.output.trim_end());
        }
        stdout.write_all(self.output.as_bytes())?;
        Ok(Signal::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        Some(match T::from_args(&[name], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

/// Names of every builtin, in the order `help` lists them.
pub(crate) const BUILTIN_NAMES: &[&str] = &[
    "cd",
    "help",
    "stop",
    "setshellname",
    "setterminator",
    "newname",
    "listnewnames",
    "savenewnames",
    "readnewnames",
];

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to, absolute or relative to the current directory
    pub path: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn run(self, _stdout: &mut dyn Write, _env: &mut ShellEnv) -> Result<Signal> {
        let Some(path) = self.path else {
            bail!("expected argument to \"cd\"");
        };
        std::env::set_current_dir(&path).with_context(|| format!("cd: {path}"))?;
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Print the list of built-in commands.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn run(self, stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        writeln!(stdout, "{}", env.shell_name)?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built in:")?;
        for name in BUILTIN_NAMES {
            writeln!(stdout, "  {name}")?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Terminate the shell.
pub struct Stop {
    #[argh(positional, greedy)]
    /// accepted and ignored; stop takes no meaningful arguments
    pub _args: Vec<String>,
}

impl BuiltinCommand for Stop {
    fn name() -> &'static str {
        "stop"
    }

    fn run(self, _stdout: &mut dyn Write, _env: &mut ShellEnv) -> Result<Signal> {
        Ok(Signal::Terminate)
    }
}

#[derive(FromArgs)]
/// Set the name shown in the prompt; no argument restores the default.
pub struct SetShellName {
    #[argh(positional, greedy)]
    /// new shell name; omit to restore the default, extras are ignored
    pub args: Vec<String>,
}

impl BuiltinCommand for SetShellName {
    fn name() -> &'static str {
        "setshellname"
    }

    fn run(self, _stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        env.set_shell_name(self.args.into_iter().next());
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Set the prompt suffix; no argument restores the default.
pub struct SetTerminator {
    #[argh(positional, greedy)]
    /// new prompt suffix; omit to restore the default, extras are ignored
    pub args: Vec<String>,
}

impl BuiltinCommand for SetTerminator {
    fn name() -> &'static str {
        "setterminator"
    }

    fn run(self, _stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        env.set_terminator(self.args.into_iter().next());
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Define, replace, or remove a command alias.
pub struct NewName {
    #[argh(positional, greedy)]
    /// an `<alias>` alone removes it; `<alias> <command>` defines or replaces it
    pub args: Vec<String>,
}

impl BuiltinCommand for NewName {
    fn name() -> &'static str {
        "newname"
    }

    fn run(self, _stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        match self.args.as_slice() {
            [] => bail!("expected argument to \"newname\""),
            [alias] => env.aliases.remove(alias)?,
            [alias, command] => env.aliases.define(alias, command)?,
            _ => bail!("too many arguments to \"newname\""),
        }
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Print every defined alias, one `name target` pair per line.
pub struct ListNewNames {}

impl BuiltinCommand for ListNewNames {
    fn name() -> &'static str {
        "listnewnames"
    }

    fn run(self, stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        for entry in env.aliases.entries() {
            writeln!(stdout, "{} {}", entry.name, entry.target)?;
        }
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Write every defined alias to a file, overwriting it.
pub struct SaveNewNames {
    #[argh(positional)]
    /// file to write, one `name target` pair per line in table order
    pub path: Option<String>,
}

impl BuiltinCommand for SaveNewNames {
    fn name() -> &'static str {
        "savenewnames"
    }

    fn run(self, _stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal> {
        let Some(path) = self.path else {
            bail!("expected argument to \"savenewnames\"");
        };
        let mut file =
            fs::File::create(&path).with_context(|| format!("savenewnames: cannot create {path}"))?;
        for entry in env.aliases.entries() {
            writeln!(file, "{} {}", entry.name, entry.target)?;
        }
        Ok(Signal::Continue)
    }
}

#[derive(FromArgs)]
/// Print a saved alias file to standard output.
pub struct ReadNewNames {
    #[argh(positional)]
    /// file to display; its bytes are echoed without repopulating the table
    pub path: Option<String>,
}

impl BuiltinCommand for ReadNewNames {
    fn name() -> &'static str {
        "readnewnames"
    }

    fn run(self, stdout: &mut dyn Write, _env: &mut ShellEnv) -> Result<Signal> {
        let Some(path) = self.path else {
            bail!("expected argument to \"readnewnames\"");
        };
        let bytes =
            fs::read(&path).with_context(|| format!("readnewnames: cannot open {path}"))?;
        stdout.write_all(&bytes)?;
        Ok(Signal::Continue)
    }
}
