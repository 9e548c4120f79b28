use crate::env::ShellEnv;
use anyhow::Result;
use std::io::Write;

/// Continuation signal returned by every executed command.
///
/// The interactive loop keeps prompting on [`Signal::Continue`] and shuts
/// down gracefully on [`Signal::Terminate`]. The `stop` builtin is the only
/// command that returns the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Terminate,
}

/// Object-safe trait for any command the shell can execute.
///
/// Implemented by built-ins via a blanket impl and by the external launcher.
/// Builtin output goes to `stdout`; external commands ignore it and inherit
/// the real process streams instead.
pub trait ExecutableCommand {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut ShellEnv) -> Result<Signal>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The
/// interpreter queries its factories in order, so a catch-all factory (the
/// external launcher) must come last.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
