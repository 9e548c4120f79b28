use crate::command::{CommandFactory, ExecutableCommand, Signal};
use crate::env::ShellEnv;
use crate::lexer;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use tracing::debug;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate — BuiltinCommand and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command interpreter.
///
/// Owns the [`ShellEnv`] and an ordered list of [`CommandFactory`] objects
/// queried to create commands by name. See [`Default`] for the factory set
/// included out of the box.
pub struct Interpreter {
    env: ShellEnv,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: ShellEnv::new(),
            commands,
        }
    }

    /// Run the prompt–read–execute loop until `stop` or end of input.
    ///
    /// End of input is a graceful exit. A failing read (other than Ctrl-C,
    /// which just drops the current line) is fatal: the input source is
    /// gone, so the error propagates and the process exits non-zero.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        loop {
            match rl.readline(&self.env.prompt()) {
                Ok(line) => {
                    if self.execute_line(&line) == Signal::Terminate {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Execute one raw input line and return the continuation signal.
    pub fn execute_line(&mut self, line: &str) -> Signal {
        self.execute_line_with_output(line, &mut std::io::stdout())
    }

    /// Like [`execute_line`](Self::execute_line), but builtin output goes to
    /// the provided writer.
    pub fn execute_line_with_output(&mut self, line: &str, stdout: &mut dyn Write) -> Signal {
        let mut tokens = lexer::split_into_tokens(line);
        if tokens.is_empty() {
            // Blank input re-prompts without invoking anything.
            return Signal::Continue;
        }

        // A single substitution: the stored target is not resolved again,
        // even when it names another alias.
        if let Some(target) = self.env.aliases.resolve(&tokens[0]).map(str::to_owned) {
            debug!(alias = %tokens[0], %target, "resolved alias");
            tokens[0] = target;
        }

        let args: Vec<&str> = tokens[1..].iter().map(String::as_str).collect();
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&tokens[0], &args) {
                return match cmd.execute(stdout, &mut self.env) {
                    Ok(signal) => signal,
                    Err(err) => {
                        eprintln!("{}: {:#}", self.env.shell_name, err);
                        Signal::Continue
                    }
                };
            }
        }
        eprintln!("{}: command not found: {}", self.env.shell_name, tokens[0]);
        Signal::Continue
    }
}

impl Default for Interpreter {
    /// The full builtin set, with the external launcher as the fallback.
    fn default() -> Self {
        use crate::builtin::*;
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Stop>::default()),
            Box::new(Factory::<SetShellName>::default()),
            Box::new(Factory::<SetTerminator>::default()),
            Box::new(Factory::<NewName>::default()),
            Box::new(Factory::<ListNewNames>::default()),
            Box::new(Factory::<SaveNewNames>::default()),
            Box::new(Factory::<ReadNewNames>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
