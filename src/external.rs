use crate::command::{CommandFactory, ExecutableCommand, Signal};
use crate::env::ShellEnv;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Command that is not a builtin: launched as a child process inheriting
/// the shell's standard streams.
pub struct ExternalCommand {
    name: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(name: String, args: Vec<String>) -> Self {
        Self { name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    /// Claims every name, so this factory must be queried last.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        Some(Box::new(ExternalCommand::new(
            name.to_owned(),
            args.iter().map(|arg| arg.to_string()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(self: Box<Self>, _stdout: &mut dyn Write, _env: &mut ShellEnv) -> Result<Signal> {
        debug!(program = %self.name, "spawning child process");
        let mut child = Command::new(&self.name)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| self.name.clone())?;

        // Blocks until the child exits normally or dies to a signal;
        // job-control stops do not wake the wait. The exit status is not
        // propagated anywhere.
        let status = child.wait().context("wait for child")?;
        debug!(program = %self.name, %status, "child finished");
        Ok(Signal::Continue)
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    fn launch(name: &str, args: &[&str]) -> Result<Signal> {
        let cmd = ExternalCommand::new(
            name.to_owned(),
            args.iter().map(|arg| arg.to_string()).collect(),
        );
        Box::new(cmd).execute(&mut Vec::new(), &mut ShellEnv::new())
    }

    #[test]
    fn test_successful_child_continues() {
        assert_eq!(launch("/bin/sh", &["-c", "true"]).unwrap(), Signal::Continue);
    }

    #[test]
    fn test_failing_child_still_continues() {
        // The child's exit status never reaches the loop.
        assert_eq!(
            launch("/bin/sh", &["-c", "exit 3"]).unwrap(),
            Signal::Continue
        );
    }

    #[test]
    fn test_missing_program_reports_spawn_failure() {
        let err = launch("definitely-not-a-real-program-xyz", &[]).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-program-xyz"));
    }
}
