//! Process-wide mutable shell state.

use crate::aliases::AliasTable;

/// Display name used in the prompt and as the prefix of error messages.
pub const DEFAULT_SHELL_NAME: &str = "myshell";

/// Suffix printed after the shell name in the prompt.
pub const DEFAULT_TERMINATOR: &str = ">";

/// Mutable context threaded through every command the shell executes.
///
/// Holds the prompt pieces and the alias table. One instance is owned by
/// the interpreter and only ever touched from the single loop thread, so
/// every table mutation is atomic with respect to any lookup.
#[derive(Debug)]
pub struct ShellEnv {
    pub shell_name: String,
    pub terminator: String,
    pub aliases: AliasTable,
}

impl ShellEnv {
    pub fn new() -> Self {
        Self {
            shell_name: DEFAULT_SHELL_NAME.to_owned(),
            terminator: DEFAULT_TERMINATOR.to_owned(),
            aliases: AliasTable::new(),
        }
    }

    /// Prompt text emitted before each read, without a trailing newline.
    pub fn prompt(&self) -> String {
        format!("{} {} ", self.shell_name, self.terminator)
    }

    /// Set the display name; `None` restores the default.
    pub fn set_shell_name(&mut self, name: Option<String>) {
        self.shell_name = name.unwrap_or_else(|| DEFAULT_SHELL_NAME.to_owned());
    }

    /// Set the prompt suffix; `None` restores the default.
    pub fn set_terminator(&mut self, terminator: Option<String>) {
        self.terminator = terminator.unwrap_or_else(|| DEFAULT_TERMINATOR.to_owned());
    }
}

impl Default for ShellEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt() {
        let env = ShellEnv::new();
        assert_eq!(env.prompt(), "myshell > ");
    }

    #[test]
    fn test_set_and_reset_shell_name() {
        let mut env = ShellEnv::new();
        env.set_shell_name(Some("tsh".to_owned()));
        assert_eq!(env.prompt(), "tsh > ");

        env.set_shell_name(None);
        assert_eq!(env.shell_name, DEFAULT_SHELL_NAME);
    }

    #[test]
    fn test_set_and_reset_terminator() {
        let mut env = ShellEnv::new();
        env.set_terminator(Some("$".to_owned()));
        assert_eq!(env.prompt(), "myshell $ ");

        env.set_terminator(None);
        assert_eq!(env.terminator, DEFAULT_TERMINATOR);
    }
}
