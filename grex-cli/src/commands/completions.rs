//! Shell completions command - Generate shell completion scripts

use std::io;

use clap::Command;
use clap_complete::{generate, shells};

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
            Shell::Elvish => write!(f, "elvish"),
        }
    }
}

/// Generate completions for `cmd` and write them to `out`
pub fn generate_to(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, "grex", out),
        Shell::Zsh => generate(shells::Zsh, cmd, "grex", out),
        Shell::Fish => generate(shells::Fish, cmd, "grex", out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, "grex", out),
        Shell::Elvish => generate(shells::Elvish, cmd, "grex", out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::Bash.to_string(), "bash");
        assert_eq!(Shell::PowerShell.to_string(), "powershell");
    }

    #[test]
    fn test_generate_bash() {
        let mut cmd = Command::new("grex").subcommand(Command::new("replay"));
        let mut buf = Vec::new();
        generate_to(Shell::Bash, &mut cmd, &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("grex"));
    }
}
