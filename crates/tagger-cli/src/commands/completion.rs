// SPDX-License-Identifier: Apache-2.0

//! Shell completion generation and installation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use console::style;
use tracing::debug;

use crate::cli::Cli;

/// Where a shell looks for completion scripts, relative to the home directory,
/// and what the user still has to do to load them.
fn install_target(shell: Shell) -> Option<(&'static str, &'static str)> {
    match shell {
        Shell::Bash => Some((
            ".bash_completion.d/tagger",
            "Add to ~/.bashrc:\n  source ~/.bash_completion.d/tagger",
        )),
        Shell::Zsh => Some((
            ".zsh/completions/_tagger",
            "Add to ~/.zshrc (before compinit):\n  fpath=(~/.zsh/completions $fpath)\n  autoload -U compinit && compinit -i",
        )),
        Shell::Fish => Some((
            ".config/fish/completions/tagger.fish",
            "Fish loads it automatically on the next start.",
        )),
        Shell::Elvish => Some((
            ".config/elvish/lib/tagger.elv",
            "Add to ~/.config/elvish/rc.elv:\n  use tagger",
        )),
        _ => None,
    }
}

/// Maps the basename of `$SHELL` to a supported shell.
fn shell_from_path(shell_path: &str) -> Option<Shell> {
    match Path::new(shell_path).file_name()?.to_str()? {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "pwsh" | "powershell" => Some(Shell::PowerShell),
        _ => None,
    }
}

fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut script = Vec::new();
    generate(shell, &mut cmd, name, &mut script);
    script
}

/// Generate completion script to stdout.
pub fn run_generate(shell: Shell) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(&completion_script(shell))?;
    stdout.flush()?;
    Ok(())
}

/// Install completion script to the standard location for the shell.
pub fn run_install(shell: Option<Shell>, dry_run: bool) -> Result<()> {
    let shell = match shell {
        Some(s) => s,
        None => {
            let shell_env = std::env::var("SHELL")
                .context("$SHELL environment variable not set. Use --shell to specify.")?;
            shell_from_path(&shell_env)
                .ok_or_else(|| anyhow!("Unsupported shell in $SHELL: {shell_env}"))?
        }
    };

    let (relative, instructions) = install_target(shell).ok_or_else(|| {
        anyhow!("No standard completion location for {shell}. Use `tagger completion generate {shell}` instead.")
    })?;
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    let path: PathBuf = home.join(relative);

    if dry_run {
        println!("{}", style("Dry run - no files written.").yellow());
        println!("  Would write: {}", style(path.display()).cyan());
        println!();
        println!("{instructions}");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    debug!(path = %path.display(), "Writing completion script");
    fs::write(&path, completion_script(shell))
        .with_context(|| format!("Failed to write completion script: {}", path.display()))?;

    println!(
        "{} Completion script written to {}",
        style("*").green().bold(),
        style(path.display()).cyan()
    );
    println!();
    println!("{instructions}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_targets_use_binary_name() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::Elvish] {
            let (path, instructions) = install_target(shell).expect("supported shell");
            assert!(path.contains("tagger"), "{shell}: {path}");
            assert!(!instructions.is_empty());
        }
    }

    #[test]
    fn test_powershell_has_no_install_target() {
        assert!(install_target(Shell::PowerShell).is_none());
    }

    #[test]
    fn test_shell_from_path() {
        assert_eq!(shell_from_path("/bin/zsh"), Some(Shell::Zsh));
        assert_eq!(shell_from_path("/usr/local/bin/fish"), Some(Shell::Fish));
        assert_eq!(shell_from_path("/usr/bin/pwsh"), Some(Shell::PowerShell));
        assert_eq!(shell_from_path("/bin/tcsh"), None);
    }

    #[test]
    fn test_completion_script_mentions_subcommands() {
        let script = String::from_utf8(completion_script(Shell::Bash)).unwrap();
        assert!(script.contains("tagger"));
        assert!(script.contains("unprocessed"));
    }
}
