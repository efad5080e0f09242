use crate::error::{CompletionError, Result};
use clap::{Args, Command};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use clap_complete::env::{self, EnvCompleter};
use std::ffi::OsStr;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

pub const COMMAND_NAME: &str = "completion";
pub const TYPE_FLAG: &str = "type";

/// Environment variable the generated scripts set when calling back into `kk`
pub const COMPLETE_VAR: &str = "COMPLETE";

pub const LONG_ABOUT: &str = "Generate shell completion scripts

Normally you don't need any extra work to have this feature if you've installed kk by brew";

pub const EXAMPLES: &str = "EXAMPLES:
  Installing bash completion on macOS using homebrew
    If running Bash 3.2 included with macOS:
      brew install bash-completion
    or, if running Bash 4.1+:
      brew install bash-completion@2
    Add the completion to your completion directory:
      kk completion --type bash > $(brew --prefix)/etc/bash_completion.d/kk

  Load kk completion code for bash into the current shell:
    source <(kk completion --type bash)

  Load kk completion code for zsh into the current shell:
    source <(kk completion --type zsh)
  Set kk completion code for zsh to autoload on startup:
    kk completion --type zsh > \"${fpath[1]}/_kk\"

  Load kk completion code for PowerShell into the current session:
    kk completion --type powerShell | Out-String | Invoke-Expression";

#[derive(Args, Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Generate different types of shell which are [zsh bash powerShell]
    #[arg(id = "type", short = 't', long = "type", value_name = "TYPE")]
    pub shell_type: Option<String>,
}

impl CompletionOptions {
    pub fn new(shell_type: impl Into<String>) -> Self {
        Self {
            shell_type: Some(shell_type.into()),
        }
    }

    /// The requested shell, empty when `--type` was not given
    pub fn shell_type(&self) -> &str {
        self.shell_type.as_deref().unwrap_or_default()
    }
}

/// Shells a completion script can be generated for
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ShellKind {
    Zsh,
    Bash,
    PowerShell,
}

impl ShellKind {
    pub const ALL: [ShellKind; 3] = [ShellKind::Zsh, ShellKind::Bash, ShellKind::PowerShell];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShellKind::Zsh => "zsh",
            ShellKind::Bash => "bash",
            ShellKind::PowerShell => "powerShell",
        }
    }

    fn completer(self) -> &'static dyn EnvCompleter {
        match self {
            ShellKind::Zsh => &env::Zsh,
            ShellKind::Bash => &env::Bash,
            ShellKind::PowerShell => &env::Powershell,
        }
    }

    /// Render the completion script for `root`.
    ///
    /// The script registers `kk` itself as the completer: on every tab press
    /// the shell runs `kk` with `COMPLETE=<shell>` and the candidates come
    /// from the live command tree, including the `--type` values.
    pub fn generate(self, root: &Command) -> io::Result<Vec<u8>> {
        let bin_name = root.get_name();
        let mut script = Vec::new();
        self.completer()
            .write_registration(COMPLETE_VAR, bin_name, bin_name, bin_name, &mut script)?;
        Ok(script)
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShellKind {
    type Err = CompletionError;

    fn from_str(s: &str) -> Result<Self> {
        ShellKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CompletionError::UnknownShellType(s.to_string()))
    }
}

/// Candidates offered when completing the value of `--type`.
///
/// The partial input is ignored: every shell is always offered and the shell
/// does its own prefix matching.
pub fn shell_type_candidates(_to_complete: &str) -> Vec<&'static str> {
    ShellKind::ALL.iter().map(ShellKind::as_str).collect()
}

fn complete_shell_type(current: &OsStr) -> Vec<CompletionCandidate> {
    shell_type_candidates(&current.to_string_lossy())
        .into_iter()
        .map(CompletionCandidate::new)
        .collect()
}

/// Attach the shell candidates to `kk completion --type`.
///
/// On failure `root` is left untouched, so the flag keeps parsing as a plain
/// string and only the tab-completion hint is lost.
pub fn register_type_completion(root: &mut Command) -> Result<()> {
    let has_flag = root.find_subcommand(COMMAND_NAME).is_some_and(|sub| {
        sub.get_arguments()
            .any(|arg| arg.get_id().as_str() == TYPE_FLAG)
    });

    if !has_flag {
        return Err(CompletionError::Registration {
            command: COMMAND_NAME,
            flag: TYPE_FLAG,
        });
    }

    let tree = std::mem::take(root);
    *root = tree.mut_subcommand(COMMAND_NAME, |sub| {
        sub.mut_arg(TYPE_FLAG, |arg| {
            arg.add(ArgValueCompleter::new(complete_shell_type))
        })
    });

    Ok(())
}

/// Like [`register_type_completion`], but a failure is only reported on
/// `err_out` and never stops the command from being built.
pub fn register_or_report(root: &mut Command, err_out: &mut dyn Write) {
    if let Err(err) = register_type_completion(root) {
        let _ = writeln!(err_out, "{err}");
    }
}

/// Execute the completion command - writes the script (or the command help
/// when no shell was given) to `out`
pub fn execute(
    options: &CompletionOptions,
    root: &mut Command,
    out: &mut dyn Write,
) -> Result<()> {
    let shell_type = options.shell_type();

    if shell_type.is_empty() {
        tracing::debug!("No shell type given, printing help");
        return print_help(root, out);
    }

    let shell: ShellKind = shell_type.parse()?;
    tracing::debug!("Generating {} completion script", shell);

    let script = shell.generate(root)?;
    out.write_all(&script)?;
    out.flush()?;

    Ok(())
}

fn print_help(root: &mut Command, out: &mut dyn Write) -> Result<()> {
    if root.get_bin_name().is_none() {
        let bin_name = root.get_name().to_string();
        root.set_bin_name(bin_name);
    }
    root.build();

    let help = match root.find_subcommand_mut(COMMAND_NAME) {
        Some(sub) => sub.render_long_help(),
        None => root.render_long_help(),
    };

    write!(out, "{help}")?;
    out.flush()?;

    Ok(())
}
