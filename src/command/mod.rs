//! # Command Registry
//!
//! The fixed, ordered list of actions the dashboard offers. Each [`Command`]
//! is a display name plus an optional [`Action`]; a missing action means the
//! entry exists in the menu but has not been implemented yet.
//!
//! ## Default Commands
//!
//! | Name | Action |
//! |------|--------|
//! | build | `meson compile -C build` |
//! | clean | not implemented |
//! | info | not implemented |
//! | configure | not implemented |
//! | meson | `meson setup --cross-file cross-file.txt build` |
//! | logs | not implemented |
//! | exit | leave the dashboard |
//!
//! The registry is built once at startup and never mutated.

pub mod executor;

pub use executor::{CapturedOutput, CommandRunner, LaunchError, SystemRunner};

use std::fmt;

/// What happens when a command is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run an external program. The string is split on whitespace into an
    /// argument vector; no shell is involved.
    Run(String),
    /// Leave the dashboard, same as pressing `q`.
    Exit,
}

impl Action {
    /// Argument vector for a [`Action::Run`]; empty for [`Action::Exit`].
    pub fn argv(&self) -> Vec<&str> {
        match self {
            Action::Run(cmd) => cmd.split_whitespace().collect(),
            Action::Exit => Vec::new(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Run(cmd) => write!(f, "{}", cmd),
            Action::Exit => write!(f, "<exit>"),
        }
    }
}

/// A named entry in the navigation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    /// `None` marks the entry as not implemented.
    pub action: Option<Action>,
}

impl Command {
    pub fn run(name: &str, cmd: &str) -> Self {
        Self {
            name: name.to_string(),
            action: Some(Action::Run(cmd.to_string())),
        }
    }

    pub fn not_implemented(name: &str) -> Self {
        Self {
            name: name.to_string(),
            action: None,
        }
    }

    pub fn exit(name: &str) -> Self {
        Self {
            name: name.to_string(),
            action: Some(Action::Exit),
        }
    }

    pub fn is_implemented(&self) -> bool {
        self.action.is_some()
    }
}

/// Ordered, immutable list of commands.
#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// The build actions shipped with baker.
    pub fn builtin() -> Self {
        Self::new(vec![
            Command::run("build", "meson compile -C build"),
            Command::not_implemented("clean"),
            Command::not_implemented("info"),
            Command::not_implemented("configure"),
            Command::run("meson", "meson setup --cross-file cross-file.txt build"),
            Command::not_implemented("logs"),
            Command::exit("exit"),
        ])
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Width of the navigation pane: the longest name plus four columns of
    /// padding for borders and the selection margin.
    pub fn list_width(&self) -> u16 {
        let longest = self
            .commands
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        u16::try_from(longest + 4).unwrap_or(u16::MAX)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
