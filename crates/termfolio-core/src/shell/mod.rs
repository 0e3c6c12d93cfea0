//! The command interpreter
//!
//! Input is normalized by [`parser`], looked up in the fixed [`commands`]
//! table and answered with [`OutputLine`]s. Anything that needs time or IO
//! (opening a section later, reading a blog post, quitting) comes back to the
//! caller as an [`Action`].

pub mod commands;
pub mod history;
pub mod parser;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::config::TerminalConfig;
use crate::models::OutputLine;

pub use commands::{Action, Command, CommandOutput, COMMANDS};
pub use history::History;
pub use parser::{parse, ParsedCommand};

/// Result of tab completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing starts with the input
    NoMatch,
    /// Exactly one command matches; the replacement input
    Unique(String),
    /// Several match and share a longer prefix than what was typed
    Extended(String),
    /// Several match and the input cannot be extended
    Candidates(Vec<&'static str>),
}

/// Interpreter state: output buffer and history
#[derive(Debug)]
pub struct Shell {
    terminal: TerminalConfig,
    history: History,
    output: Vec<OutputLine>,
}

impl Shell {
    /// Create a shell with an empty output buffer
    pub fn new(terminal: TerminalConfig) -> Self {
        let history = History::new(terminal.history_limit);
        Self {
            terminal,
            history,
            output: Vec::new(),
        }
    }

    /// Execute a raw input line using the current local time
    pub fn execute(&mut self, raw: &str) -> Option<Action> {
        self.execute_at(raw, Local::now())
    }

    /// Execute a raw input line.
    ///
    /// Blank input is ignored entirely. Otherwise the line is recorded,
    /// echoed behind the prompt and dispatched. `Clear` is applied here; other
    /// actions are returned to the caller.
    pub fn execute_at(&mut self, raw: &str, now: DateTime<Local>) -> Option<Action> {
        let parsed = parse(raw)?;

        self.history.push(parsed.line.clone());
        self.output.push(OutputLine::Command {
            prompt: self.terminal.prompt(),
            command: parsed.line.clone(),
        });

        let output = match commands::lookup(&parsed.name) {
            Some(command) => {
                debug!(command = command.name, args = ?parsed.args, "Executing command");
                let ctx = commands::Context {
                    terminal: &self.terminal,
                    now,
                };
                (command.handler)(&ctx, &parsed.args)
            }
            None => {
                debug!(command = %parsed.name, "Unknown command");
                commands::not_found(&parsed.name)
            }
        };

        self.output.extend(output.lines);

        match output.action {
            Some(Action::Clear) => {
                self.output.clear();
                None
            }
            action => action,
        }
    }

    /// Append a line produced outside a command (e.g. an async failure)
    pub fn push_line(&mut self, line: OutputLine) {
        self.output.push(line);
    }

    /// Everything written so far
    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    /// Previous history entry, if any
    pub fn history_up(&mut self) -> Option<String> {
        self.history.up().map(str::to_string)
    }

    /// Next history entry; `Some("")` when stepping past the newest
    pub fn history_down(&mut self) -> Option<String> {
        self.history.down().map(str::to_string)
    }

    /// Executed commands
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Complete a command name. Input containing whitespace is not completed.
    pub fn complete(&self, input: &str) -> Completion {
        let prefix = input.trim_start().to_lowercase();
        if prefix.is_empty() || prefix.contains(char::is_whitespace) {
            return Completion::NoMatch;
        }

        let candidates: Vec<&'static str> = COMMANDS
            .iter()
            .filter(|c| c.alias_of.is_none() && c.name.starts_with(&prefix))
            .map(|c| c.name)
            .collect();

        match candidates.as_slice() {
            [] => Completion::NoMatch,
            [only] => Completion::Unique(format!("{only} ")),
            [first, rest @ ..] => {
                let common = rest.iter().fold(first.len(), |len, name| {
                    first
                        .bytes()
                        .zip(name.bytes())
                        .take(len)
                        .take_while(|(a, b)| a == b)
                        .count()
                });
                if common > prefix.len() {
                    Completion::Extended(first[..common].to_string())
                } else {
                    Completion::Candidates(candidates)
                }
            }
        }
    }
}
