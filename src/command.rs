//! Operator commands and the sources that produce them.
//!
//! A [`CommandSource`] hands the Idle handler one raw integer code per call.
//! Decoding happens in the machine, so any code a source produces is
//! acceptable: unknown codes are routed to the Error state rather than
//! rejected here.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Code returned when no valid command could be read.
pub const INVALID_COMMAND: i64 = 0;

/// Operator prompt written by [`ConsoleCommands`] before every read.
pub const PROMPT: &str = "Commands: 1=Status 2=Move 3=Shoot 4=Calc 5=Stop > ";

/// Recognized operator commands and their wire codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Command {
    Status,
    Move,
    Shoot,
    Calc,
    Stop,
}

impl Command {
    pub const fn code(self) -> i64 {
        match self {
            Self::Status => 1,
            Self::Move => 2,
            Self::Shoot => 3,
            Self::Calc => 4,
            Self::Stop => 5,
        }
    }

    /// Decode a raw command code. Unrecognized codes yield `None`.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Status),
            2 => Some(Self::Move),
            3 => Some(Self::Shoot),
            4 => Some(Self::Calc),
            5 => Some(Self::Stop),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Move => "move",
            Self::Shoot => "shoot",
            Self::Calc => "calc",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blocking supplier of raw operator command codes.
pub trait CommandSource {
    /// Block until the next command code is available.
    fn next_command(&mut self) -> i64;
}

impl<T: CommandSource + ?Sized> CommandSource for &mut T {
    fn next_command(&mut self) -> i64 {
        (**self).next_command()
    }
}

impl<T: CommandSource + ?Sized> CommandSource for Box<T> {
    fn next_command(&mut self) -> i64 {
        (**self).next_command()
    }
}

/// Pre-recorded command codes, replayed in order.
///
/// Once the script runs out every read yields [`INVALID_COMMAND`], which
/// drives the machine through Error until it escalates to Stopped.
///
/// # Example
///
/// ```rust
/// use supervisor_fsm::command::{Command, CommandSource, ScriptedCommands, INVALID_COMMAND};
///
/// let mut commands = ScriptedCommands::from_commands([Command::Move, Command::Stop]);
/// assert_eq!(commands.next_command(), 2);
/// assert_eq!(commands.next_command(), 5);
/// assert_eq!(commands.next_command(), INVALID_COMMAND);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedCommands {
    queue: VecDeque<i64>,
}

impl ScriptedCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands<I>(commands: I) -> Self
    where
        I: IntoIterator<Item = Command>,
    {
        commands.into_iter().map(Command::code).collect()
    }

    /// Queue one more raw code.
    pub fn push(&mut self, code: i64) {
        self.queue.push_back(code);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl FromIterator<i64> for ScriptedCommands {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> i64 {
        self.queue.pop_front().unwrap_or_else(|| {
            debug!("command script exhausted");
            INVALID_COMMAND
        })
    }
}

/// Interactive operator console.
///
/// Writes [`PROMPT`] and reads one line per command. Lines that do not parse
/// as an integer, read failures and end of input all yield
/// [`INVALID_COMMAND`].
pub struct ConsoleCommands<R, W> {
    input: R,
    prompt: W,
    line: String,
}

impl<R: BufRead, W: Write> ConsoleCommands<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            line: String::new(),
        }
    }
}

impl<R: BufRead, W: Write> CommandSource for ConsoleCommands<R, W> {
    fn next_command(&mut self) -> i64 {
        if let Err(err) = write!(self.prompt, "{PROMPT}").and_then(|()| self.prompt.flush()) {
            warn!(error = %err, "failed to write operator prompt");
        }

        self.line.clear();
        match self.input.read_line(&mut self.line) {
            Ok(0) => {
                debug!("operator input closed");
                INVALID_COMMAND
            }
            Ok(_) => self.line.trim().parse().unwrap_or_else(|_| {
                debug!(input = self.line.trim(), "unparseable operator input");
                INVALID_COMMAND
            }),
            Err(err) => {
                warn!(error = %err, "failed to read operator input");
                INVALID_COMMAND
            }
        }
    }
}
