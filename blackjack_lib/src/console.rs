//! The line based console the game talks to its players through.
//!
//! Implementors only provide `read_line` and `display`, the validated requests are built on top of those two and
//! keep asking until they get an acceptable answer.

use crate::error::{BlackjackGameError, InputError};
use log::debug;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Required method, blocks until a line of input is available and returns it without the line terminator.
    /// Returns `BlackjackGameError::InputClosed` once the input has ended.
    fn read_line(&mut self) -> Result<String, BlackjackGameError>;

    /// Required method, shows `text` to the players.
    fn display(&mut self, text: &str) -> Result<(), BlackjackGameError>;

    /// Asks for an integer greater than 0 and, when `max` is given, no greater than `max`.
    fn request_positive_integer(
        &mut self,
        prompt: &str,
        max: Option<u64>,
    ) -> Result<u64, BlackjackGameError> {
        self.display(prompt)?;
        loop {
            let line = self.read_line()?;
            match parse_positive_integer(&line, max) {
                Ok(n) => return Ok(n),
                Err(e) => {
                    debug!("rejected integer input: {e}");
                    let retry = match max {
                        Some(max) => format!("{e}. Please enter a whole number from 1 to {max}."),
                        None => format!("{e}. Please enter a whole number greater than 0."),
                    };
                    self.display(&retry)?;
                }
            }
        }
    }

    /// Asks for one of the letters in `allowed`, case is ignored. Returns the upper case letter.
    fn request_choice(&mut self, prompt: &str, allowed: &[char]) -> Result<char, BlackjackGameError> {
        self.display(prompt)?;
        loop {
            let line = self.read_line()?;
            match parse_choice(&line, allowed) {
                Ok(c) => return Ok(c),
                Err(e) => {
                    debug!("rejected choice: {e}");
                    self.display(&format!("{e}, please type one of {}.", letters(allowed)))?;
                }
            }
        }
    }

    /// Blocks until the players send any line, the line itself is discarded.
    fn await_continue(&mut self, prompt: &str) -> Result<(), BlackjackGameError> {
        self.display(prompt)?;
        self.read_line().map(|_| ())
    }
}

/// Parses a strictly positive integer no greater than `max`.
pub fn parse_positive_integer(input: &str, max: Option<u64>) -> Result<u64, InputError> {
    let input = input.trim();
    let n: i64 = input
        .parse()
        .map_err(|_| InputError::NotAnInteger(input.to_string()))?;
    if n <= 0 {
        return Err(InputError::NotPositive(n));
    }
    let n = n as u64;
    match max {
        Some(max) if n > max => Err(InputError::AboveLimit { value: n, max }),
        _ => Ok(n),
    }
}

/// Parses a single letter out of `allowed`, ignoring case and surrounding whitespace.
pub fn parse_choice(input: &str, allowed: &[char]) -> Result<char, InputError> {
    let normalized = input.trim().to_uppercase();
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if allowed.iter().any(|a| a.to_ascii_uppercase() == c) => Ok(c),
        _ => Err(InputError::NotAllowed {
            input: input.trim().to_string(),
            allowed: letters(allowed),
        }),
    }
}

fn letters(allowed: &[char]) -> String {
    allowed
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

/// A `Console` over any buffered reader and writer, stdin and stdout for an interactive game.
pub struct StdConsole<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StdConsole { reader, writer }
    }

    /// Consumes the console and hands back its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    /// Associated function for a console attached to the process' standard input and output.
    pub fn stdio() -> Self {
        StdConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self) -> Result<String, BlackjackGameError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(BlackjackGameError::InputClosed);
        }
        Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    fn display(&mut self, text: &str) -> Result<(), BlackjackGameError> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// A `Console` fed from a fixed list of input lines that records everything displayed.
/// Running out of lines behaves like a closed input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> ScriptedConsole
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything displayed so far, one entry per `display` call.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Everything displayed so far joined into a single string.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Number of input lines not read yet.
    pub fn unread(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Result<String, BlackjackGameError> {
        self.input.pop_front().ok_or(BlackjackGameError::InputClosed)
    }

    fn display(&mut self, text: &str) -> Result<(), BlackjackGameError> {
        self.output.push(text.to_string());
        Ok(())
    }
}
