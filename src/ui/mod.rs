pub mod clients;
pub mod employees;
pub mod users;

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use dialoguer::Password;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the menu loop should do after handling one choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented terminal: prompts go to `output`, answers come from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Read passwords from the controlling terminal with echo off
    hidden_passwords: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hidden_passwords: false,
        }
    }

    /// Only enable this when `input` is the interactive terminal itself.
    pub fn with_hidden_passwords(mut self, hidden: bool) -> Self {
        self.hidden_passwords = hidden;
        self
    }

    /// Print `prompt` and read one line without its line ending.
    ///
    /// End of input is reported as `UnexpectedEof` so the menu loop can stop.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Like `ask`, but surrounding whitespace is stripped
    pub fn ask_trimmed(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.ask(prompt)?.trim().to_string())
    }

    /// Ask for a secret under `label`. On a terminal the answer is not echoed;
    /// otherwise it is read as a plain line.
    pub fn ask_password(&mut self, label: &str) -> io::Result<String> {
        if !self.hidden_passwords {
            return self.ask_trimmed(&format!("{label}: "));
        }

        self.output.flush()?;
        let answer = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .map_err(io::Error::other)?;
        Ok(answer.trim().to_string())
    }

    /// Prompt showing the current value; a blank answer keeps it.
    pub fn ask_or_keep(&mut self, label: &str, current: &str) -> io::Result<String> {
        let answer = self.ask_trimmed(&format!("{label} ({current}): "))?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Closed input ends the menu like the exit option does.
pub(crate) fn finish_on_eof<R: BufRead, W: Write>(
    result: io::Result<Flow>,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
            console.say("")?;
            Ok(Flow::Exit)
        }
        other => other,
    }
}

/// Blank input is `None`; anything else must parse.
pub fn parse_optional<T: FromStr>(text: &str) -> Result<Option<T>, T::Err> {
    let text = text.trim();
    if text.is_empty() {
        Ok(None)
    } else {
        text.parse().map(Some)
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use super::Console;

    pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    /// Console fed with the given lines
    pub fn scripted(lines: &[&str]) -> ScriptedConsole {
        let mut input = lines.join("\n");
        input.push('\n');
        Console::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    pub fn transcript(console: ScriptedConsole) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }
}
