//! The read-eval-print loop.
//!
//! Every cycle is: write the prompt, read one line, classify it, respond.
//! The loop is generic over its input and output so tests can drive it
//! without spawning a process.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::statement::Statement;
use crate::table::Table;

pub const PROMPT: &str = "db > ";

struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Reads the next line. Returns `false` at end of input.
    fn read_input<R: BufRead>(&mut self, input: &mut R) -> Result<bool> {
        self.buffer.clear();
        if input.read_line(&mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.buffer = self.buffer.trim().to_string();
        Ok(true)
    }
}

// Non-SQL statements like .exit are called “meta-commands”.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaCommand {
    Exit,
    Unrecognized,
}

impl MetaCommand {
    fn parse(input: &str) -> Option<MetaCommand> {
        match input {
            ".exit" => Some(MetaCommand::Exit),
            _ if input.starts_with('.') => Some(MetaCommand::Unrecognized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputType {
    Meta(MetaCommand),
    Statement,
    EndOfInput,
}

impl InputType {
    fn classify(input: &str, has_line: bool) -> InputType {
        if !has_line {
            InputType::EndOfInput
        } else if let Some(meta) = MetaCommand::parse(input) {
            InputType::Meta(meta)
        } else {
            InputType::Statement
        }
    }
}

/// What the loop does after handling one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Interpreter state: the table lives as long as the loop does.
#[derive(Debug, Default)]
pub struct Repl {
    table: Table,
}

impl Repl {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Runs until `.exit` or end of input. Only I/O failures are returned.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        let mut input_buffer = InputBuffer::new();
        loop {
            print_prompt(out)?;
            let has_line = input_buffer.read_input(input)?;
            if self.step(&input_buffer.buffer, has_line, out)? == Step::Exit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Handles one already-read line and writes its response.
    pub fn step<W: Write>(&mut self, line: &str, has_line: bool, out: &mut W) -> Result<Step> {
        let response = match InputType::classify(line, has_line) {
            InputType::EndOfInput => {
                debug!("end of input");
                return Ok(Step::Exit);
            }
            InputType::Meta(MetaCommand::Exit) => {
                debug!(rows = self.table.len(), "exit requested");
                return Ok(Step::Exit);
            }
            InputType::Meta(MetaCommand::Unrecognized) => {
                Err(Error::UnrecognizedCommand(line.to_string()))
            }
            InputType::Statement => self.execute(line, out),
        };

        match response {
            Ok(()) => writeln!(out, "Executed.")?,
            Err(err) if err.is_recoverable() => {
                debug!(%err, line, "statement failed");
                writeln!(out, "{err}")?;
            }
            Err(err) => return Err(err),
        }
        Ok(Step::Continue)
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        let statement = Statement::prepare(line)?;
        statement.execute(&mut self.table, out)
    }
}

fn print_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    Ok(())
}
