//! Statement parsing, validation and execution.

use std::io::Write;

use tracing::trace;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementType {
    Select,
    Insert,
    Unrecognized,
}

impl StatementType {
    fn parse(keyword: &str) -> StatementType {
        match keyword {
            "select" => StatementType::Select,
            "insert" => StatementType::Insert,
            _ => StatementType::Unrecognized,
        }
    }
}

/// A parsed and validated statement, ready to run against a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

impl Statement {
    /// Parses one input line.
    ///
    /// Validation happens here too, so a statement that comes back `Ok` can
    /// only fail at execution time because the table is full.
    pub fn prepare(input: &str) -> Result<Statement> {
        let mut tokens = input.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();

        let statement = match StatementType::parse(keyword) {
            StatementType::Insert => {
                let args: Vec<&str> = tokens.collect();
                let [id, username, email] = args.as_slice() else {
                    return Err(Error::Syntax);
                };
                Statement::Insert(prepare_insert(id, username, email)?)
            }
            StatementType::Select => {
                if tokens.next().is_some() {
                    return Err(Error::Syntax);
                }
                Statement::Select
            }
            StatementType::Unrecognized => {
                return Err(Error::UnrecognizedStatement(input.to_string()));
            }
        };
        trace!(?statement, "prepared");
        Ok(statement)
    }

    /// Runs the statement. `select` writes one line per row to `out`.
    pub fn execute<W: Write>(&self, table: &mut Table, out: &mut W) -> Result<()> {
        match self {
            Statement::Insert(row) => table.insert(row),
            Statement::Select => {
                for row in table.scan() {
                    writeln!(out, "{row}")?;
                }
                Ok(())
            }
        }
    }
}

fn prepare_insert(id: &str, username: &str, email: &str) -> Result<Row> {
    let id: i64 = id.parse().map_err(|_| Error::Syntax)?;
    if id <= 0 {
        return Err(Error::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| Error::Syntax)?;
    Row::new(id, username, email)
}
