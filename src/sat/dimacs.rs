#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A reader for the DIMACS CNF format.
//!
//! The format: comment lines start with `c`, one `p cnf <vars> <clauses>`
//! header precedes the clauses, and the body is whitespace-separated signed
//! integers where `0` terminates a clause. Clauses may span lines. A line
//! starting with `%` ends the input (competition files often place a stray
//! `0` after it). A trailing clause without its terminating `0` is accepted.
//! An explicit empty clause (two consecutive `0`s) is kept in the store;
//! deciding that it makes the formula unsatisfiable is the solver's job,
//! not the reader's.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Everything that can go wrong while reading DIMACS input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("i/o error reading DIMACS input: {0}")]
    Io(#[from] io::Error),

    /// Clause data appeared before any `p cnf` header, or no header at all.
    #[error("missing `p cnf <vars> <clauses>` header")]
    MissingHeader,

    /// A `p` line that does not have the shape `p cnf <vars> <clauses>`.
    #[error("invalid header line: {line:?}")]
    InvalidHeader {
        /// The offending line.
        line: String,
    },

    /// A token in the clause body that is not a signed integer.
    #[error("invalid literal token {token:?}")]
    InvalidLiteral {
        /// The offending token.
        token: String,
    },

    /// A literal refers to a variable above the header's count.
    #[error("variable {var} out of range, header declares {max}")]
    VariableOutOfRange {
        /// The out-of-range variable.
        var: u32,
        /// The header's variable count.
        max: usize,
    },

    /// The number of clauses read disagrees with the header.
    #[error("clause count mismatch: header declares {expected}, found {found}")]
    ClauseCountMismatch {
        /// The header's clause count.
        expected: usize,
        /// The number of clauses actually read.
        found: usize,
    },
}

fn parse_header(line: &str) -> Result<(usize, usize), ParseError> {
    let invalid = || ParseError::InvalidHeader {
        line: line.to_string(),
    };

    let mut parts = line.split_ascii_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }
    let num_vars = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(invalid)?;
    let num_clauses = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((num_vars, num_clauses))
}

/// Parses DIMACS data from any `BufRead` source into a `Cnf`.
///
/// The resulting formula is sized by the header's variable count, so
/// variables the body never mentions still get slots.
///
/// # Errors
///
/// See [`ParseError`] for the failure modes.
pub fn parse_dimacs<R: BufRead, L: Literal, S: LiteralStorage<L>>(
    reader: R,
) -> Result<Cnf<L, S>, ParseError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(ParseError::InvalidHeader {
                    line: line.to_string(),
                });
            }
            header = Some(parse_header(line)?);
            continue;
        }

        let (num_vars, _) = header.ok_or(ParseError::MissingHeader)?;

        for token in line.split_ascii_whitespace() {
            let value: i32 = token.parse().map_err(|_| ParseError::InvalidLiteral {
                token: token.to_string(),
            })?;

            if value == 0 {
                clauses.push(std::mem::take(&mut current));
            } else {
                let var = value.unsigned_abs();
                if var as usize > num_vars {
                    return Err(ParseError::VariableOutOfRange { var, max: num_vars });
                }
                current.push(value);
            }
        }
    }

    // last clause may legitimately lack its terminating 0
    if !current.is_empty() {
        clauses.push(current);
    }

    let (num_vars, num_clauses) = header.ok_or(ParseError::MissingHeader)?;
    if clauses.len() != num_clauses {
        return Err(ParseError::ClauseCountMismatch {
            expected: num_clauses,
            found: clauses.len(),
        });
    }

    let mut cnf: Cnf<L, S> = Cnf::new(clauses);
    cnf.num_vars = cnf.num_vars.max(num_vars + 1);

    tracing::debug!(
        vars = num_vars,
        clauses = cnf.len(),
        "parsed DIMACS formula"
    );

    Ok(cnf)
}

/// Parses DIMACS data held in a string.
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse_dimacs_text<L: Literal, S: LiteralStorage<L>>(
    text: &str,
) -> Result<Cnf<L, S>, ParseError> {
    parse_dimacs(io::Cursor::new(text))
}

/// Opens and parses a DIMACS file.
///
/// # Errors
///
/// `ParseError::Io` if the file cannot be opened or read; otherwise see
/// [`ParseError`].
pub fn parse_file<L: Literal, S: LiteralStorage<L>>(
    path: impl AsRef<Path>,
) -> Result<Cnf<L, S>, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}
