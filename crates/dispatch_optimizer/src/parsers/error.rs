use std::num::ParseIntError;

use thiserror::Error;

use crate::problem::position::Position;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not read problem file")]
    Io(#[from] std::io::Error),

    #[error("problem file is empty, expected a header line")]
    MissingHeader,

    #[error("line {line}: expected {expected} values, found {found}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {value:?} is not an integer")]
    InvalidInteger {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: {field} must not be negative, found {value}")]
    NegativeValue {
        line: usize,
        field: &'static str,
        value: i64,
    },

    #[error("line {line}: {position} lies outside the {rows}x{cols} grid")]
    OutsideGrid {
        line: usize,
        position: Position,
        rows: i64,
        cols: i64,
    },

    #[error("header declares {declared} rides but {found} are listed")]
    RideCountMismatch { declared: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum SolutionParseError {
    #[error("could not read solution file")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {value:?} is not a valid count or ride index")]
    InvalidNumber {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: declares {declared} rides but lists {found}")]
    RideCountMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },
}
