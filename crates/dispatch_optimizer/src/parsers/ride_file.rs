use std::{fmt::Write, path::Path};

use tracing::debug;

use crate::problem::{
    position::Position,
    ride::RideRequest,
    ride_assignment_problem::{RideAssignmentProblem, RideAssignmentProblemBuilder},
};

use super::{error::ParseError, parser::DatasetParser};

const VALUES_PER_LINE: usize = 6;
const HEADER_FIELDS: [&str; VALUES_PER_LINE] =
    ["rows", "columns", "vehicles", "rides", "bonus", "steps"];

/// Reads the plain text ride format: a `rows cols vehicles rides bonus steps` header
/// followed by one `a b x y earliest_start latest_finish` line per ride.
pub struct RideFileParser;

impl DatasetParser for RideFileParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<RideAssignmentProblem, ParseError> {
        debug!("Reading {}", file.as_ref().display());
        let file_content = std::fs::read_to_string(file)?;
        parse(&file_content)
    }
}

pub fn parse(text: &str) -> Result<RideAssignmentProblem, ParseError> {
    // Line numbers are 1-based to match what editors show.
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let header = parse_values(header_line, header)?;

    for (field, value) in HEADER_FIELDS.into_iter().zip(header) {
        if value < 0 {
            return Err(ParseError::NegativeValue {
                line: header_line,
                field,
                value,
            });
        }
    }

    let [rows, cols, vehicles, declared_rides, bonus, steps] = header;

    // Every ride line takes at least 12 bytes, so a bogus header count cannot over-allocate.
    let mut requests = Vec::with_capacity((declared_rides as usize).min(text.len() / 12));
    for (line, content) in lines {
        let [a, b, x, y, earliest_start, latest_finish] = parse_values(line, content)?;

        for (field, value) in [
            ("earliest start", earliest_start),
            ("latest finish", latest_finish),
        ] {
            if value < 0 {
                return Err(ParseError::NegativeValue { line, field, value });
            }
        }

        let start = Position::new(a, b);
        let end = Position::new(x, y);
        for position in [start, end] {
            if !position.is_inside_grid(rows, cols) {
                return Err(ParseError::OutsideGrid {
                    line,
                    position,
                    rows,
                    cols,
                });
            }
        }

        requests.push(RideRequest::new(start, end, earliest_start, latest_finish));
    }

    if requests.len() != declared_rides as usize {
        return Err(ParseError::RideCountMismatch {
            declared: declared_rides as usize,
            found: requests.len(),
        });
    }

    let mut builder = RideAssignmentProblemBuilder::default();
    builder
        .set_grid(rows, cols)
        .set_fleet_size(vehicles as usize)
        .set_bonus(bonus)
        .set_steps(steps)
        .set_ride_requests(requests);

    Ok(builder.build())
}

fn parse_values(line: usize, content: &str) -> Result<[i64; VALUES_PER_LINE], ParseError> {
    let parts = content.split_whitespace().collect::<Vec<_>>();
    if parts.len() != VALUES_PER_LINE {
        return Err(ParseError::Arity {
            line,
            expected: VALUES_PER_LINE,
            found: parts.len(),
        });
    }

    let mut values = [0; VALUES_PER_LINE];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part.parse().map_err(|source| ParseError::InvalidInteger {
            line,
            value: part.to_string(),
            source,
        })?;
    }

    Ok(values)
}

/// Writes `problem` back into the text format read by [`parse`].
pub fn format_problem(problem: &RideAssignmentProblem) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        problem.rows(),
        problem.cols(),
        problem.fleet_size(),
        problem.ride_count(),
        problem.bonus(),
        problem.steps()
    );

    for ride in problem.rides() {
        let _ = writeln!(
            out,
            "{} {} {} {} {} {}",
            ride.start().row(),
            ride.start().col(),
            ride.end().row(),
            ride.end().col(),
            ride.earliest_start(),
            ride.latest_finish()
        );
    }

    out
}
