use std::{fmt::Write as _, io, path::Path};

use tracing::debug;

use crate::problem::ride::RideIdx;

use super::error::SolutionParseError;

/// One line per vehicle: the number of rides followed by their indices, or `0`.
pub fn format_solution(routes: &[Vec<RideIdx>]) -> String {
    let mut out = String::new();

    for route in routes {
        let _ = write!(out, "{}", route.len());
        for ride in route {
            let _ = write!(out, " {ride}");
        }
        out.push('\n');
    }

    out
}

pub fn write_solution<W>(routes: &[Vec<RideIdx>], mut writer: W) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(format_solution(routes).as_bytes())?;
    writer.flush()
}

pub fn write_solution_file<P: AsRef<Path>>(routes: &[Vec<RideIdx>], file: P) -> io::Result<()> {
    debug!("Writing {}", file.as_ref().display());
    let file = std::fs::File::create(file)?;
    write_solution(routes, io::BufWriter::new(file))
}

/// Reads routes back from the format written by [`format_solution`]. Blank lines are
/// skipped, every other line is one vehicle.
pub fn parse_solution(text: &str) -> Result<Vec<Vec<RideIdx>>, SolutionParseError> {
    let mut routes = Vec::new();

    for (index, content) in text.lines().enumerate() {
        let line = index + 1;
        let mut values = content.split_whitespace().map(|part| {
            part.parse::<usize>()
                .map_err(|source| SolutionParseError::InvalidNumber {
                    line,
                    value: part.to_string(),
                    source,
                })
        });

        let Some(declared) = values.next() else {
            continue;
        };
        let declared = declared?;

        let route = values
            .map(|value| value.map(RideIdx::new))
            .collect::<Result<Vec<_>, _>>()?;

        if route.len() != declared {
            return Err(SolutionParseError::RideCountMismatch {
                line,
                declared,
                found: route.len(),
            });
        }

        routes.push(route);
    }

    Ok(routes)
}

pub fn read_solution_file<P: AsRef<Path>>(
    file: P,
) -> Result<Vec<Vec<RideIdx>>, SolutionParseError> {
    debug!("Reading {}", file.as_ref().display());
    let file_content = std::fs::read_to_string(file)?;
    parse_solution(&file_content)
}
