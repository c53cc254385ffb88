//! Command implementations, one module per subcommand.

pub mod classify;
pub mod gpa;
pub mod init;
pub mod required_gpa;
pub mod simulate;
pub mod update_cgpa;
pub mod validate;

use std::path::Path;

use anyhow::{bail, Context, Result};

use gradeforge_core::model::CourseGrade;
use gradeforge_core::parser::{default_scale_file, parse_scale_file, ScaleFile};

/// Load a scale file from `path`, or the built-in five-point scale when no
/// path is given.
pub fn load_scale(path: Option<&Path>) -> Result<ScaleFile> {
    match path {
        Some(path) => parse_scale_file(path),
        None => Ok(default_scale_file()),
    }
}

/// Parse a comma-separated credit-unit list like "3,3,4,2".
pub fn parse_weights(input: &str) -> Result<Vec<u32>> {
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .with_context(|| format!("invalid credit units: '{}'", part.trim()))
        })
        .collect()
}

/// Parse a comma-separated course list like "3:A,3:B+,2:C".
pub fn parse_courses(input: &str) -> Result<Vec<CourseGrade>> {
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            let Some((units, letter)) = part.split_once(':') else {
                bail!("invalid course '{part}', expected units:letter (e.g. 3:A)");
            };
            let credit_units = units
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid credit units in course '{part}'"))?;
            Ok(CourseGrade {
                credit_units,
                letter: letter.trim().to_string(),
            })
        })
        .collect()
}
