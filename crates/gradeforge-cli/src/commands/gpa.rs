//! The `gpa` subcommand: term GPA from course letters.

use std::path::PathBuf;

use anyhow::Result;

use gradeforge_core::gpa::compute_gpa;

use super::{load_scale, parse_courses};

pub fn execute(courses: String, scale: Option<PathBuf>) -> Result<()> {
    let courses = parse_courses(&courses)?;
    let file = load_scale(scale.as_deref())?;

    let gpa = compute_gpa(&file.scale, &courses)?;
    let total_units: u32 = courses.iter().map(|c| c.credit_units).sum();

    println!(
        "GPA: {gpa:.2} ({} course(s), {total_units} credit units, scale: {})",
        courses.len(),
        file.scale.name()
    );
    Ok(())
}
