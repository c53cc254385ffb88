//! The `required-gpa` subcommand: GPA needed next semester for a target CGPA.

use std::path::PathBuf;

use anyhow::Result;

use gradeforge_core::gpa::required_gpa_for_target;

use super::load_scale;

pub fn execute(
    old_cgpa: f64,
    old_cu: u32,
    new_cu: u32,
    target: f64,
    scale: Option<PathBuf>,
) -> Result<()> {
    let file = load_scale(scale.as_deref())?;
    let required = required_gpa_for_target(old_cgpa, old_cu, new_cu, target)?;

    println!("Required GPA: {required:.2}");

    if required > file.scale.max_points() {
        println!(
            "Target {target:.2} is out of reach next semester: the scale tops out at {:.2}.",
            file.scale.max_points()
        );
    } else if required < file.scale.min_points() {
        println!(
            "Any semester GPA of {:.2} or above keeps you at or beyond target {target:.2}.",
            file.scale.min_points()
        );
    }
    Ok(())
}
