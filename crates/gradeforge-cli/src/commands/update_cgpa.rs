//! The `update-cgpa` subcommand: fold a semester GPA into a CGPA.

use anyhow::Result;

use gradeforge_core::gpa::update_cgpa;

pub fn execute(old_cgpa: f64, old_cu: u32, new_gpa: f64, new_cu: u32) -> Result<()> {
    let cgpa = update_cgpa(old_cgpa, old_cu, new_gpa, new_cu)?;
    println!(
        "New CGPA: {cgpa:.2} (over {} total credit units)",
        old_cu + new_cu
    );
    Ok(())
}
