//! The `classify` subcommand: degree classification for a CGPA.

use std::path::PathBuf;

use anyhow::Result;

use gradeforge_core::gpa::classify;

use super::load_scale;

pub fn execute(cgpa: f64, scale: Option<PathBuf>) -> Result<()> {
    let file = load_scale(scale.as_deref())?;

    match classify(cgpa, &file.classes) {
        Some(class) => println!(
            "CGPA {cgpa:.2}: {} ({:.2} - {:.2})",
            class.name, class.min, class.max
        ),
        None => println!("CGPA {cgpa:.2} falls outside every classification band."),
    }
    Ok(())
}
