//! The `validate` subcommand: check a scale file for problems.

use std::path::PathBuf;

use anyhow::Result;

use gradeforge_core::parser::{parse_scale_file, validate_scale_file};

pub fn execute(scale: PathBuf) -> Result<()> {
    let file = parse_scale_file(&scale)?;
    let warnings = validate_scale_file(&file);

    println!(
        "Scale '{}': {} grade(s), {} degree class(es)",
        file.scale.name(),
        file.scale.len(),
        file.classes.len()
    );

    if warnings.is_empty() {
        println!("Scale is valid.");
    } else {
        for warning in &warnings {
            match &warning.subject {
                Some(subject) => println!("WARNING [{subject}]: {}", warning.message),
                None => println!("WARNING: {}", warning.message),
            }
        }
        println!("{} warning(s).", warnings.len());
    }
    Ok(())
}
