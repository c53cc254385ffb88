//! The `init` subcommand: write a starter scale file.

use std::path::Path;

use anyhow::{bail, Context, Result};

const SCALE_FILE: &str = "gradeforge-scale.toml";

const STARTER_SCALE: &str = r#"[scale]
name = "five-point"
description = "Standard five-point grading scale"

[[grades]]
letter = "A"
points = 5.0

[[grades]]
letter = "B+"
points = 4.5

[[grades]]
letter = "B"
points = 4.0

[[grades]]
letter = "C+"
points = 3.5

[[grades]]
letter = "C"
points = 3.0

[[grades]]
letter = "D+"
points = 2.5

[[grades]]
letter = "D"
points = 2.0

[[grades]]
letter = "F"
points = 0.0

[[classes]]
name = "First Class"
min = 4.40
max = 5.00

[[classes]]
name = "Second Class Upper"
min = 3.60
max = 4.39

[[classes]]
name = "Second Class Lower"
min = 2.80
max = 3.59

[[classes]]
name = "Third Class"
min = 2.00
max = 2.79
"#;

pub fn execute() -> Result<()> {
    let path = Path::new(SCALE_FILE);
    if path.exists() {
        bail!("{SCALE_FILE} already exists, refusing to overwrite");
    }

    std::fs::write(path, STARTER_SCALE)
        .with_context(|| format!("failed to write {SCALE_FILE}"))?;
    println!("Created {SCALE_FILE}. Pass it to other commands with --scale.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use gradeforge_core::parser::{parse_scale_str, validate_scale_file};

    #[test]
    fn starter_scale_parses_clean() {
        let file = parse_scale_str(STARTER_SCALE, &PathBuf::from(SCALE_FILE)).unwrap();
        assert_eq!(file.scale.len(), 8);
        assert_eq!(file.classes.len(), 4);
        assert!(validate_scale_file(&file).is_empty());
    }
}
