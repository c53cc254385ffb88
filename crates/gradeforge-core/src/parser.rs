//! TOML grade-scale parser.
//!
//! Loads grade scales and degree classifications from TOML files and
//! validates them. Structural problems are errors; questionable-but-usable
//! definitions come back as warnings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{DegreeClass, GradeScale, GradeStep};

/// Intermediate TOML structure for parsing scale files.
#[derive(Debug, Deserialize)]
struct TomlScaleFile {
    scale: TomlScaleHeader,
    #[serde(default)]
    grades: Vec<TomlGrade>,
    #[serde(default)]
    classes: Vec<TomlClass>,
}

#[derive(Debug, Deserialize)]
struct TomlScaleHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlGrade {
    letter: String,
    points: f64,
}

#[derive(Debug, Deserialize)]
struct TomlClass {
    name: String,
    min: f64,
    max: f64,
}

/// A parsed scale file: the grade scale plus its degree classification bands.
#[derive(Debug, Clone)]
pub struct ScaleFile {
    pub scale: GradeScale,
    pub description: String,
    pub classes: Vec<DegreeClass>,
}

/// The compiled-in default: the five-point scale and its degree classes.
pub fn default_scale_file() -> ScaleFile {
    ScaleFile {
        scale: GradeScale::five_point(),
        description: "Built-in five-point grading scale".to_string(),
        classes: crate::model::default_degree_classes(),
    }
}

/// Parse a single TOML file into a [`ScaleFile`].
pub fn parse_scale_file(path: &Path) -> Result<ScaleFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scale file: {}", path.display()))?;

    parse_scale_str(&content, path)
}

/// Parse a TOML string into a [`ScaleFile`] (useful for testing).
pub fn parse_scale_str(content: &str, source_path: &Path) -> Result<ScaleFile> {
    let parsed: TomlScaleFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let steps = parsed
        .grades
        .into_iter()
        .map(|g| GradeStep {
            letter: g.letter,
            points: g.points,
        })
        .collect();

    let scale = GradeScale::new(parsed.scale.name, steps)
        .with_context(|| format!("invalid grade scale: {}", source_path.display()))?;

    let classes = parsed
        .classes
        .into_iter()
        .map(|c| DegreeClass {
            name: c.name,
            min: c.min,
            max: c.max,
        })
        .collect();

    Ok(ScaleFile {
        scale,
        description: parsed.scale.description,
        classes,
    })
}

/// A warning from scale validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The grade letter or class name the warning refers to, if any.
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a scale file for common issues.
pub fn validate_scale_file(file: &ScaleFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let scale = &file.scale;

    if scale.len() > 8 {
        warnings.push(ValidationWarning {
            subject: None,
            message: format!("unusually large scale ({} letters)", scale.len()),
        });
    }

    if scale.min_points() > 0.0 {
        warnings.push(ValidationWarning {
            subject: Some(scale.letter(scale.worst()).to_string()),
            message: "scale has no zero-point letter; a 0.0 GPA is unreachable".into(),
        });
    }

    if file.classes.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "no degree classes defined; classification will be unavailable".into(),
        });
    }

    for class in &file.classes {
        if class.min > class.max {
            warnings.push(ValidationWarning {
                subject: Some(class.name.clone()),
                message: format!("inverted range: min {} > max {}", class.min, class.max),
            });
        }
        if class.max > scale.max_points() || class.min < scale.min_points() {
            warnings.push(ValidationWarning {
                subject: Some(class.name.clone()),
                message: "class range extends beyond the grade scale".into(),
            });
        }
    }

    for pair in file.classes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let overlaps = a.min <= b.max && b.min <= a.max;
        if overlaps {
            warnings.push(ValidationWarning {
                subject: Some(b.name.clone()),
                message: format!("range overlaps with '{}'", a.name),
            });
        }
    }

    warnings
}
