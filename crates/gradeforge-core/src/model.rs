//! Core data model types for gradeforge.
//!
//! A [`GradeScale`] is an ordered letter-to-points mapping; everything else in
//! the crate works with indices into it. Grade points are carried both as
//! `f64` and as integer hundredths so that 2-decimal truncation is exact
//! integer division rather than binary-float rounding.

use serde::{Deserialize, Serialize};

use crate::error::GradeError;

/// Convert a value to integer hundredths, rounding to the nearest hundredth
/// (ties away from zero). Targets and stored CGPAs are 2-decimal values, so
/// this is the lossless bridge into the exact integer domain.
pub fn to_hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// One step of a grade scale: a letter and its grade-point value.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeStep {
    /// Normalized letter symbol (e.g. "B+").
    pub letter: String,
    /// Grade-point value (e.g. 4.5).
    pub points: f64,
}

/// An ordered mapping from letter grades to grade-point values.
///
/// Steps are stored sorted ascending by points, so index 0 is always the
/// worst grade and the last index the best.
#[derive(Debug, Clone)]
pub struct GradeScale {
    name: String,
    steps: Vec<GradeStep>,
}

impl GradeScale {
    /// Build a scale from raw steps, validating and sorting them.
    pub fn new(name: impl Into<String>, steps: Vec<GradeStep>) -> Result<Self, GradeError> {
        if steps.is_empty() {
            return Err(GradeError::EmptyScale);
        }

        let mut normalized: Vec<GradeStep> = Vec::with_capacity(steps.len());
        for step in steps {
            let letter = normalize_letter(&step.letter);
            if letter.is_empty() {
                return Err(GradeError::UnknownGrade(step.letter));
            }
            if !step.points.is_finite() || step.points < 0.0 {
                return Err(GradeError::InvalidPoints {
                    letter,
                    points: step.points,
                });
            }
            if normalized.iter().any(|s| s.letter == letter) {
                return Err(GradeError::DuplicateLetter(letter));
            }
            normalized.push(GradeStep {
                letter,
                points: step.points,
            });
        }

        normalized.sort_by(|a, b| a.points.total_cmp(&b.points));

        Ok(Self {
            name: name.into(),
            steps: normalized,
        })
    }

    /// The standard Nigerian five-point scale.
    pub fn five_point() -> Self {
        let steps = [
            ("A", 5.0),
            ("B+", 4.5),
            ("B", 4.0),
            ("C+", 3.5),
            ("C", 3.0),
            ("D+", 2.5),
            ("D", 2.0),
            ("F", 0.0),
        ];
        Self::new(
            "five-point",
            steps
                .iter()
                .map(|(letter, points)| GradeStep {
                    letter: (*letter).to_string(),
                    points: *points,
                })
                .collect(),
        )
        .expect("built-in scale is valid")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps sorted ascending by points.
    pub fn steps(&self) -> &[GradeStep] {
        &self.steps
    }

    pub fn letter(&self, index: usize) -> &str {
        &self.steps[index].letter
    }

    pub fn points(&self, index: usize) -> f64 {
        self.steps[index].points
    }

    /// Grade points at `index` in integer hundredths.
    pub fn points_hundredths(&self, index: usize) -> i64 {
        to_hundredths(self.steps[index].points)
    }

    /// Index of the worst (lowest-point) grade.
    pub fn worst(&self) -> usize {
        0
    }

    /// Index of the best (highest-point) grade.
    pub fn best(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn min_points(&self) -> f64 {
        self.steps[0].points
    }

    pub fn max_points(&self) -> f64 {
        self.steps[self.steps.len() - 1].points
    }

    /// Resolve a letter (case-insensitive, surrounding whitespace ignored)
    /// to its index in the scale.
    pub fn lookup(&self, letter: &str) -> Result<usize, GradeError> {
        let normalized = normalize_letter(letter);
        self.steps
            .iter()
            .position(|s| s.letter == normalized)
            .ok_or_else(|| GradeError::UnknownGrade(letter.to_string()))
    }
}

fn normalize_letter(letter: &str) -> String {
    letter.trim().to_uppercase()
}

/// One course as the GPA metrics see it: a credit-unit weight and a letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseGrade {
    pub credit_units: u32,
    pub letter: String,
}

/// A request for the combination search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Declared course count; must match `weights.len()`.
    pub num_courses: usize,
    /// Per-course credit units, positive.
    pub weights: Vec<u32>,
    /// The GPA to aim for.
    pub target_gpa: f64,
    /// Allowed deviation below target at the tightest ladder level.
    #[serde(default)]
    pub tolerance_low: f64,
    /// Allowed deviation above target at the tightest ladder level.
    #[serde(default = "default_tolerance_high")]
    pub tolerance_high: f64,
    /// Cap on returned combinations.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Restrict the search to these letters (validated against the scale).
    #[serde(default)]
    pub allowed_letters: Option<Vec<String>>,
    /// Permit the top grade once the realistic band comes up empty.
    #[serde(default = "default_true")]
    pub allow_best_if_needed: bool,
    /// Keep the worst grade out of every combination.
    #[serde(default = "default_true")]
    pub exclude_worst: bool,
    /// Only accept combinations whose truncated GPA equals the target.
    #[serde(default)]
    pub exact_match: bool,
}

impl SimulationRequest {
    /// A request with the default tolerances and flags.
    pub fn new(weights: Vec<u32>, target_gpa: f64) -> Self {
        Self {
            num_courses: weights.len(),
            weights,
            target_gpa,
            tolerance_low: 0.0,
            tolerance_high: default_tolerance_high(),
            max_results: default_max_results(),
            allowed_letters: None,
            allow_best_if_needed: true,
            exclude_worst: true,
            exact_match: false,
        }
    }
}

fn default_tolerance_high() -> f64 {
    0.4
}

fn default_max_results() -> usize {
    30
}

fn default_true() -> bool {
    true
}

/// One search result: a letter per course position and the weighted GPA,
/// truncated to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCombination {
    pub grades: Vec<String>,
    pub gpa: f64,
}

/// A named CGPA band used for degree classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeClass {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

/// Degree classification bands matching the five-point scale.
pub fn default_degree_classes() -> Vec<DegreeClass> {
    [
        ("First Class", 4.40, 5.00),
        ("Second Class Upper", 3.60, 4.39),
        ("Second Class Lower", 2.80, 3.59),
        ("Third Class", 2.00, 2.79),
    ]
    .iter()
    .map(|(name, min, max)| DegreeClass {
        name: (*name).to_string(),
        min: *min,
        max: *max,
    })
    .collect()
}
