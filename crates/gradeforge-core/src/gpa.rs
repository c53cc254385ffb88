//! Credit-weighted GPA and CGPA metrics.
//!
//! All arithmetic runs in integer hundredths so 2-decimal truncation is exact
//! integer division. Note the asymmetry: term GPA is rounded, while CGPA
//! updates and required-GPA projections are truncated toward zero, the way
//! registrars compute them.

use crate::error::GradeError;
use crate::model::{to_hundredths, CourseGrade, DegreeClass, GradeScale};

/// Compute a term GPA from (credit unit, letter) pairs, rounded to 2 decimal
/// places. An empty course list yields 0.0.
pub fn compute_gpa(scale: &GradeScale, courses: &[CourseGrade]) -> Result<f64, GradeError> {
    if courses.is_empty() {
        return Ok(0.0);
    }

    let mut total_points_h: i64 = 0;
    let mut total_cu: i64 = 0;
    for (position, course) in courses.iter().enumerate() {
        if course.credit_units == 0 {
            return Err(GradeError::NonPositiveCreditUnit { position });
        }
        let index = scale.lookup(&course.letter)?;
        total_points_h += i64::from(course.credit_units) * scale.points_hundredths(index);
        total_cu += i64::from(course.credit_units);
    }

    let raw_hundredths = total_points_h as f64 / total_cu as f64;
    Ok(raw_hundredths.round() / 100.0)
}

/// Merge a new semester into a running CGPA, truncated to 2 decimal places.
pub fn update_cgpa(
    old_cgpa: f64,
    old_total_cu: u32,
    new_gpa: f64,
    new_cu: u32,
) -> Result<f64, GradeError> {
    if new_cu == 0 {
        return Err(GradeError::NoNewCreditUnits);
    }
    let numerator_h = to_hundredths(old_cgpa) * i64::from(old_total_cu)
        + to_hundredths(new_gpa) * i64::from(new_cu);
    let combined_h = numerator_h / i64::from(old_total_cu + new_cu);
    Ok(combined_h as f64 / 100.0)
}

/// The semester GPA needed to land exactly on `target_cgpa`, truncated toward
/// zero. May be negative or exceed the scale maximum; reachability is the
/// caller's call.
pub fn required_gpa_for_target(
    old_cgpa: f64,
    old_total_cu: u32,
    new_cu: u32,
    target_cgpa: f64,
) -> Result<f64, GradeError> {
    if new_cu == 0 {
        return Err(GradeError::NoNewCreditUnits);
    }
    let numerator_h = to_hundredths(target_cgpa) * i64::from(old_total_cu + new_cu)
        - to_hundredths(old_cgpa) * i64::from(old_total_cu);
    // i64 division truncates toward zero, matching decimal ROUND_DOWN for
    // the negative case as well.
    let required_h = numerator_h / i64::from(new_cu);
    Ok(required_h as f64 / 100.0)
}

/// Find the degree class whose band contains `cgpa`. Boundaries compare in
/// hundredths, so 4.40 lands in a band starting at 4.40.
pub fn classify(cgpa: f64, classes: &[DegreeClass]) -> Option<&DegreeClass> {
    let cgpa_h = to_hundredths(cgpa);
    classes
        .iter()
        .find(|c| to_hundredths(c.min) <= cgpa_h && cgpa_h <= to_hundredths(c.max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_degree_classes;

    fn course(cu: u32, letter: &str) -> CourseGrade {
        CourseGrade {
            credit_units: cu,
            letter: letter.into(),
        }
    }

    #[test]
    fn compute_gpa_weighted() {
        let scale = GradeScale::five_point();
        let courses = vec![course(3, "A"), course(3, "B"), course(3, "C")];
        assert_eq!(compute_gpa(&scale, &courses).unwrap(), 4.0);

        let courses = vec![course(3, "A"), course(3, "B+")];
        assert_eq!(compute_gpa(&scale, &courses).unwrap(), 4.75);
    }

    #[test]
    fn compute_gpa_empty_is_zero() {
        let scale = GradeScale::five_point();
        assert_eq!(compute_gpa(&scale, &[]).unwrap(), 0.0);
    }

    #[test]
    fn compute_gpa_rejects_bad_input() {
        let scale = GradeScale::five_point();
        assert!(matches!(
            compute_gpa(&scale, &[course(0, "A")]),
            Err(GradeError::NonPositiveCreditUnit { position: 0 })
        ));
        assert!(matches!(
            compute_gpa(&scale, &[course(3, "Z")]),
            Err(GradeError::UnknownGrade(_))
        ));
    }

    #[test]
    fn compute_gpa_accepts_lowercase_letters() {
        let scale = GradeScale::five_point();
        let courses = vec![course(2, "a"), course(2, " b ")];
        assert_eq!(compute_gpa(&scale, &courses).unwrap(), 4.5);
    }

    #[test]
    fn update_cgpa_truncates() {
        // (3.50 * 30 + 4.00 * 15) / 45 = 3.6666... -> 3.66, not 3.67
        assert_eq!(update_cgpa(3.50, 30, 4.00, 15).unwrap(), 3.66);
    }

    #[test]
    fn update_cgpa_from_zero_history() {
        assert_eq!(update_cgpa(0.0, 0, 4.25, 18).unwrap(), 4.25);
    }

    #[test]
    fn update_cgpa_rejects_zero_new_units() {
        assert!(matches!(
            update_cgpa(3.0, 30, 4.0, 0),
            Err(GradeError::NoNewCreditUnits)
        ));
    }

    #[test]
    fn required_gpa_truncates() {
        // (3.50 * 84 - 3.00 * 60) / 24 = 4.75 exactly
        assert_eq!(required_gpa_for_target(3.00, 60, 24, 3.50).unwrap(), 4.75);
        // (3.80 * 90 - 3.70 * 60) / 30 = 4.0
        assert_eq!(required_gpa_for_target(3.70, 60, 30, 3.80).unwrap(), 4.0);
    }

    #[test]
    fn required_gpa_can_be_negative() {
        // Dropping from 4.50 over 100 units to 2.00 overall needs a deeply
        // negative semester; truncation is toward zero.
        let required = required_gpa_for_target(4.50, 100, 10, 2.00).unwrap();
        assert_eq!(required, -23.0);
    }

    #[test]
    fn required_gpa_can_exceed_scale() {
        let required = required_gpa_for_target(2.00, 90, 10, 2.50).unwrap();
        assert!(required > 5.0);
    }

    #[test]
    fn classify_boundaries() {
        let classes = default_degree_classes();
        assert_eq!(classify(4.40, &classes).unwrap().name, "First Class");
        assert_eq!(
            classify(4.39, &classes).unwrap().name,
            "Second Class Upper"
        );
        assert_eq!(classify(2.00, &classes).unwrap().name, "Third Class");
        assert!(classify(1.99, &classes).is_none());
    }
}
