//! Numeric reductions used to score and rank candidate combinations.

use crate::model::GradeScale;

/// Credit-weighted mean of grade-point values.
pub fn weighted_mean(values: &[f64], weights: &[u32]) -> f64 {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return 0.0;
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, &w)| v * f64::from(w))
        .sum::<f64>()
        / total as f64
}

/// Credit-weighted variance of grade-point values. Higher means a more
/// diverse (less uniform) grade distribution.
pub fn weighted_variance(values: &[f64], weights: &[u32]) -> f64 {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return 0.0;
    }
    let mean = weighted_mean(values, weights);
    values
        .iter()
        .zip(weights)
        .map(|(v, &w)| f64::from(w) * (v - mean) * (v - mean))
        .sum::<f64>()
        / total as f64
}

/// Count positions holding a "high" grade: points at or above 80% of the
/// scale maximum (B and up on the default five-point scale).
pub fn high_grade_count(scale: &GradeScale, grades: &[usize]) -> usize {
    let max_h = scale.points_hundredths(scale.best());
    grades
        .iter()
        .filter(|&&g| scale.points_hundredths(g) * 5 >= max_h * 4)
        .count()
}

/// A scored candidate produced by the enumerator, before ranking strips the
/// internal fields.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    /// Indices into the scale, one per course position.
    pub grades: Vec<usize>,
    /// Weighted GPA in integer hundredths (already truncated).
    pub gpa_hundredths: i64,
    /// Credit-weighted grade-point variance.
    pub diversity: f64,
    /// Count of high grades used.
    pub high_grades: usize,
}

impl Candidate {
    pub fn gpa(&self) -> f64 {
        self.gpa_hundredths as f64 / 100.0
    }
}

/// Order candidates: closest to target first, then most diverse, then fewest
/// high grades. The sort is stable, so enumeration order breaks ties and the
/// overall ranking stays deterministic.
pub(crate) fn rank_candidates(pool: &mut [Candidate], target_gpa: f64) {
    pool.sort_by(|a, b| {
        let da = (target_gpa - a.gpa()).abs();
        let db = (target_gpa - b.gpa()).abs();
        da.total_cmp(&db)
            .then_with(|| b.diversity.total_cmp(&a.diversity))
            .then_with(|| a.high_grades.cmp(&b.high_grades))
    });
}
