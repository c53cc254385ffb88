//! The grade-combination search engine.
//!
//! Given per-course credit units and a target GPA, the simulator looks for
//! letter-grade assignments whose credit-weighted GPA lands in a tolerance
//! window around the target, preferring realistic mixes over all-A or all-F
//! patterns. The search runs a three-level constraint ladder (restricted
//! letters and tight windows first, loosening per level) and falls back to
//! constructive generation when enumeration finds nothing or blows the
//! combination budget.
//!
//! The engine is pure and synchronous: no shared state across calls, no I/O,
//! and the enumeration budget is a count check, never a timer.

use std::collections::HashSet;

use itertools::Itertools;

use crate::error::GradeError;
use crate::model::{to_hundredths, GradeCombination, GradeScale, SimulationRequest};
use crate::statistics::{high_grade_count, rank_candidates, weighted_variance, Candidate};

/// Slack for float comparisons. Returned GPAs never exceed the target by
/// more than this, in any mode.
const EPSILON: f64 = 1e-9;

/// Tuning knobs for the search engine.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Hard cap on the cross-product size of a ladder level (and of each
    /// letter subset in constructive generation). A level over budget is
    /// skipped entirely, never partially sampled.
    pub enumeration_budget: u64,
    /// Symmetric window applied at the all-letters emergency level.
    pub emergency_tolerance: f64,
    /// Absolute window accepted during constructive generation.
    pub fallback_tolerance: f64,
    /// Window for accepting a uniform base assignment in constructive mode.
    pub base_match_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enumeration_budget: 200_000,
            emergency_tolerance: 0.1,
            fallback_tolerance: 0.15,
            base_match_tolerance: 0.01,
        }
    }
}

/// The combination search engine. Holds the grade scale and tuning; all
/// per-request state lives on the stack of [`Simulator::search`].
pub struct Simulator {
    scale: GradeScale,
    config: SimulatorConfig,
}

impl Simulator {
    pub fn new(scale: GradeScale) -> Self {
        Self::with_config(scale, SimulatorConfig::default())
    }

    pub fn with_config(scale: GradeScale, config: SimulatorConfig) -> Self {
        Self { scale, config }
    }

    pub fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// Theoretical (min, max) weighted GPA over these weights, using the
    /// globally lowest and highest points in the scale.
    pub fn achievable_range(&self, weights: &[u32]) -> (f64, f64) {
        let total: f64 = weights.iter().map(|&w| f64::from(w)).sum();
        if total == 0.0 {
            return (0.0, 0.0);
        }
        let min = weights
            .iter()
            .map(|&w| f64::from(w) * self.scale.min_points())
            .sum::<f64>()
            / total;
        let max = weights
            .iter()
            .map(|&w| f64::from(w) * self.scale.max_points())
            .sum::<f64>()
            / total;
        (min, max)
    }

    /// Search for up to `max_results` grade combinations hitting the target.
    ///
    /// Returns an empty list (not an error) for zero courses, for targets
    /// outside the achievable range, and when every strategy comes up empty.
    /// Malformed input (length mismatch, zero credit unit, unknown letter in
    /// the override list) is an error.
    pub fn search(
        &self,
        request: &SimulationRequest,
    ) -> Result<Vec<GradeCombination>, GradeError> {
        if request.num_courses == 0 {
            return Ok(Vec::new());
        }
        if request.weights.len() != request.num_courses {
            return Err(GradeError::CreditUnitMismatch {
                expected: request.num_courses,
                actual: request.weights.len(),
            });
        }
        if let Some(position) = request.weights.iter().position(|&w| w == 0) {
            return Err(GradeError::NonPositiveCreditUnit { position });
        }

        let allowed_override = match &request.allowed_letters {
            Some(letters) => {
                let mut set = HashSet::new();
                for letter in letters {
                    set.insert(self.scale.lookup(letter)?);
                }
                Some(set)
            }
            None => None,
        };

        let (min_possible, max_possible) = self.achievable_range(&request.weights);
        if request.target_gpa < min_possible || request.target_gpa > max_possible {
            tracing::debug!(
                target = request.target_gpa,
                min = min_possible,
                max = max_possible,
                "target outside achievable range"
            );
            return Ok(Vec::new());
        }

        let total_cu: i64 = request.weights.iter().map(|&w| i64::from(w)).sum();
        let target_h = to_hundredths(request.target_gpa);
        let points_h: Vec<i64> = (0..self.scale.len())
            .map(|i| self.scale.points_hundredths(i))
            .collect();

        let mut pool = self.run_ladder(
            request,
            allowed_override.as_ref(),
            &points_h,
            total_cu,
            target_h,
        );
        if pool.is_empty() {
            tracing::debug!("constraint ladder exhausted, switching to constructive generation");
            pool = self.run_constructive(
                request,
                allowed_override.as_ref(),
                &points_h,
                total_cu,
                target_h,
            );
        }

        rank_candidates(&mut pool, request.target_gpa);
        pool.truncate(request.max_results);

        Ok(pool
            .into_iter()
            .map(|c| GradeCombination {
                grades: c
                    .grades
                    .iter()
                    .map(|&g| self.scale.letter(g).to_string())
                    .collect(),
                gpa: c.gpa(),
            })
            .collect())
    }

    /// The three-level constraint ladder. Stops at the first level that
    /// produces any candidate, even though that level's window is the
    /// tightest; this is the documented policy, not an accident.
    fn run_ladder(
        &self,
        request: &SimulationRequest,
        allowed_override: Option<&HashSet<usize>>,
        points_h: &[i64],
        total_cu: i64,
        target_h: i64,
    ) -> Vec<Candidate> {
        let n = self.scale.len();
        let worst = self.scale.worst();
        let best = self.scale.best();

        let mid_band: Vec<usize> = (0..n).filter(|&g| g != worst && g != best).collect();

        let mut levels: Vec<(Vec<usize>, f64, f64)> = Vec::new();
        levels.push((
            mid_band.clone(),
            request.tolerance_low,
            request.tolerance_high,
        ));
        if request.allow_best_if_needed {
            let mut with_best = mid_band;
            with_best.push(best);
            levels.push((
                with_best,
                request.tolerance_low * 2.0,
                request.tolerance_high * 2.0,
            ));
        }
        let everything: Vec<usize> = (0..n)
            .filter(|&g| request.allow_best_if_needed || g != best)
            .collect();
        levels.push((
            everything,
            self.config.emergency_tolerance,
            self.config.emergency_tolerance,
        ));

        // Shared across levels: a tuple enumerated once is never revisited,
        // even by a later level with a wider window.
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut candidates = Vec::new();

        for (level, (mut allowed, tol_low, tol_high)) in levels.into_iter().enumerate() {
            if request.exclude_worst {
                allowed.retain(|&g| g != worst);
            }
            if let Some(override_set) = allowed_override {
                allowed.retain(|g| override_set.contains(g));
            }
            if allowed.is_empty() {
                continue;
            }

            let combos = (allowed.len() as u64).checked_pow(request.num_courses as u32);
            match combos {
                Some(total) if total <= self.config.enumeration_budget => {}
                _ => {
                    tracing::warn!(
                        level,
                        letters = allowed.len(),
                        budget = self.config.enumeration_budget,
                        "level exceeds enumeration budget, skipping"
                    );
                    continue;
                }
            }

            for combo in (0..request.num_courses)
                .map(|_| allowed.iter().copied())
                .multi_cartesian_product()
            {
                if seen.contains(&combo) {
                    continue;
                }
                let gpa_h = gpa_hundredths(&combo, &request.weights, points_h, total_cu);
                let accepted = if request.exact_match {
                    gpa_h == target_h
                } else {
                    within_window(gpa_h, request.target_gpa, tol_low, tol_high)
                };
                if accepted {
                    candidates.push(self.score(combo.clone(), gpa_h, &request.weights));
                }
                seen.insert(combo);
            }

            if !candidates.is_empty() {
                tracing::debug!(level, count = candidates.len(), "ladder level produced candidates");
                break;
            }
        }

        candidates
    }

    /// Constructive generation: build assignments instead of enumerating the
    /// full space. First spread small sets of distinct letters across the
    /// positions, then upgrade a uniform base assignment at a few positions.
    fn run_constructive(
        &self,
        request: &SimulationRequest,
        allowed_override: Option<&HashSet<usize>>,
        points_h: &[i64],
        total_cu: i64,
        target_h: i64,
    ) -> Vec<Candidate> {
        let worst = self.scale.worst();
        let best = self.scale.best();
        let available: Vec<usize> = (0..self.scale.len())
            .filter(|&g| !(request.exclude_worst && g == worst))
            .filter(|&g| request.allow_best_if_needed || g != best)
            .filter(|&g| allowed_override.is_none_or(|set| set.contains(&g)))
            .collect();
        if available.is_empty() {
            return Vec::new();
        }

        // Fresh visited set on purpose: the ladder marks every enumerated
        // tuple as seen, rejected ones included, and constructive generation
        // must be able to revisit them under its wider window.
        let mut seen: HashSet<Vec<usize>> = HashSet::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let num = request.num_courses;

        let accept = |gpa_h: i64, window: f64| -> bool {
            if request.exact_match {
                gpa_h == target_h
            } else {
                let gpa = gpa_h as f64 / 100.0;
                (gpa - request.target_gpa).abs() < window
                    && gpa <= request.target_gpa + EPSILON
            }
        };

        // Mixed subsets: 2-4 distinct letters spread over the positions.
        for distinct in 2..=num.min(4) {
            match (distinct as u64).checked_pow(num as u32) {
                Some(total) if total <= self.config.enumeration_budget => {}
                _ => continue,
            }
            for subset in available.iter().copied().combinations(distinct) {
                for combo in (0..num)
                    .map(|_| subset.iter().copied())
                    .multi_cartesian_product()
                {
                    if seen.contains(&combo) {
                        continue;
                    }
                    let gpa_h = gpa_hundredths(&combo, &request.weights, points_h, total_cu);
                    if accept(gpa_h, self.config.fallback_tolerance) {
                        candidates.push(self.score(combo.clone(), gpa_h, &request.weights));
                    }
                    seen.insert(combo);
                }
            }
        }
        if !candidates.is_empty() {
            return candidates;
        }

        // Uniform base near the middle of the range, upgraded at 1-3
        // positions to equal-or-higher letters.
        let pool_target = request.max_results.saturating_mul(3);
        let middle = available.len() / 2;
        let start_lo = middle.saturating_sub(1);
        let start_hi = (middle + 1).min(available.len() - 1);

        'bases: for start in start_lo..=start_hi {
            let base = available[start];

            let base_combo = vec![base; num];
            if !seen.contains(&base_combo) {
                let gpa_h = gpa_hundredths(&base_combo, &request.weights, points_h, total_cu);
                if accept(gpa_h, self.config.base_match_tolerance) {
                    candidates.push(self.score(base_combo.clone(), gpa_h, &request.weights));
                }
                seen.insert(base_combo);
            }

            for upgrades in 1..num.min(4) {
                for positions in (0..num).combinations(upgrades) {
                    for letters in available[start..]
                        .iter()
                        .copied()
                        .combinations(upgrades.min(2))
                    {
                        for assignment in (0..upgrades)
                            .map(|_| letters.iter().copied())
                            .multi_cartesian_product()
                        {
                            let mut combo = vec![base; num];
                            for (&position, &grade) in positions.iter().zip(assignment.iter()) {
                                combo[position] = grade;
                            }
                            if seen.contains(&combo) {
                                continue;
                            }
                            let gpa_h =
                                gpa_hundredths(&combo, &request.weights, points_h, total_cu);
                            if accept(gpa_h, self.config.fallback_tolerance) {
                                candidates.push(self.score(combo.clone(), gpa_h, &request.weights));
                            }
                            seen.insert(combo);
                        }
                    }
                }
                if candidates.len() >= pool_target {
                    break 'bases;
                }
            }
        }

        candidates
    }

    fn score(&self, grades: Vec<usize>, gpa_h: i64, weights: &[u32]) -> Candidate {
        let values: Vec<f64> = grades.iter().map(|&g| self.scale.points(g)).collect();
        let diversity = weighted_variance(&values, weights);
        let high_grades = high_grade_count(&self.scale, &grades);
        Candidate {
            grades,
            gpa_hundredths: gpa_h,
            diversity,
            high_grades,
        }
    }
}

/// Credit-weighted GPA of an assignment in integer hundredths; the integer
/// division is the 2-decimal truncation.
fn gpa_hundredths(grades: &[usize], weights: &[u32], points_h: &[i64], total_cu: i64) -> i64 {
    let sum: i64 = grades
        .iter()
        .zip(weights)
        .map(|(&g, &w)| i64::from(w) * points_h[g])
        .sum();
    sum / total_cu
}

fn within_window(gpa_h: i64, target: f64, tol_low: f64, tol_high: f64) -> bool {
    let gpa = gpa_h as f64 / 100.0;
    gpa <= target + EPSILON
        && gpa >= target - tol_low - EPSILON
        && gpa <= target + tol_high + EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn simulator() -> Simulator {
        Simulator::new(GradeScale::five_point())
    }

    fn request(weights: Vec<u32>, target: f64) -> SimulationRequest {
        SimulationRequest::new(weights, target)
    }

    #[test]
    fn zero_courses_yield_empty() {
        let results = simulator().search(&request(vec![], 4.0)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn weight_mismatch_is_an_error() {
        let mut req = request(vec![3, 3], 4.0);
        req.num_courses = 3;
        assert!(matches!(
            simulator().search(&req),
            Err(GradeError::CreditUnitMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn zero_weight_is_an_error() {
        let req = request(vec![3, 0, 3], 4.0);
        assert!(matches!(
            simulator().search(&req),
            Err(GradeError::NonPositiveCreditUnit { position: 1 })
        ));
    }

    #[test]
    fn unknown_override_letter_is_an_error() {
        let mut req = request(vec![3, 3], 3.5);
        req.allowed_letters = Some(vec!["B".into(), "Z".into()]);
        assert!(matches!(
            simulator().search(&req),
            Err(GradeError::UnknownGrade(_))
        ));
    }

    #[test]
    fn infeasible_targets_yield_empty() {
        let sim = simulator();
        assert!(sim.search(&request(vec![3, 3], 5.5)).unwrap().is_empty());
        assert!(sim.search(&request(vec![3, 3], -0.5)).unwrap().is_empty());
    }

    #[test]
    fn achievable_range_spans_scale() {
        let (min, max) = simulator().achievable_range(&[3, 4, 2]);
        assert_eq!(min, 0.0);
        assert_eq!(max, 5.0);
    }

    #[test]
    fn hits_target_without_worst_grade() {
        let results = simulator().search(&request(vec![3, 3, 3], 4.0)).unwrap();
        assert!(!results.is_empty());
        for combo in &results {
            assert!(combo.gpa <= 4.0 + 1e-9, "gpa {} exceeds target", combo.gpa);
            assert!((combo.gpa - 4.0).abs() < 1e-9);
            assert!(!combo.grades.iter().any(|g| g == "F"));
        }
    }

    #[test]
    fn results_never_exceed_target() {
        // 3.90 is unreachable exactly with equal weights, so the search ends
        // in constructive generation; everything returned stays at or below
        // the target.
        let results = simulator().search(&request(vec![3, 3, 3], 3.9)).unwrap();
        assert!(!results.is_empty());
        for combo in &results {
            assert!(combo.gpa <= 3.9 + 1e-9, "gpa {} exceeds target", combo.gpa);
        }
    }

    #[test]
    fn ladder_stops_at_first_productive_level() {
        // A wide lower tolerance makes level 0 productive, so the best grade
        // never appears even though level 1 would also match.
        let mut req = request(vec![3, 3, 3], 4.0);
        req.tolerance_low = 2.0;
        let results = simulator().search(&req).unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|c| !c.grades.iter().any(|g| g == "A")));
    }

    #[test]
    fn best_grade_added_when_needed() {
        let sim = simulator();

        let results = sim.search(&request(vec![3], 5.0)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].grades, vec!["A".to_string()]);
        assert_eq!(results[0].gpa, 5.0);

        let mut req = request(vec![3], 5.0);
        req.allow_best_if_needed = false;
        assert!(sim.search(&req).unwrap().is_empty());
    }

    #[test]
    fn override_restricts_letters() {
        let mut req = request(vec![3, 3], 3.5);
        req.allowed_letters = Some(vec!["B".into(), "C".into()]);
        let results = simulator().search(&req).unwrap();
        assert!(!results.is_empty());
        for combo in &results {
            assert!((combo.gpa - 3.5).abs() < 1e-9);
            for grade in &combo.grades {
                assert!(grade == "B" || grade == "C");
            }
        }
    }

    #[test]
    fn exact_match_truncates_to_target() {
        let mut req = request(vec![3, 3, 3, 3, 4, 4, 4], 4.29);
        req.exact_match = true;
        req.max_results = 50;
        let results = simulator().search(&req).unwrap();
        assert!(!results.is_empty());
        assert!(results.len() <= 50);
        for combo in &results {
            assert_eq!((combo.gpa * 100.0).round() as i64, 429);
        }
    }

    #[test]
    fn no_duplicate_assignments() {
        let mut req = request(vec![3, 3, 3, 3, 4, 4, 4], 4.29);
        req.exact_match = true;
        req.max_results = 50;
        let results = simulator().search(&req).unwrap();
        let unique: HashSet<Vec<String>> =
            results.iter().map(|c| c.grades.clone()).collect();
        assert_eq!(unique.len(), results.len());
    }

    #[test]
    fn respects_max_results() {
        let mut req = request(vec![3, 3, 3], 4.0);
        req.max_results = 2;
        let results = simulator().search(&req).unwrap();
        assert!(results.len() <= 2);
    }

    #[test]
    fn search_is_deterministic() {
        let req = request(vec![3, 3, 4, 2], 3.75);
        let first = simulator().search(&req).unwrap();
        let second = simulator().search(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_target_needs_worst_grade() {
        let sim = simulator();

        // Only F scores 0.0; with the worst grade excluded there is no way
        // to land on a 0.0 target.
        let results = sim.search(&request(vec![1], 0.0)).unwrap();
        assert!(results.is_empty());

        let mut req = request(vec![1], 0.0);
        req.exclude_worst = false;
        let results = sim.search(&req).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].grades, vec!["F".to_string()]);
        assert_eq!(results[0].gpa, 0.0);
    }

    #[test]
    fn budget_overflow_falls_back_to_construction() {
        let config = SimulatorConfig {
            enumeration_budget: 10,
            ..SimulatorConfig::default()
        };
        let sim = Simulator::with_config(GradeScale::five_point(), config);
        let results = sim.search(&request(vec![3, 3, 3], 4.0)).unwrap();
        assert!(!results.is_empty());
        for combo in &results {
            assert!(combo.gpa <= 4.0 + 1e-9);
            assert!(!combo.grades.iter().any(|g| g == "F"));
        }
    }

    #[test]
    fn ranking_prefers_diverse_combinations() {
        let results = simulator().search(&request(vec![3, 3, 3], 4.0)).unwrap();
        assert!(results.len() > 1);
        // The uniform all-B assignment hits the target but ranks below the
        // mixed ones carrying the same GPA.
        let uniform_position = results
            .iter()
            .position(|c| c.grades.iter().all(|g| g == "B"));
        if let Some(position) = uniform_position {
            assert!(position > 0);
        }
    }
}
