//! The `simulate` subcommand: search for grade combinations.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use uuid::Uuid;

use gradeforge_core::model::SimulationRequest;
use gradeforge_core::report::SimulationReport;
use gradeforge_core::simulator::Simulator;

use super::{load_scale, parse_weights};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    weights: String,
    target: f64,
    tolerance_low: f64,
    tolerance_high: f64,
    max_results: usize,
    letters: Option<String>,
    no_best: bool,
    include_worst: bool,
    exact: bool,
    scale: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let weights = parse_weights(&weights)?;
    let file = load_scale(scale.as_deref())?;

    let request = SimulationRequest {
        num_courses: weights.len(),
        weights,
        target_gpa: target,
        tolerance_low,
        tolerance_high,
        max_results,
        allowed_letters: letters
            .map(|list| list.split(',').map(|l| l.trim().to_string()).collect()),
        allow_best_if_needed: !no_best,
        exclude_worst: !include_worst,
        exact_match: exact,
    };

    let simulator = Simulator::new(file.scale.clone());
    let (min_gpa, max_gpa) = simulator.achievable_range(&request.weights);

    let start = Instant::now();
    let results = simulator
        .search(&request)
        .context("simulation request rejected")?;
    let duration = start.elapsed();
    tracing::debug!(
        duration_ms = duration.as_millis() as u64,
        results = results.len(),
        "search finished"
    );

    println!(
        "Scale: {} | Target GPA: {:.2} | Courses: {}",
        file.scale.name(),
        request.target_gpa,
        request.num_courses
    );
    println!(
        "Achievable GPA range for these credit units: {min_gpa:.2} - {max_gpa:.2}"
    );

    if results.is_empty() {
        println!("No combinations found for target {:.2}.", request.target_gpa);
        println!("Hint: try adjusting the tolerances, the allowed letters, or the target.");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Grades", "GPA"]);
        for (i, combo) in results.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(combo.grades.join(", ")),
                Cell::new(format!("{:.2}", combo.gpa)),
            ]);
        }
        println!("{table}");
        println!("{} combination(s) found.", results.len());
    }

    if let Some(path) = output {
        let report = SimulationReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            scale: file.scale.name().to_string(),
            request,
            achievable_min: min_gpa,
            achievable_max: max_gpa,
            results,
            duration_ms: duration.as_millis() as u64,
        };
        report.save_json(&path)?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}
