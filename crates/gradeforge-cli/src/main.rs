//! gradeforge command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradeforge",
    version,
    about = "GPA/CGPA calculator and grade-combination simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for grade combinations hitting a target GPA
    Simulate {
        /// Per-course credit units, comma-separated (e.g. "3,3,4,2")
        #[arg(long)]
        weights: String,

        /// Target GPA
        #[arg(long)]
        target: f64,

        /// Allowed deviation below target at the tightest level
        #[arg(long, default_value = "0.0")]
        tolerance_low: f64,

        /// Allowed deviation above target at the tightest level
        #[arg(long, default_value = "0.4")]
        tolerance_high: f64,

        /// Maximum combinations to return
        #[arg(long, default_value = "30")]
        max_results: usize,

        /// Restrict the search to these letters (comma-separated)
        #[arg(long)]
        letters: Option<String>,

        /// Never introduce the top grade, even when nothing else matches
        #[arg(long)]
        no_best: bool,

        /// Allow the worst grade in combinations
        #[arg(long)]
        include_worst: bool,

        /// Only accept combinations whose truncated GPA equals the target
        #[arg(long)]
        exact: bool,

        /// Grade scale TOML file (built-in five-point scale if omitted)
        #[arg(long)]
        scale: Option<PathBuf>,

        /// Write a JSON simulation report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute a term GPA from credit-unit:letter pairs
    Gpa {
        /// Courses as cu:letter pairs, comma-separated (e.g. "3:A,3:B+,2:C")
        #[arg(long)]
        courses: String,

        /// Grade scale TOML file
        #[arg(long)]
        scale: Option<PathBuf>,
    },

    /// Merge a new semester GPA into a running CGPA
    UpdateCgpa {
        /// CGPA before this semester
        #[arg(long)]
        old_cgpa: f64,

        /// Total credit units before this semester
        #[arg(long)]
        old_cu: u32,

        /// GPA of the new semester
        #[arg(long)]
        new_gpa: f64,

        /// Credit units of the new semester
        #[arg(long)]
        new_cu: u32,
    },

    /// Semester GPA needed to reach a target CGPA
    RequiredGpa {
        /// Current CGPA
        #[arg(long)]
        old_cgpa: f64,

        /// Total credit units so far
        #[arg(long)]
        old_cu: u32,

        /// Credit units of the upcoming semester
        #[arg(long)]
        new_cu: u32,

        /// Target CGPA
        #[arg(long)]
        target: f64,

        /// Grade scale TOML file
        #[arg(long)]
        scale: Option<PathBuf>,
    },

    /// Degree classification for a CGPA
    Classify {
        /// CGPA to classify
        #[arg(long)]
        cgpa: f64,

        /// Grade scale TOML file
        #[arg(long)]
        scale: Option<PathBuf>,
    },

    /// Validate a grade scale TOML file
    Validate {
        /// Path to the scale file
        #[arg(long)]
        scale: PathBuf,
    },

    /// Create a starter grade scale file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradeforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            weights,
            target,
            tolerance_low,
            tolerance_high,
            max_results,
            letters,
            no_best,
            include_worst,
            exact,
            scale,
            output,
        } => commands::simulate::execute(
            weights,
            target,
            tolerance_low,
            tolerance_high,
            max_results,
            letters,
            no_best,
            include_worst,
            exact,
            scale,
            output,
        ),
        Commands::Gpa { courses, scale } => commands::gpa::execute(courses, scale),
        Commands::UpdateCgpa {
            old_cgpa,
            old_cu,
            new_gpa,
            new_cu,
        } => commands::update_cgpa::execute(old_cgpa, old_cu, new_gpa, new_cu),
        Commands::RequiredGpa {
            old_cgpa,
            old_cu,
            new_cu,
            target,
            scale,
        } => commands::required_gpa::execute(old_cgpa, old_cu, new_cu, target, scale),
        Commands::Classify { cgpa, scale } => commands::classify::execute(cgpa, scale),
        Commands::Validate { scale } => commands::validate::execute(scale),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
