//! gradeforge-core — GPA/CGPA metrics and the grade-combination search engine.
//!
//! This crate defines the grade-scale data model, the credit-weighted GPA and
//! CGPA calculations, and the simulator that searches for realistic grade
//! combinations hitting a target GPA. Everything is synchronous and stateless;
//! callers (the CLI, or any other front end) own persistence and prompting.

pub mod error;
pub mod gpa;
pub mod model;
pub mod parser;
pub mod report;
pub mod simulator;
pub mod statistics;
