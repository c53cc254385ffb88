use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradeforge_core::gpa::{compute_gpa, required_gpa_for_target, update_cgpa};
use gradeforge_core::model::{CourseGrade, GradeScale};

fn courses(n: usize) -> Vec<CourseGrade> {
    let letters = ["A", "B+", "B", "C+", "C"];
    (0..n)
        .map(|i| CourseGrade {
            credit_units: 2 + (i % 3) as u32,
            letter: letters[i % letters.len()].to_string(),
        })
        .collect()
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let scale = GradeScale::five_point();

    group.bench_function("compute_gpa_8_courses", |b| {
        let courses = courses(8);
        b.iter(|| compute_gpa(black_box(&scale), black_box(&courses)).unwrap())
    });

    group.bench_function("update_cgpa", |b| {
        b.iter(|| update_cgpa(black_box(3.48), black_box(90), black_box(4.12), black_box(18)))
    });

    group.bench_function("required_gpa", |b| {
        b.iter(|| {
            required_gpa_for_target(black_box(3.20), black_box(60), black_box(24), black_box(3.60))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
