use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use aquabench_core::answer::normalize_answer;
use aquabench_core::model::{Benchmark, Question, QuestionType};
use aquabench_core::scoring::{score_value, Predictions};

fn make_benchmark(size: usize) -> Arc<Benchmark> {
    let questions = (0..size)
        .map(|n| {
            let expected = if n % 3 == 0 { vec!['A', 'C'] } else { vec!['B'] };
            Question {
                id: format!("Q-{n:04}"),
                text: format!("Benchmark question {n}"),
                question_type: QuestionType::for_expected(&expected),
                expected,
                category: format!("CAT{}", n % 5),
                level: "basic conceptual knowledge".to_string(),
            }
        })
        .collect();
    Arc::new(Benchmark::new("bench", None, questions).unwrap())
}

fn make_predictions(size: usize) -> Value {
    let map: serde_json::Map<String, Value> = (0..size)
        .map(|n| {
            let answer = if n % 2 == 0 { json!("A,C") } else { json!("B") };
            (format!("Q-{n:04}"), answer)
        })
        .collect();
    Value::Object(map)
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_answer");

    group.bench_function("single_letter", |b| {
        let raw = json!("C");
        b.iter(|| normalize_answer(black_box(&raw)))
    });

    group.bench_function("delimited_string", |b| {
        let raw = json!("A, B; C D");
        b.iter(|| normalize_answer(black_box(&raw)))
    });

    group.bench_function("nested_list", |b| {
        let raw = json!(["A", ["B", "C"], "D"]);
        b.iter(|| normalize_answer(black_box(&raw)))
    });

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    for size in [100, 1000] {
        let benchmark = make_benchmark(size);
        let predictions = make_predictions(size);
        group.bench_function(format!("by_id_{size}"), |b| {
            b.iter(|| score_value(black_box(&benchmark), black_box(&predictions)))
        });
    }

    group.bench_function("shape_check_1000", |b| {
        let predictions = make_predictions(1000);
        b.iter(|| Predictions::from_value(black_box(&predictions)))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_score);
criterion_main!(benches);
