//! Complete Perqual Pipeline: Ingest → Tables → Reports → Archive
//!
//! This example demonstrates the complete workflow:
//! 1. Configure an experiment with all four test paradigms
//! 2. Ingest simulated respondent sessions
//! 3. Serialize per-test flat reports
//! 4. Compose and render the whole-experiment document
//! 5. Bundle every report into a zip archive
//!
//! Run with: cargo run --example export_pipeline --release

use std::io::Cursor;
use std::time::Instant;

use perqual::experiment::{ingest_session, Experiment, Sample, Test, TestParadigm, TestResult};
use perqual::report::archive_file_name;
use perqual::ExportEngine;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use zip::ZipArchive;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           PERQUAL RESULT EXPORT PIPELINE DEMO                ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Step 1: Experiment setup
    println!("┌─ STEP 1: EXPERIMENT SETUP ─────────────────────────────────┐");
    let experiment = Experiment::builder("codec-shootout")
        .description("Perceptual comparison of speech codecs at 16 kbps")
        .end_text("Thank you for listening")
        .test(Test::new(1, TestParadigm::Ab))
        .test(Test::new(2, TestParadigm::Abx))
        .test(
            Test::new(3, TestParadigm::Mushra)
                .with_reference(Sample::new("ref", "refs/original.flac")),
        )
        .test(Test::new(4, TestParadigm::Ape))
        .build();

    println!("│ Experiment: {}", experiment.name());
    for test in experiment.tests() {
        let reference = test
            .reference()
            .map_or(String::new(), |r| format!(", reference {}", r.asset_path()));
        println!("│   Test {}: {}{}", test.number(), test.paradigm(), reference);
    }
    println!("└────────────────────────────────────────────────────────────┘\n");

    // Step 2: Session ingest
    println!("┌─ STEP 2: SESSION INGEST ───────────────────────────────────┐");
    let start = Instant::now();
    let mut results: Vec<TestResult> = Vec::new();
    let respondents = 12;

    for _ in 0..respondents {
        let session = ingest_session(&experiment, &simulate_submission())?;
        results.extend(session.into_results());
    }
    let ingest_time = start.elapsed();

    println!("│ Sessions accepted: {respondents}");
    println!("│ Stored results: {}", results.len());
    println!("│ Time: {ingest_time:?}");
    println!("│");

    // A malformed submission is rejected whole; nothing is stored.
    let bad = json!({"results": [{"testNumber": 1, "selections": []}]});
    match ingest_session(&experiment, &bad) {
        Ok(_) => println!("│ Unexpected: malformed submission accepted"),
        Err(err) => println!("│ Rejected malformed submission: {err}"),
    }
    println!("└────────────────────────────────────────────────────────────┘\n");

    // Step 3: Flat reports
    println!("┌─ STEP 3: FLAT REPORTS ─────────────────────────────────────┐");
    let engine = ExportEngine::default();

    for test in experiment.tests() {
        let report = engine.flat_report(&experiment, &results, test.number())?;
        println!(
            "│ Test {} ({}): {} lines, {} bytes",
            test.number(),
            test.paradigm(),
            report.lines().count(),
            report.len()
        );
    }

    let ab_report = engine.flat_report(&experiment, &results, 1)?;
    println!("│");
    println!("│ Test 1 preview:");
    for line in ab_report.lines().take(3) {
        println!("│   {line}");
    }
    println!("└────────────────────────────────────────────────────────────┘\n");

    // Step 4: Whole-experiment document
    println!("┌─ STEP 4: PAGINATED DOCUMENT ───────────────────────────────┐");
    let start = Instant::now();
    let pages = engine.pages(&experiment, &results);
    let document = engine.document(&experiment, &results);
    let compose_time = start.elapsed();

    for page in &pages {
        println!(
            "│ {} [{} columns x {} rows]",
            page.title(),
            page.headers().len(),
            page.rows().len()
        );
    }
    println!("│");
    println!("│ Rendered: {} bytes in {compose_time:?}", document.len());
    println!("│ Preview:");
    let text = String::from_utf8_lossy(&document);
    for line in text.lines().take(5) {
        println!("│   {line}");
    }
    println!("└────────────────────────────────────────────────────────────┘\n");

    // Step 5: Archive
    println!("┌─ STEP 5: ZIP ARCHIVE ──────────────────────────────────────┐");
    let start = Instant::now();
    let archive_bytes = engine.archive(&experiment, &results)?;
    let archive_time = start.elapsed();

    println!("│ {}: {} bytes", archive_file_name(experiment.name()), archive_bytes.len());
    let mut archive = ZipArchive::new(Cursor::new(&archive_bytes[..]))?;
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        println!("│   {} ({} bytes)", entry.name(), entry.size());
    }
    println!("│ Time: {archive_time:?}");
    println!("└────────────────────────────────────────────────────────────┘\n");

    // Summary
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                      PIPELINE SUMMARY                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("✓ Sessions ingested: {respondents} (atomic accept/reject)");
    println!("✓ Flat reports: one per test, columns discovered from results");
    println!("✓ Document: {} pages from one canonical table per test", pages.len());
    println!("✓ Archive: {} entries, reproducible bytes", experiment.tests().len());
    println!();

    Ok(())
}

/// One simulated respondent answering all four tests
fn simulate_submission() -> Value {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let codecs = ["codec_a", "codec_b"];

    let selections: Vec<Value> = (1..=4)
        .map(|question| {
            json!({
                "questionId": question,
                "sampleId": codecs[rng.gen_range(0..codecs.len())]
            })
        })
        .collect();

    let samples_scores: Vec<Value> = (0..4)
        .map(|i| json!({"sampleId": format!("codec_{i}"), "score": rng.gen_range(20..100)}))
        .collect();

    let axis_ratings = |rng: &mut rand::rngs::ThreadRng| -> Vec<Value> {
        (0..3)
            .map(|i| json!({"sampleId": format!("codec_{i}"), "rating": rng.gen_range(0..100)}))
            .collect()
    };
    let depth = axis_ratings(&mut rng);
    let clarity = axis_ratings(&mut rng);

    json!({"results": [
        {
            "testNumber": 1,
            "selections": selections,
            "feedback": "clear preference"
        },
        {
            "testNumber": 2,
            "xSampleId": codecs[rng.gen_range(0..codecs.len())],
            "xSelected": rng.gen_bool(0.5),
            "selections": [
                {"questionId": 1, "sampleId": codecs[rng.gen_range(0..codecs.len())]}
            ]
        },
        {
            "testNumber": 3,
            "referenceScore": rng.gen_range(70..100),
            "anchorsScores": [
                {"sampleId": "anchor_35", "score": rng.gen_range(0..40)}
            ],
            "samplesScores": samples_scores
        },
        {
            "testNumber": 4,
            "axisResults": [
                {"axisId": "depth", "sampleRatings": depth},
                {"axisId": "clarity", "sampleRatings": clarity}
            ]
        }
    ]})
}
