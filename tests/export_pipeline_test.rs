//! Integration test for the result export pipeline
//!
//! Tests the complete export path:
//! 1. Ingest submitted sessions against the experiment plan
//! 2. Serialize per-test flat reports
//! 3. Compose and render the whole-experiment document
//! 4. Bundle every test's report into a zip archive

use std::io::{Cursor, Read};

use perqual::error::Error;
use perqual::experiment::{
    ingest_session, AbResult, AbxResult, ApeResult, AxisRatings, Experiment, MushraResult, Sample,
    SampleRating, ScoredSample, Selection, Test, TestParadigm, TestResult,
};
use perqual::report::{report_file_name, QuotePolicy};
use perqual::ExportEngine;
use serde_json::json;
use zip::ZipArchive;

fn fixture_experiment() -> Experiment {
    Experiment::builder("codec-eval")
        .description("Perceptual comparison of speech codecs")
        .test(Test::new(1, TestParadigm::Ab))
        .test(Test::new(2, TestParadigm::Abx))
        .test(
            Test::new(3, TestParadigm::Mushra)
                .with_reference(Sample::new("ref", "refs/orig.flac")),
        )
        .test(Test::new(4, TestParadigm::Ape))
        .build()
}

fn fixture_results() -> Vec<TestResult> {
    vec![
        TestResult::Ab(AbResult::new(1, vec![Selection::new(1, "7")])),
        TestResult::Ab(AbResult::new(1, vec![Selection::new(2, "3")])),
        TestResult::Abx(
            AbxResult::new(2, "sx", false, vec![Selection::new(1, "sa")])
                .with_feedback("close call"),
        ),
        TestResult::Mushra(MushraResult::new(
            3,
            80.0,
            vec![ScoredSample::new("a1", 10.0)],
            vec![ScoredSample::new("s1", 70.0)],
        )),
        TestResult::Mushra(MushraResult::new(
            3,
            90.0,
            vec![],
            vec![ScoredSample::new("s1", 60.0)],
        )),
        TestResult::Ape(ApeResult::new(
            4,
            vec![
                AxisRatings::new(
                    "depth",
                    vec![SampleRating::new("s1", 42.0), SampleRating::new("s2", 61.0)],
                ),
                AxisRatings::new("clarity", vec![SampleRating::new("s1", 80.0)]),
            ],
        )),
    ]
}

#[test]
fn test_ab_flat_report() {
    let engine = ExportEngine::default();
    let report = engine
        .flat_report(&fixture_experiment(), &fixture_results(), 1)
        .expect("AB report failed");

    assert_eq!(
        report,
        "Test type,question 1,sample 1,question 2,sample 2,Feedback\n\
         AB,1,7,2,Null,\n\
         AB,1,Null,2,3,\n"
    );
}

#[test]
fn test_abx_flat_report() {
    let engine = ExportEngine::default();
    let report = engine
        .flat_report(&fixture_experiment(), &fixture_results(), 2)
        .expect("ABX report failed");

    assert_eq!(
        report,
        "Test type,xSample,xSelected,question 1,sample 1,Feedback\n\
         ABX,sx,false,1,sa,close call\n"
    );
}

#[test]
fn test_mushra_flat_report_has_ragged_rows() {
    let engine = ExportEngine::default();
    let report = engine
        .flat_report(&fixture_experiment(), &fixture_results(), 3)
        .expect("MUSHRA report failed");

    // The second respondent scored no anchors: their row is shorter.
    assert_eq!(
        report,
        "Test type,ReferenceFile,ReferenceScore,\
         Anchor Sample 1,Anchor Score 1,Sample 1,Sample Score 1,Feedback\n\
         MUSHRA,refs/orig.flac,80,a1,10,s1,70,\n\
         MUSHRA,refs/orig.flac,90,s1,60,\n"
    );
}

#[test]
fn test_ape_flat_report_one_row_per_axis() {
    let engine = ExportEngine::default();
    let report = engine
        .flat_report(&fixture_experiment(), &fixture_results(), 4)
        .expect("APE report failed");

    assert_eq!(
        report,
        "Test type,Axis,Sample 1,Sample Score 1,Sample 2,Sample Score 2,Feedback\n\
         APE,depth,s1,42,s2,61,\n\
         APE,clarity,s1,80,s2,Null,\n"
    );
}

#[test]
fn test_flat_report_unknown_test() {
    let engine = ExportEngine::default();
    let err = engine
        .flat_report(&fixture_experiment(), &fixture_results(), 9)
        .unwrap_err();

    assert!(matches!(err, Error::UnknownTestReference(9)));
}

#[test]
fn test_document_covers_tests_with_results() {
    let engine = ExportEngine::default();
    let experiment = fixture_experiment();

    // Drop the APE results: test 4 gets no page.
    let results: Vec<TestResult> = fixture_results()
        .into_iter()
        .filter(|result| result.test_number() != 4)
        .collect();

    let pages = engine.pages(&experiment, &results);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].title(), "Experiment: codec-eval - Test 1 (AB)");
    assert_eq!(pages[2].title(), "Experiment: codec-eval - Test 3 (MUSHRA)");

    let document = engine.document(&experiment, &results);
    let page_breaks = document.iter().filter(|&&b| b == 0x0c).count();
    assert_eq!(page_breaks, 2, "3 pages should be separated by 2 form feeds");
}

#[test]
fn test_document_shares_labels_with_flat_report() {
    let engine = ExportEngine::default();
    let experiment = fixture_experiment();
    let results = fixture_results();

    let flat = engine.flat_report(&experiment, &results, 3).unwrap();
    let pages = engine.pages(&experiment, &results);
    let mushra_page = &pages[2];

    // Both serializers are fed by one table: same labels, same values.
    for header in mushra_page.headers() {
        assert!(flat.contains(header.as_str()), "missing label {header}");
    }
    assert_eq!(mushra_page.rows()[0][1].text(), "refs/orig.flac");
}

#[test]
fn test_archive_bundles_every_test() {
    let engine = ExportEngine::default();
    let experiment = fixture_experiment();

    // No ABX results stored: test 2's entry is header-only, not missing.
    let results: Vec<TestResult> = fixture_results()
        .into_iter()
        .filter(|result| result.test_number() != 2)
        .collect();

    let bytes = engine.archive(&experiment, &results).expect("archive failed");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("invalid zip");

    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "codec-eval_test_1_AB.csv",
            "codec-eval_test_2_ABX.csv",
            "codec-eval_test_3_MUSHRA.csv",
            "codec-eval_test_4_APE.csv",
        ]
    );

    let mut entry = archive
        .by_name(&report_file_name("codec-eval", 2, "ABX"))
        .unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    assert_eq!(text, "Test type,xSample,xSelected,Feedback\n");
}

#[test]
fn test_archive_bytes_are_reproducible() {
    let engine = ExportEngine::default();
    let experiment = fixture_experiment();
    let results = fixture_results();

    let first = engine.archive(&experiment, &results).unwrap();
    let second = engine.archive(&experiment, &results).unwrap();
    assert_eq!(first, second, "identical inputs must produce identical bytes");
}

#[test]
fn test_ingested_sessions_feed_every_format() {
    let experiment = fixture_experiment();
    let first = ingest_session(
        &experiment,
        &json!({"results": [
            {"testNumber": 1, "selections": [{"questionId": 1, "sampleId": "7"}]},
            {
                "testNumber": 3,
                "referenceScore": 80,
                "anchorsScores": [{"sampleId": "a1", "score": 10}],
                "samplesScores": [{"sampleId": "s1", "score": 70}]
            }
        ]}),
    )
    .expect("first session rejected");
    let second = ingest_session(
        &experiment,
        &json!({"results": [
            {"testNumber": 1, "selections": [{"questionId": 2, "sampleId": "3"}]}
        ]}),
    )
    .expect("second session rejected");
    assert_ne!(first.run_id(), second.run_id());

    let mut results = first.into_results();
    results.extend(second.into_results());

    let engine = ExportEngine::default();
    let report = engine.flat_report(&experiment, &results, 1).unwrap();
    assert_eq!(
        report,
        "Test type,question 1,sample 1,question 2,sample 2,Feedback\n\
         AB,1,7,2,Null,\n\
         AB,1,Null,2,3,\n"
    );

    let document = engine.document(&experiment, &results);
    assert!(!document.is_empty());

    let archive = engine.archive(&experiment, &results).unwrap();
    assert!(!archive.is_empty());
}

#[test]
fn test_configured_engine_delimiter_and_quoting() {
    let engine = ExportEngine::builder()
        .delimiter(b';')
        .quote_policy(QuotePolicy::Escaped)
        .build()
        .expect("valid configuration rejected");

    let experiment = Experiment::builder("exp")
        .test(Test::new(1, TestParadigm::Ab))
        .build();
    let results = vec![TestResult::Ab(
        AbResult::new(1, vec![Selection::new(1, "s1")]).with_feedback("good; clean"),
    )];

    let report = engine.flat_report(&experiment, &results, 1).unwrap();
    assert_eq!(
        report,
        "Test type;question 1;sample 1;Feedback\nAB;1;s1;\"good; clean\"\n"
    );
}
