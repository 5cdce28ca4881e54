//! Column discovery - report layout computed from observed identifiers
//!
//! Reports have no fixed schema: the columns of a test's report are the
//! union of identifiers actually present in its results. Discovery is kept
//! separate from row building so its central guarantee - identical output
//! for any permutation of the same results - stays easy to state and test.

use std::collections::BTreeSet;

use crate::experiment::{Selection, TestParadigm, TestResult};

/// Ordered, deduplicated column keys discovered from one test's results.
///
/// Accumulation goes through `BTreeSet`, so each sequence is sorted
/// ascending and duplicate-free by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSet {
    /// AB/ABX: distinct question ids.
    Questions(Vec<u32>),
    /// MUSHRA: distinct anchor and regular sample ids, kept separate;
    /// anchors precede regular samples in the final layout.
    ScoredSamples {
        /// Anchor sample ids.
        anchors: Vec<String>,
        /// Regular sample ids.
        samples: Vec<String>,
    },
    /// APE: distinct rated sample ids across all axes of all results.
    RatedSamples(Vec<String>),
}

impl ColumnSet {
    /// Whether no data columns were discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Questions(questions) => questions.is_empty(),
            Self::ScoredSamples { anchors, samples } => anchors.is_empty() && samples.is_empty(),
            Self::RatedSamples(samples) => samples.is_empty(),
        }
    }

    pub(crate) const fn describe(&self) -> &'static str {
        match self {
            Self::Questions(_) => "question",
            Self::ScoredSamples { .. } => "scored sample",
            Self::RatedSamples(_) => "rated sample",
        }
    }
}

/// Compute the ordered column keys for one test's results.
///
/// Depends only on the *set* of identifiers present, never on result order.
/// Empty input yields an empty column set (a paradigm-appropriate header
/// with zero data columns), not an error. Results whose variant does not
/// match `paradigm` contribute nothing; enforcing paradigm agreement is the
/// table builder's job.
#[must_use]
pub fn discover_columns(results: &[TestResult], paradigm: TestParadigm) -> ColumnSet {
    match paradigm {
        TestParadigm::Ab => {
            let mut questions = BTreeSet::new();
            for result in results {
                if let TestResult::Ab(r) = result {
                    questions.extend(r.selections().iter().map(Selection::question_id));
                }
            }
            ColumnSet::Questions(questions.into_iter().collect())
        }
        TestParadigm::Abx => {
            let mut questions = BTreeSet::new();
            for result in results {
                if let TestResult::Abx(r) = result {
                    questions.extend(r.selections().iter().map(Selection::question_id));
                }
            }
            ColumnSet::Questions(questions.into_iter().collect())
        }
        TestParadigm::Mushra => {
            let mut anchors = BTreeSet::new();
            let mut samples = BTreeSet::new();
            for result in results {
                if let TestResult::Mushra(r) = result {
                    anchors.extend(r.anchors_scores().iter().map(|s| s.sample_id().to_owned()));
                    samples.extend(r.samples_scores().iter().map(|s| s.sample_id().to_owned()));
                }
            }
            ColumnSet::ScoredSamples {
                anchors: anchors.into_iter().collect(),
                samples: samples.into_iter().collect(),
            }
        }
        TestParadigm::Ape => {
            let mut samples = BTreeSet::new();
            for result in results {
                if let TestResult::Ape(r) = result {
                    for axis in r.axis_results() {
                        samples.extend(axis.sample_ratings().iter().map(|s| s.sample_id().to_owned()));
                    }
                }
            }
            ColumnSet::RatedSamples(samples.into_iter().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{
        AbResult, ApeResult, AxisRatings, MushraResult, SampleRating, ScoredSample, Selection,
    };

    fn ab(test_number: u32, selections: Vec<Selection>) -> TestResult {
        TestResult::Ab(AbResult::new(test_number, selections))
    }

    #[test]
    fn test_discover_questions_sorted_and_deduplicated() {
        let results = vec![
            ab(1, vec![Selection::new(3, "s1"), Selection::new(1, "s2")]),
            ab(1, vec![Selection::new(2, "s3"), Selection::new(3, "s4")]),
        ];

        let columns = discover_columns(&results, TestParadigm::Ab);
        assert_eq!(columns, ColumnSet::Questions(vec![1, 2, 3]));
    }

    #[test]
    fn test_discover_questions_numeric_order() {
        // 10 sorts after 2 numerically, not lexicographically.
        let results = vec![ab(1, vec![Selection::new(10, "a"), Selection::new(2, "b")])];

        let columns = discover_columns(&results, TestParadigm::Ab);
        assert_eq!(columns, ColumnSet::Questions(vec![2, 10]));
    }

    #[test]
    fn test_discover_is_order_independent() {
        let forward = vec![
            ab(1, vec![Selection::new(1, "s1")]),
            ab(1, vec![Selection::new(2, "s2")]),
        ];
        let reversed: Vec<TestResult> = forward.iter().rev().cloned().collect();

        assert_eq!(
            discover_columns(&forward, TestParadigm::Ab),
            discover_columns(&reversed, TestParadigm::Ab)
        );
    }

    #[test]
    fn test_discover_mushra_keeps_anchors_separate() {
        let results = vec![TestResult::Mushra(MushraResult::new(
            1,
            80.0,
            vec![ScoredSample::new("a2", 10.0), ScoredSample::new("a1", 20.0)],
            vec![ScoredSample::new("s1", 70.0)],
        ))];

        let columns = discover_columns(&results, TestParadigm::Mushra);
        assert_eq!(
            columns,
            ColumnSet::ScoredSamples {
                anchors: vec!["a1".to_owned(), "a2".to_owned()],
                samples: vec!["s1".to_owned()],
            }
        );
    }

    #[test]
    fn test_discover_ape_unions_across_axes() {
        let results = vec![TestResult::Ape(ApeResult::new(
            1,
            vec![
                AxisRatings::new("depth", vec![SampleRating::new("s2", 10.0)]),
                AxisRatings::new("width", vec![SampleRating::new("s1", 20.0)]),
            ],
        ))];

        let columns = discover_columns(&results, TestParadigm::Ape);
        assert_eq!(
            columns,
            ColumnSet::RatedSamples(vec!["s1".to_owned(), "s2".to_owned()])
        );
    }

    #[test]
    fn test_discover_empty_input() {
        let columns = discover_columns(&[], TestParadigm::Mushra);
        assert!(columns.is_empty());
    }

    #[test]
    fn test_discover_ignores_foreign_variants() {
        let results = vec![ab(1, vec![Selection::new(1, "s1")])];

        let columns = discover_columns(&results, TestParadigm::Ape);
        assert_eq!(columns, ColumnSet::RatedSamples(Vec::new()));
    }
}
