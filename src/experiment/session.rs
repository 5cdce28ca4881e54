//! Session ingest - one respondent's submitted batch of results

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::experiment::classify::classify;
use crate::experiment::{Experiment, Test, TestResult};

/// One completed respondent session: typed results grouped under a run id.
///
/// The run id is generated at ingest and stamped into every result's
/// `experiment_use`; two ingested sessions never share one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    run_id: Uuid,
    results: Vec<TestResult>,
}

impl Session {
    /// Get the run identifier of this session.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Get the session's results in submitted order.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Consume the session, yielding its results.
    #[must_use]
    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }

    /// Number of results in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the session carries no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ingest one submitted session against an experiment.
///
/// The submission envelope is `{"results": [...]}`. Every entry is looked
/// up by its `testNumber` and classified against that test's paradigm.
/// Classification failures are local to one entry: all siblings are still
/// validated (and each failure logged), but if any entry failed, the whole
/// submission is rejected with the first failure — nothing is accepted
/// partially. An empty `results` array is an accepted empty session.
///
/// # Errors
///
/// Returns [`Error::MissingResults`] when the envelope has no `results`
/// array, [`Error::MissingTestNumber`] / [`Error::UnknownTestReference`]
/// for entries that cannot be matched to a test, and
/// [`Error::InvalidPayload`] for entries failing classification.
pub fn ingest_session(experiment: &Experiment, submission: &Value) -> Result<Session> {
    let entries = submission
        .get("results")
        .and_then(Value::as_array)
        .ok_or(Error::MissingResults)?;

    let tests: FxHashMap<u32, &Test> = experiment
        .tests()
        .iter()
        .map(|test| (test.number(), test))
        .collect();

    let mut results = Vec::with_capacity(entries.len());
    let mut first_failure = None;
    for entry in entries {
        match classify_entry(&tests, entry) {
            Ok(result) => results.push(result),
            Err(err) => {
                warn!("rejected result in submission for {}: {err}", experiment.name());
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }
    if let Some(err) = first_failure {
        return Err(err);
    }

    let run_id = Uuid::new_v4();
    let results: Vec<TestResult> = results
        .into_iter()
        .map(|result| result.with_experiment_use(run_id))
        .collect();
    debug!(
        "accepted session {run_id} for {}: {} results",
        experiment.name(),
        results.len()
    );

    Ok(Session { run_id, results })
}

fn classify_entry(tests: &FxHashMap<u32, &Test>, entry: &Value) -> Result<TestResult> {
    let number = entry
        .get("testNumber")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(Error::MissingTestNumber)?;
    let test = tests
        .get(&number)
        .ok_or(Error::UnknownTestReference(number))?;
    classify(entry, test.paradigm())
}
