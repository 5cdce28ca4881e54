//! Result classification - validating untyped payloads against one paradigm

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::experiment::result::{AbResult, AbxResult, ApeResult, MushraResult, TestResult};
use crate::experiment::TestParadigm;

/// Validate a raw payload against exactly the paradigm named by `expected`
/// and produce a typed result.
///
/// The other three paradigms are never attempted: a payload that happens to
/// satisfy a different shape is still rejected. Optional fields default to
/// absent; a missing required field, a wrong field type, or an empty
/// required sequence fails with [`Error::InvalidPayload`] carrying the first
/// violation encountered.
///
/// Pure function of its inputs; no side effects.
///
/// # Errors
///
/// Returns [`Error::InvalidPayload`] when the payload does not match the
/// expected paradigm's shape.
pub fn classify(raw: &Value, expected: TestParadigm) -> Result<TestResult> {
    match expected {
        TestParadigm::Ab => {
            let result: AbResult = parse(raw, expected)?;
            require(
                !result.selections().is_empty(),
                expected,
                "selections must not be empty",
            )?;
            Ok(TestResult::Ab(result))
        }
        TestParadigm::Abx => {
            let result: AbxResult = parse(raw, expected)?;
            require(
                !result.selections().is_empty(),
                expected,
                "selections must not be empty",
            )?;
            Ok(TestResult::Abx(result))
        }
        TestParadigm::Mushra => {
            let result: MushraResult = parse(raw, expected)?;
            require(
                !result.samples_scores().is_empty(),
                expected,
                "samplesScores must not be empty",
            )?;
            Ok(TestResult::Mushra(result))
        }
        TestParadigm::Ape => {
            let result: ApeResult = parse(raw, expected)?;
            require(
                !result.axis_results().is_empty(),
                expected,
                "axisResults must not be empty",
            )?;
            for axis in result.axis_results() {
                require(
                    !axis.sample_ratings().is_empty(),
                    expected,
                    "sampleRatings must not be empty",
                )?;
            }
            Ok(TestResult::Ape(result))
        }
    }
}

fn parse<'de, T: Deserialize<'de>>(raw: &'de Value, paradigm: TestParadigm) -> Result<T> {
    T::deserialize(raw).map_err(|err| Error::InvalidPayload {
        paradigm,
        reason: err.to_string(),
    })
}

fn require(ok: bool, paradigm: TestParadigm, violation: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidPayload {
            paradigm,
            reason: violation.to_owned(),
        })
    }
}
