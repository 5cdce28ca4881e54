//! Typed test results - one shape per paradigm

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::experiment::TestParadigm;

/// A respondent's choice of sample for one question (AB/ABX).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    question_id: u32,
    sample_id: String,
}

impl Selection {
    /// Create a selection of `sample_id` for `question_id`.
    #[must_use]
    pub fn new(question_id: u32, sample_id: impl Into<String>) -> Self {
        Self {
            question_id,
            sample_id: sample_id.into(),
        }
    }

    /// Get the question identifier.
    #[must_use]
    pub const fn question_id(&self) -> u32 {
        self.question_id
    }

    /// Get the chosen sample identifier.
    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }
}

/// A 0-100 score given to one sample (MUSHRA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSample {
    sample_id: String,
    score: f64,
}

impl ScoredSample {
    /// Create a scored sample.
    #[must_use]
    pub fn new(sample_id: impl Into<String>, score: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            score,
        }
    }

    /// Get the sample identifier.
    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    /// Get the score.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }
}

/// A rating given to one sample along one axis (APE).
///
/// APE rates where MUSHRA scores; the wire key differs (`rating`), so this
/// is a distinct type rather than a reuse of [`ScoredSample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRating {
    sample_id: String,
    rating: f64,
}

impl SampleRating {
    /// Create a sample rating.
    #[must_use]
    pub fn new(sample_id: impl Into<String>, rating: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            rating,
        }
    }

    /// Get the sample identifier.
    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    /// Get the rating.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }
}

/// All ratings a respondent gave along one APE axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRatings {
    axis_id: String,
    sample_ratings: Vec<SampleRating>,
}

impl AxisRatings {
    /// Create the rating set for one axis.
    #[must_use]
    pub fn new(axis_id: impl Into<String>, sample_ratings: Vec<SampleRating>) -> Self {
        Self {
            axis_id: axis_id.into(),
            sample_ratings,
        }
    }

    /// Get the axis identifier.
    #[must_use]
    pub fn axis_id(&self) -> &str {
        &self.axis_id
    }

    /// Get the ratings along this axis.
    #[must_use]
    pub fn sample_ratings(&self) -> &[SampleRating] {
        &self.sample_ratings
    }
}

/// Result of one AB test taken by one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbResult {
    test_number: u32,
    selections: Vec<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    experiment_use: Option<Uuid>,
}

impl AbResult {
    /// Create an AB result.
    #[must_use]
    pub fn new(test_number: u32, selections: Vec<Selection>) -> Self {
        Self {
            test_number,
            selections,
            feedback: None,
            experiment_use: None,
        }
    }

    /// Attach respondent feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Get the referenced test number.
    #[must_use]
    pub const fn test_number(&self) -> u32 {
        self.test_number
    }

    /// Get the per-question selections.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Get the respondent feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Get the run identifier stamped at ingest, if any.
    #[must_use]
    pub const fn experiment_use(&self) -> Option<Uuid> {
        self.experiment_use
    }
}

/// Result of one ABX test taken by one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbxResult {
    test_number: u32,
    x_sample_id: String,
    x_selected: bool,
    selections: Vec<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    experiment_use: Option<Uuid>,
}

impl AbxResult {
    /// Create an ABX result.
    #[must_use]
    pub fn new(
        test_number: u32,
        x_sample_id: impl Into<String>,
        x_selected: bool,
        selections: Vec<Selection>,
    ) -> Self {
        Self {
            test_number,
            x_sample_id: x_sample_id.into(),
            x_selected,
            selections,
            feedback: None,
            experiment_use: None,
        }
    }

    /// Attach respondent feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Get the referenced test number.
    #[must_use]
    pub const fn test_number(&self) -> u32 {
        self.test_number
    }

    /// Get the identifier of the sample presented as X.
    #[must_use]
    pub fn x_sample_id(&self) -> &str {
        &self.x_sample_id
    }

    /// Whether the respondent identified X correctly.
    #[must_use]
    pub const fn x_selected(&self) -> bool {
        self.x_selected
    }

    /// Get the per-question selections.
    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Get the respondent feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Get the run identifier stamped at ingest, if any.
    #[must_use]
    pub const fn experiment_use(&self) -> Option<Uuid> {
        self.experiment_use
    }
}

/// Result of one MUSHRA test taken by one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MushraResult {
    test_number: u32,
    reference_score: f64,
    anchors_scores: Vec<ScoredSample>,
    samples_scores: Vec<ScoredSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    experiment_use: Option<Uuid>,
}

impl MushraResult {
    /// Create a MUSHRA result. `anchors_scores` may be empty; an experiment
    /// can run MUSHRA without anchors.
    #[must_use]
    pub fn new(
        test_number: u32,
        reference_score: f64,
        anchors_scores: Vec<ScoredSample>,
        samples_scores: Vec<ScoredSample>,
    ) -> Self {
        Self {
            test_number,
            reference_score,
            anchors_scores,
            samples_scores,
            feedback: None,
            experiment_use: None,
        }
    }

    /// Attach respondent feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Get the referenced test number.
    #[must_use]
    pub const fn test_number(&self) -> u32 {
        self.test_number
    }

    /// Get the score given to the hidden reference.
    #[must_use]
    pub const fn reference_score(&self) -> f64 {
        self.reference_score
    }

    /// Get the anchor scores.
    #[must_use]
    pub fn anchors_scores(&self) -> &[ScoredSample] {
        &self.anchors_scores
    }

    /// Get the regular sample scores.
    #[must_use]
    pub fn samples_scores(&self) -> &[ScoredSample] {
        &self.samples_scores
    }

    /// Get the respondent feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Get the run identifier stamped at ingest, if any.
    #[must_use]
    pub const fn experiment_use(&self) -> Option<Uuid> {
        self.experiment_use
    }
}

/// Result of one APE test taken by one respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApeResult {
    test_number: u32,
    axis_results: Vec<AxisRatings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    experiment_use: Option<Uuid>,
}

impl ApeResult {
    /// Create an APE result.
    #[must_use]
    pub fn new(test_number: u32, axis_results: Vec<AxisRatings>) -> Self {
        Self {
            test_number,
            axis_results,
            feedback: None,
            experiment_use: None,
        }
    }

    /// Attach respondent feedback.
    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Get the referenced test number.
    #[must_use]
    pub const fn test_number(&self) -> u32 {
        self.test_number
    }

    /// Get the per-axis rating sets, in submitted order.
    #[must_use]
    pub fn axis_results(&self) -> &[AxisRatings] {
        &self.axis_results
    }

    /// Get the respondent feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Get the run identifier stamped at ingest, if any.
    #[must_use]
    pub const fn experiment_use(&self) -> Option<Uuid> {
        self.experiment_use
    }
}

/// A typed test result, discriminated by paradigm.
///
/// Downstream logic matches exhaustively over the variants, so adding a
/// paradigm is a compile-time-checked exercise. Serializes transparently as
/// the inner result (the read-model wire shape); deserialization goes
/// through [`classify`](crate::experiment::classify), which validates
/// against the one expected paradigm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestResult {
    /// AB result.
    Ab(AbResult),
    /// ABX result.
    Abx(AbxResult),
    /// MUSHRA result.
    Mushra(MushraResult),
    /// APE result.
    Ape(ApeResult),
}

impl TestResult {
    /// Get the paradigm of this result.
    #[must_use]
    pub const fn paradigm(&self) -> TestParadigm {
        match self {
            Self::Ab(_) => TestParadigm::Ab,
            Self::Abx(_) => TestParadigm::Abx,
            Self::Mushra(_) => TestParadigm::Mushra,
            Self::Ape(_) => TestParadigm::Ape,
        }
    }

    /// Get the referenced test number.
    #[must_use]
    pub const fn test_number(&self) -> u32 {
        match self {
            Self::Ab(r) => r.test_number(),
            Self::Abx(r) => r.test_number(),
            Self::Mushra(r) => r.test_number(),
            Self::Ape(r) => r.test_number(),
        }
    }

    /// Get the respondent feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        match self {
            Self::Ab(r) => r.feedback(),
            Self::Abx(r) => r.feedback(),
            Self::Mushra(r) => r.feedback(),
            Self::Ape(r) => r.feedback(),
        }
    }

    /// Get the run identifier stamped at ingest, if any.
    #[must_use]
    pub const fn experiment_use(&self) -> Option<Uuid> {
        match self {
            Self::Ab(r) => r.experiment_use(),
            Self::Abx(r) => r.experiment_use(),
            Self::Mushra(r) => r.experiment_use(),
            Self::Ape(r) => r.experiment_use(),
        }
    }

    /// Stamp the run identifier this result was submitted under.
    #[must_use]
    pub fn with_experiment_use(mut self, run_id: Uuid) -> Self {
        match &mut self {
            Self::Ab(r) => r.experiment_use = Some(run_id),
            Self::Abx(r) => r.experiment_use = Some(run_id),
            Self::Mushra(r) => r.experiment_use = Some(run_id),
            Self::Ape(r) => r.experiment_use = Some(run_id),
        }
        self
    }
}
