//! Experiment domain model
//!
//! The configured side (what an experimenter set up) and the collected side
//! (what respondents submitted):
//!
//! ```text
//! Experiment (1) ──< Test (N, one paradigm each)
//!                        │
//!                        └──< TestResult (N, shape fixed by the paradigm)
//!                                 grouped into Session runs at ingest
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use perqual::experiment::{classify, Experiment, Test, TestParadigm};
//! use serde_json::json;
//!
//! let experiment = Experiment::builder("codec-shootout")
//!     .test(Test::new(1, TestParadigm::Ab))
//!     .build();
//!
//! let raw = json!({
//!     "testNumber": 1,
//!     "selections": [{"questionId": 1, "sampleId": "s1"}]
//! });
//! let result = classify(&raw, experiment.tests()[0].paradigm())?;
//! assert_eq!(result.test_number(), 1);
//! # Ok::<(), perqual::Error>(())
//! ```

mod classify;
mod plan;
mod result;
mod session;

pub use classify::classify;
pub use plan::{Experiment, ExperimentBuilder, Sample, Test, TestParadigm};
pub use result::{
    AbResult, AbxResult, ApeResult, AxisRatings, MushraResult, SampleRating, ScoredSample,
    Selection, TestResult,
};
pub use session::{ingest_session, Session};
