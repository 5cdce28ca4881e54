//! Experiment plan - the configured test sequence of one experiment

use std::fmt;

use serde::{Deserialize, Serialize};

/// Listening-test paradigm.
///
/// Closed set; each test belongs to exactly one paradigm for its lifetime.
/// Renders and parses as the uppercase wire strings (`"AB"`, `"ABX"`,
/// `"MUSHRA"`, `"APE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestParadigm {
    /// Pairwise comparison: one sample chosen per question.
    Ab,
    /// Pairwise comparison against an undisclosed reference sample X.
    Abx,
    /// Multiple stimuli with hidden reference and anchors, scored 0-100.
    Mushra,
    /// Audio perceptual evaluation: samples rated along named axes.
    Ape,
}

impl TestParadigm {
    /// Label used in report cells, titles, and file names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ab => "AB",
            Self::Abx => "ABX",
            Self::Mushra => "MUSHRA",
            Self::Ape => "APE",
        }
    }
}

impl fmt::Display for TestParadigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audio sample reference.
///
/// In the export engine this only appears as the MUSHRA hidden reference;
/// the asset path is what reports print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    sample_id: String,
    asset_path: String,
}

impl Sample {
    /// Create a sample reference.
    #[must_use]
    pub fn new(sample_id: impl Into<String>, asset_path: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            asset_path: asset_path.into(),
        }
    }

    /// Get the sample identifier.
    #[must_use]
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    /// Get the storage path of the audio asset.
    #[must_use]
    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }
}

/// One configured test within an experiment.
///
/// `number` is the 1-based position of the test and is unique within its
/// experiment; incoming results reference it via `testNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(rename = "testNumber")]
    number: u32,
    #[serde(rename = "type")]
    paradigm: TestParadigm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<Sample>,
}

impl Test {
    /// Create a test with the given number and paradigm.
    #[must_use]
    pub const fn new(number: u32, paradigm: TestParadigm) -> Self {
        Self {
            number,
            paradigm,
            reference: None,
        }
    }

    /// Attach the reference sample. Only meaningful for MUSHRA.
    #[must_use]
    pub fn with_reference(mut self, reference: Sample) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Get the 1-based test number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the test paradigm.
    #[must_use]
    pub const fn paradigm(&self) -> TestParadigm {
        self.paradigm
    }

    /// Get the reference sample, if configured.
    #[must_use]
    pub const fn reference(&self) -> Option<&Sample> {
        self.reference.as_ref()
    }
}

/// A configured experiment: identity fields plus its ordered test sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_text: Option<String>,
    #[serde(default)]
    tests: Vec<Test>,
}

impl Experiment {
    /// Create an experiment with no tests.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            end_text: None,
            tests: Vec::new(),
        }
    }

    /// Create a builder for constructing an experiment with optional fields.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(name)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the experiment description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the closing text shown to respondents, if any.
    #[must_use]
    pub fn end_text(&self) -> Option<&str> {
        self.end_text.as_deref()
    }

    /// Get the configured tests in experiment order.
    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Look up a test by its 1-based number.
    #[must_use]
    pub fn test(&self, number: u32) -> Option<&Test> {
        self.tests.iter().find(|test| test.number() == number)
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    name: String,
    description: Option<String>,
    end_text: Option<String>,
    tests: Vec<Test>,
}

impl ExperimentBuilder {
    /// Create a new builder with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            end_text: None,
            tests: Vec::new(),
        }
    }

    /// Set the experiment description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the closing text shown to respondents.
    #[must_use]
    pub fn end_text(mut self, end_text: impl Into<String>) -> Self {
        self.end_text = Some(end_text.into());
        self
    }

    /// Append a test to the experiment.
    #[must_use]
    pub fn test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        Experiment {
            name: self.name,
            description: self.description,
            end_text: self.end_text,
            tests: self.tests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paradigm_labels() {
        assert_eq!(TestParadigm::Ab.to_string(), "AB");
        assert_eq!(TestParadigm::Abx.to_string(), "ABX");
        assert_eq!(TestParadigm::Mushra.to_string(), "MUSHRA");
        assert_eq!(TestParadigm::Ape.to_string(), "APE");
    }

    #[test]
    fn test_paradigm_wire_strings() {
        let paradigm: TestParadigm = serde_json::from_str("\"MUSHRA\"").unwrap();
        assert_eq!(paradigm, TestParadigm::Mushra);
        assert_eq!(serde_json::to_string(&TestParadigm::Abx).unwrap(), "\"ABX\"");
    }

    #[test]
    fn test_experiment_builder() {
        let experiment = Experiment::builder("speech-codecs")
            .description("Codec comparison at 16 kbps")
            .end_text("Thank you for participating")
            .test(Test::new(1, TestParadigm::Ab))
            .test(Test::new(2, TestParadigm::Mushra).with_reference(Sample::new("ref", "ref.mp3")))
            .build();

        assert_eq!(experiment.name(), "speech-codecs");
        assert_eq!(experiment.description(), Some("Codec comparison at 16 kbps"));
        assert_eq!(experiment.tests().len(), 2);
    }

    #[test]
    fn test_test_lookup_by_number() {
        let experiment = Experiment::builder("exp")
            .test(Test::new(1, TestParadigm::Ab))
            .test(Test::new(2, TestParadigm::Ape))
            .build();

        assert_eq!(experiment.test(2).map(Test::paradigm), Some(TestParadigm::Ape));
        assert!(experiment.test(3).is_none());
    }

    #[test]
    fn test_test_wire_format() {
        let test = Test::new(2, TestParadigm::Mushra).with_reference(Sample::new("r1", "ref.flac"));
        let value = serde_json::to_value(&test).unwrap();

        assert_eq!(value["testNumber"], 2);
        assert_eq!(value["type"], "MUSHRA");
        assert_eq!(value["reference"]["assetPath"], "ref.flac");

        let parsed: Test = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, test);
    }
}
