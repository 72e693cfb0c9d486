//! Loads the combined quiz configuration document.
//!
//! One JSON file describes a whole quiz: app metadata, export templates, and
//! the categorized questions. Presentation-only sections (`ui`, `theme`) are
//! ignored here; theming belongs to the presentation layer.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use quiz_core::model::{Category, ChoiceOption, Question, QuestionSet};

use crate::error::LoadError;
use crate::export::ExportConfig;

/// App metadata displayed around the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppInfo {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawCategory {
    category: String,
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    #[default]
    Choice,
    Open,
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuestion {
    question: String,
    #[serde(rename = "type", default)]
    kind: RawKind,
    // An ordered JSON object, key -> label. `preserve_order` keeps the
    // configured option order.
    #[serde(default)]
    options: serde_json::Map<String, Value>,
    #[serde(default)]
    placeholder: Option<String>,
}

/// A parsed quiz document.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizFile {
    pub app: AppInfo,
    #[serde(default)]
    pub export: ExportConfig,
    questions: Vec<RawCategory>,
}

impl QuizFile {
    /// Parses a quiz document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Json` for malformed documents.
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Maps the raw question records into validated core types.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::OptionLabel` for non-string option labels and
    /// `LoadError::Question` for duplicate option keys.
    pub fn question_set(&self) -> Result<QuestionSet, LoadError> {
        let mut categories = Vec::with_capacity(self.questions.len());
        for raw in &self.questions {
            let mut questions = Vec::with_capacity(raw.questions.len());
            for question in &raw.questions {
                questions.push(build_question(question)?);
            }
            categories.push(Category::new(raw.category.clone(), questions));
        }
        Ok(QuestionSet::new(categories))
    }
}

fn build_question(raw: &RawQuestion) -> Result<Question, LoadError> {
    match raw.kind {
        RawKind::Open => Ok(Question::open_text(
            raw.question.clone(),
            raw.placeholder.clone(),
        )),
        RawKind::Choice => {
            let mut options = Vec::with_capacity(raw.options.len());
            for (key, label) in &raw.options {
                let label = label.as_str().ok_or_else(|| LoadError::OptionLabel {
                    key: key.clone(),
                })?;
                options.push(ChoiceOption::new(key.clone(), label));
            }
            Ok(Question::choice(raw.question.clone(), options)?)
        }
    }
}

/// Reads and parses a quiz document from disk.
///
/// # Errors
///
/// Returns `LoadError::Io` when the file cannot be read and `LoadError::Json`
/// when it does not parse.
pub fn load_quiz_file(path: &Path) -> Result<QuizFile, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    QuizFile::parse(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionKind;

    const SAMPLE: &str = r#"{
        "app": { "title": "Team Survey", "subtitle": "v1" },
        "ui": { "progress": { "counterFormat": "{current} / {total}" } },
        "export": { "filename": "survey.txt" },
        "questions": [
            {
                "category": "Workflow",
                "questions": [
                    {
                        "question": "Preferred cadence?",
                        "options": { "A": "Weekly", "B": "Biweekly", "C": "Monthly" }
                    },
                    {
                        "question": "Anything else?",
                        "type": "open",
                        "placeholder": "Write freely"
                    }
                ]
            },
            {
                "category": "Tools",
                "questions": [
                    { "question": "Editor?", "options": { "A": "Vim", "B": "Other" } }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_combined_document() {
        let file = QuizFile::parse(SAMPLE).unwrap();

        assert_eq!(file.app.title, "Team Survey");
        assert_eq!(file.app.subtitle.as_deref(), Some("v1"));
        assert_eq!(file.export.filename, "survey.txt");

        let set = file.question_set().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_questions(), 3);
        assert_eq!(set.categories()[0].name(), "Workflow");
    }

    #[test]
    fn preserves_option_order() {
        let file = QuizFile::parse(SAMPLE).unwrap();
        let set = file.question_set().unwrap();

        let QuestionKind::Choice { options } = set.categories()[0].questions()[0].kind() else {
            panic!("expected a choice question");
        };
        let keys: Vec<&str> = options.iter().map(|o| o.key()).collect();
        assert_eq!(keys, ["A", "B", "C"]);
    }

    #[test]
    fn open_questions_keep_their_placeholder() {
        let file = QuizFile::parse(SAMPLE).unwrap();
        let set = file.question_set().unwrap();

        let question = &set.categories()[0].questions()[1];
        assert!(question.is_open_text());
        assert_eq!(
            question.kind(),
            &QuestionKind::OpenText {
                placeholder: Some("Write freely".into())
            }
        );
    }

    #[test]
    fn missing_type_defaults_to_choice() {
        let file = QuizFile::parse(SAMPLE).unwrap();
        let set = file.question_set().unwrap();
        assert!(!set.categories()[1].questions()[0].is_open_text());
    }

    #[test]
    fn rejects_non_string_option_labels() {
        let json = r#"{
            "app": { "title": "T" },
            "questions": [
                {
                    "category": "C",
                    "questions": [ { "question": "Q", "options": { "A": 1 } } ]
                }
            ]
        }"#;
        let file = QuizFile::parse(json).unwrap();

        let err = file.question_set().unwrap_err();
        assert!(matches!(err, LoadError::OptionLabel { key } if key == "A"));
    }

    #[test]
    fn missing_export_section_uses_defaults() {
        let json = r#"{ "app": { "title": "T" }, "questions": [] }"#;
        let file = QuizFile::parse(json).unwrap();
        assert!(!file.export.filename.is_empty());
        assert!(file.export.template.header.contains("{title}"));
    }
}
