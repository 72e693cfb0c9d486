//! Renders a text transcript of a finished (or in-progress) session.
//!
//! Templates come from the quiz document's `export` section and use the
//! placeholders `{title}`, `{category}`, `{separator}`, `{question}`,
//! `{answer}` and `{answerText}`.

use serde::Deserialize;

use quiz_core::model::{AnswerStore, AnswerValue, Cursor, Question, QuestionSet};

/// Export templates, one fragment per transcript element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportTemplate {
    pub header: String,
    pub category: String,
    pub question: String,
    /// Repeated to the category-name length to underline it.
    pub separator: String,
    /// Marker used as `{answerText}` for unanswered questions.
    pub unanswered: String,
}

impl Default for ExportTemplate {
    fn default() -> Self {
        Self {
            header: "{title}\n\n".into(),
            category: "{category}\n{separator}\n".into(),
            question: "{question}\n  [{answer}] {answerText}\n".into(),
            separator: "=".into(),
            unanswered: "(not answered)".into(),
        }
    }
}

/// The quiz document's `export` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: String,
    pub template: ExportTemplate,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "quiz-results.txt".into(),
            template: ExportTemplate::default(),
        }
    }
}

/// Builds transcripts from the full answer store and question set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptExporter {
    config: ExportConfig,
}

impl TranscriptExporter {
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.config.filename
    }

    /// Renders the transcript text.
    ///
    /// Choice answers show their key and label; open-text answers show the
    /// text itself; blank or missing answers show the unanswered marker.
    #[must_use]
    pub fn render(&self, title: &str, set: &QuestionSet, answers: &AnswerStore) -> String {
        let template = &self.config.template;
        let mut out = template.header.replace("{title}", title);

        for (category_index, category) in set.categories().iter().enumerate() {
            let underline = template.separator.repeat(category.name().chars().count());
            out.push_str(
                &template
                    .category
                    .replace("{category}", category.name())
                    .replace("{separator}", &underline),
            );

            for (question_index, question) in category.questions().iter().enumerate() {
                let answer = answers.get(Cursor::new(category_index, question_index));
                let (key, text) = answer_fields(question, answer, &template.unanswered);
                out.push_str(
                    &template
                        .question
                        .replace("{question}", question.text())
                        .replace("{answer}", &key)
                        .replace("{answerText}", &text),
                );
            }

            out.push('\n');
        }

        out
    }
}

fn answer_fields(
    question: &Question,
    answer: Option<&AnswerValue>,
    unanswered: &str,
) -> (String, String) {
    match answer {
        Some(AnswerValue::Choice(key)) => {
            let label = question.option_label(key).unwrap_or(key.as_str());
            (key.clone(), label.to_string())
        }
        Some(AnswerValue::Text(text)) if !text.trim().is_empty() => {
            ("-".into(), text.trim().to_string())
        }
        _ => ("-".into(), unanswered.to_string()),
    }
}
