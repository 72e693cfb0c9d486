//! Thin orchestration between external events and the quiz engine.

use quiz_core::engine::{Advance, CategoryProgress, QuestionCounter, QuizEngine};
use quiz_core::model::QuestionSet;

use crate::error::SessionError;
use crate::export::TranscriptExporter;
use crate::session::view::{NavState, QuestionView, ResultsView, Transcript};

/// External UI events, one variant per user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Select(String),
    SetText(String),
    Next,
    Previous,
    ExportRequest,
    Restart,
}

/// Presentation seam: receives view-model snapshots and renders them.
///
/// The controller never learns how anything is drawn; communication is
/// one-directional.
pub trait Presenter {
    fn show_start(&mut self);
    fn show_question(&mut self, view: &QuestionView);
    fn show_results(&mut self, view: &ResultsView);
    fn update_navigation(&mut self, nav: &NavState);
    fn update_progress(&mut self, progress: &[CategoryProgress]);
    fn update_counter(&mut self, counter: &QuestionCounter);
    fn deliver_transcript(&mut self, transcript: &Transcript);
}

/// Translates [`SessionEvent`]s into engine operations and pushes the
/// refreshed view-models to the presenter.
pub struct SessionController<P: Presenter> {
    engine: QuizEngine,
    exporter: TranscriptExporter,
    title: String,
    presenter: P,
}

impl<P: Presenter> SessionController<P> {
    #[must_use]
    pub fn new(
        set: QuestionSet,
        title: impl Into<String>,
        exporter: TranscriptExporter,
        presenter: P,
    ) -> Self {
        Self {
            engine: QuizEngine::new(set),
            exporter,
            title: title.into(),
            presenter,
        }
    }

    /// Handles one external event to completion.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Engine` when `Start` is handled against a
    /// malformed question set; every other event is normal control flow.
    pub fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::Start => {
                self.engine.start()?;
                self.refresh_question();
            }
            SessionEvent::Select(key) => {
                if self.engine.select_option(key).is_some() {
                    self.refresh_question();
                }
            }
            SessionEvent::SetText(text) => {
                if self.engine.set_text_answer(text).is_some() {
                    self.refresh_question();
                }
            }
            SessionEvent::Next => match self.engine.advance() {
                Advance::Moved => self.refresh_question(),
                Advance::Finished => self.show_results(),
                Advance::Inactive => {}
            },
            SessionEvent::Previous => {
                if self.engine.retreat() {
                    self.refresh_question();
                }
            }
            SessionEvent::ExportRequest => {
                let transcript = Transcript {
                    filename: self.exporter.filename().to_string(),
                    text: self.exporter.render(
                        &self.title,
                        self.engine.question_set(),
                        self.engine.answers(),
                    ),
                };
                self.presenter.deliver_transcript(&transcript);
            }
            SessionEvent::Restart => {
                self.engine.restart();
                self.presenter.update_progress(&self.engine.progress());
                self.presenter.show_start();
            }
        }
        Ok(())
    }

    fn refresh_question(&mut self) {
        if let Some(view) = QuestionView::from_engine(&self.engine) {
            self.presenter.show_question(&view);
        }
        self.presenter
            .update_navigation(&NavState::from(self.engine.state()));
        self.presenter.update_progress(&self.engine.progress());
        self.presenter.update_counter(&self.engine.counter());
    }

    // The results decision lives here, not in the engine: `Finished` is
    // just a signal.
    fn show_results(&mut self) {
        let view = ResultsView::build(self.engine.question_set(), self.engine.answers());
        self.presenter.update_progress(&self.engine.progress());
        self.presenter.show_results(&view);
    }

    #[must_use]
    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
