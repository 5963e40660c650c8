//! Scripted renderer for running surveys without user interaction.
//!
//! `ScriptedRenderer` replays a fixed list of interactions, one per rendered
//! question. This is useful for tests and for hosts that already hold the
//! answers.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_flow::{Catalog, ScriptedRenderer, run};
//!
//! let mut renderer = ScriptedRenderer::new()
//!     .with_answer("yes")
//!     .with_back()
//!     .with_answer("no")
//!     .with_answer("Nothing to add");
//!
//! let session = run(&catalog, &mut renderer).unwrap();
//! assert!(session.is_complete());
//! ```

use std::collections::VecDeque;

use survey_flow_types::{AnswerValue, Page};

use crate::ValidationError;
use crate::render::{Interaction, QuestionView, Renderer};

/// A renderer that returns pre-configured interactions in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRenderer {
    script: VecDeque<Interaction>,
    shown: Vec<String>,
    rejections: Vec<ValidationError>,
    pages: Vec<String>,
    strict: bool,
}

/// Error type for ScriptedRenderer.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Script ran out of interactions at question '{0}'")]
    Exhausted(String),

    #[error("Answer for '{question}' was refused: {message}")]
    Rejected { question: String, message: String },
}

impl ScriptedRenderer {
    /// Create a renderer with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on the first refused answer instead of moving on to the next scripted one.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Append an interaction.
    pub fn with(mut self, interaction: Interaction) -> Self {
        self.script.push_back(interaction);
        self
    }

    /// Append an answer.
    pub fn with_answer(self, value: impl Into<AnswerValue>) -> Self {
        self.with(Interaction::answer(value))
    }

    /// Append a "back" action.
    pub fn with_back(self) -> Self {
        self.with(Interaction::Back)
    }

    /// Append several answers at once.
    pub fn with_answers<V: Into<AnswerValue>>(self, values: impl IntoIterator<Item = V>) -> Self {
        values.into_iter().fold(self, Self::with_answer)
    }

    /// Ids of the questions rendered so far, in order.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Answers refused so far.
    pub fn rejections(&self) -> &[ValidationError] {
        &self.rejections
    }

    /// Titles of the cover and thank-you pages shown so far.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Number of interactions not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Renderer for ScriptedRenderer {
    type Error = ScriptError;

    fn render(&mut self, view: &QuestionView<'_>) -> Result<Interaction, Self::Error> {
        let id = view.question.id().to_string();
        self.shown.push(id.clone());
        self.script.pop_front().ok_or(ScriptError::Exhausted(id))
    }

    fn show_cover(&mut self, page: &Page) -> Result<(), Self::Error> {
        self.pages.push(page.title.clone());
        Ok(())
    }

    fn show_thank_you(&mut self, page: &Page) -> Result<(), Self::Error> {
        self.pages.push(page.title.clone());
        Ok(())
    }

    fn show_validation_error(
        &mut self,
        view: &QuestionView<'_>,
        error: &ValidationError,
    ) -> Result<(), Self::Error> {
        if self.strict {
            return Err(ScriptError::Rejected {
                question: view.question.id().to_string(),
                message: error.to_string(),
            });
        }
        self.rejections.push(error.clone());
        Ok(())
    }
}
