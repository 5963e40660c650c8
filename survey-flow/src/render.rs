use survey_flow_types::{AnswerValue, Page, Question};

use crate::ValidationError;

/// "Question N of M", only offered when the catalog cannot branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// What a renderer needs to show one question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    pub question: &'a Question,

    /// Answer to pre-fill after the user went back to this question.
    pub prior_answer: Option<&'a AnswerValue>,

    /// 1-based number of this question among the visited ones.
    pub position: usize,

    pub progress: Option<Progress>,

    /// Whether a "back" action should be offered.
    pub can_go_back: bool,
}

/// What the user did with a rendered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Confirm an answer.
    Answer(AnswerValue),

    /// Return to the previous question.
    Back,
}

impl Interaction {
    /// Shorthand for `Interaction::Answer(value.into())`.
    pub fn answer(value: impl Into<AnswerValue>) -> Self {
        Self::Answer(value.into())
    }
}

/// Trait for host UIs that show questions and report answers.
///
/// Renderers only present things; branching and validation stay in the
/// [`Session`](crate::Session) driven by [`run`](crate::run).
pub trait Renderer {
    /// The error type for this renderer.
    type Error: Into<anyhow::Error>;

    /// Show a question and wait for the user to answer it or go back.
    fn render(&mut self, view: &QuestionView<'_>) -> Result<Interaction, Self::Error>;

    /// Show the cover page before the first question.
    fn show_cover(&mut self, _page: &Page) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Show the thank-you page after the last answer.
    fn show_thank_you(&mut self, _page: &Page) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Tell the user why their answer was refused. The same question is rendered again afterwards.
    fn show_validation_error(
        &mut self,
        _view: &QuestionView<'_>,
        _error: &ValidationError,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
