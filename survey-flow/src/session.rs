//! Session navigation: the visit stack, the answer records and backward navigation.

use chrono::{DateTime, Utc};
use survey_flow_types::{AnswerRecord, AnswerValue, Question, QuestionKind, Scale};
use tracing::{info, warn};

use crate::render::{Progress, QuestionView};
use crate::submission::{ClientMetadata, Submission};
use crate::{Catalog, NextOutcome, ResolveError, resolve_next};

/// Why an answer was refused. The session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This question requires an answer")]
    Required { question: String },

    #[error("'{option}' is not one of the available options")]
    UnknownOption { question: String, option: String },

    #[error("Expected a {expected} answer, got {actual}")]
    TypeMismatch {
        question: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{value} is outside the scale {min} to {max}")]
    OutOfScale {
        question: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("'{aspect}' is not an aspect of this question")]
    UnknownAspect { question: String, aspect: String },

    #[error("Please rate '{aspect}'")]
    MissingAspect { question: String, aspect: String },
}

impl ValidationError {
    /// Id of the question whose answer was refused.
    pub fn question(&self) -> &str {
        match self {
            Self::Required { question }
            | Self::UnknownOption { question, .. }
            | Self::TypeMismatch { question, .. }
            | Self::OutOfScale { question, .. }
            | Self::UnknownAspect { question, .. }
            | Self::MissingAspect { question, .. } => question,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The survey is already complete")]
    Complete,

    #[error("The survey is not complete yet")]
    NotComplete,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Question '{question}' resolved to unknown question '{target}'")]
    UnknownTarget { question: String, target: String },
}

impl SessionError {
    /// Check if the answer was refused and the user can simply try again.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result of a successful [`Session::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show the question at this catalog index.
    Question(usize),

    /// The last answer ended the survey.
    Complete,
}

/// Navigation state of one respondent going through a catalog.
///
/// The visit stack always holds at least the first question. While the survey
/// is running it holds one more entry than there are records (the question on
/// screen has no record yet); once complete the two have the same length.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    visited: Vec<usize>,
    records: Vec<AnswerRecord>,
    prior_answer: Option<AnswerValue>,
    complete: bool,
}

impl<'a> Session<'a> {
    /// Start a session on the first question of `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            visited: vec![0],
            records: Vec::new(),
            prior_answer: None,
            complete: false,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Catalog index of the question on screen (the last one, once complete).
    pub fn current_index(&self) -> usize {
        self.visited.last().copied().unwrap_or_default()
    }

    /// The question on screen, `None` once the survey is complete.
    pub fn current(&self) -> Option<&'a Question> {
        if self.complete {
            return None;
        }
        self.catalog.get(self.current_index())
    }

    /// 1-based number of the question on screen among the visited ones.
    pub fn position(&self) -> usize {
        self.visited.len()
    }

    /// Catalog indices in visit order.
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// Confirmed answers in visit order.
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// The answer given last time the current question was shown, after going back.
    pub fn prior_answer(&self) -> Option<&AnswerValue> {
        self.prior_answer.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether [`Session::go_back`] would do anything.
    pub fn can_go_back(&self) -> bool {
        self.complete || self.visited.len() > 1
    }

    /// Everything a renderer needs to show the current question.
    pub fn view(&self) -> Option<QuestionView<'_>> {
        let question = self.current()?;
        let progress = (!self.catalog.has_conditional_logic()).then(|| Progress {
            current: self.position(),
            total: self.catalog.len(),
        });

        Some(QuestionView {
            question,
            prior_answer: self.prior_answer.as_ref(),
            position: self.position(),
            progress,
            can_go_back: self.can_go_back(),
        })
    }

    /// Validate and record `answer` for the current question and move on.
    ///
    /// On any error the session is left exactly as it was.
    pub fn advance(&mut self, answer: impl Into<AnswerValue>) -> Result<Step, SessionError> {
        let answer = answer.into();
        let question = self.current().ok_or(SessionError::Complete)?;

        validate_answer(question, &answer).inspect_err(|err| {
            warn!(question = question.id(), %err, "answer rejected");
        })?;

        let current = self.current_index();
        let outcome = resolve_next(self.catalog, current, &answer)?;
        let next = match outcome {
            NextOutcome::Goto(target) => {
                Some(self.catalog.index_of(&target).ok_or_else(|| {
                    SessionError::UnknownTarget {
                        question: question.id().to_string(),
                        target,
                    }
                })?)
            }
            NextOutcome::End => None,
        };

        self.records.push(AnswerRecord::new(question, answer));
        self.prior_answer = None;

        match next {
            Some(index) => {
                self.visited.push(index);
                Ok(Step::Question(index))
            }
            None => {
                self.complete = true;
                info!(answers = self.records.len(), "survey complete");
                Ok(Step::Complete)
            }
        }
    }

    /// Return to the previously answered question, dropping its record.
    ///
    /// Returns `false` (and does nothing) on the first question. From a
    /// completed session this reopens the last answered question.
    pub fn go_back(&mut self) -> bool {
        if self.complete {
            self.complete = false;
        } else if self.visited.len() > 1 {
            self.visited.pop();
        } else {
            return false;
        }

        self.prior_answer = self.records.pop().map(|record| record.answer);
        true
    }

    /// Build the submission payload, stamped with the current time.
    pub fn submission(&self, client: ClientMetadata) -> Result<Submission, SessionError> {
        self.submission_at(client, Utc::now())
    }

    /// Build the submission payload with an explicit completion time.
    ///
    /// The session is not consumed, so a failed submission can be retried.
    pub fn submission_at(
        &self,
        client: ClientMetadata,
        completed_at: DateTime<Utc>,
    ) -> Result<Submission, SessionError> {
        if !self.complete {
            return Err(SessionError::NotComplete);
        }
        Ok(Submission {
            answers: self.records.clone(),
            total_questions: self.visited.len(),
            client,
            completed_at,
        })
    }
}

/// Check an answer against the question it is given for.
pub fn validate_answer(question: &Question, answer: &AnswerValue) -> Result<(), ValidationError> {
    let id = question.id();
    if question.is_required() && answer.is_blank() {
        return Err(ValidationError::Required {
            question: id.to_string(),
        });
    }
    if matches!(answer, AnswerValue::None) {
        return Ok(());
    }

    let mismatch = |expected| ValidationError::TypeMismatch {
        question: id.to_string(),
        expected,
        actual: answer.type_name(),
    };

    match question.kind() {
        QuestionKind::SingleChoice(choice) | QuestionKind::YesNo(choice) => {
            let picked = answer.as_text().ok_or_else(|| mismatch("Text"))?;
            if !picked.trim().is_empty() && choice.position(picked).is_none() {
                return Err(ValidationError::UnknownOption {
                    question: id.to_string(),
                    option: picked.to_string(),
                });
            }
        }
        QuestionKind::MultipleChoice(choice) => {
            let picked = answer.as_selection().ok_or_else(|| mismatch("Selection"))?;
            if let Some(unknown) = picked.iter().find(|key| choice.position(key).is_none()) {
                return Err(ValidationError::UnknownOption {
                    question: id.to_string(),
                    option: unknown.clone(),
                });
            }
        }
        QuestionKind::LikertScale(likert) => {
            answer.as_text().ok_or_else(|| mismatch("Text"))?;
            if let Some(value) = answer.as_int() {
                check_scale(id, &likert.scale, value)?;
            }
        }
        QuestionKind::MultiLikert(multi) => {
            let values = answer.as_aspects().ok_or_else(|| mismatch("Aspects"))?;
            if let Some(unknown) = values.keys().find(|key| !multi.has_aspect(key)) {
                return Err(ValidationError::UnknownAspect {
                    question: id.to_string(),
                    aspect: unknown.clone(),
                });
            }
            for (aspect, raw) in values {
                if let Ok(value) = raw.trim().parse::<i64>() {
                    check_scale(id, &multi.scale, value)?;
                } else if raw.trim().is_empty() && question.is_required() {
                    return Err(ValidationError::MissingAspect {
                        question: id.to_string(),
                        aspect: aspect.clone(),
                    });
                }
            }
            if question.is_required()
                && let Some(missing) = multi.aspects.iter().find(|a| !values.contains_key(&a.id))
            {
                return Err(ValidationError::MissingAspect {
                    question: id.to_string(),
                    aspect: missing.id.clone(),
                });
            }
        }
        QuestionKind::OpenText(_) => {
            answer.as_text().ok_or_else(|| mismatch("Text"))?;
        }
    }
    Ok(())
}

fn check_scale(question: &str, scale: &Scale, value: i64) -> Result<(), ValidationError> {
    if scale.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfScale {
            question: question.to_string(),
            value,
            min: scale.min,
            max: scale.max,
        })
    }
}
