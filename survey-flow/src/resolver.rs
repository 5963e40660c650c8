//! Next-question resolution.
//!
//! Resolution is a pure function of the catalog, the position of the question
//! just answered and the answer. Priorities, first decision wins:
//! 1. the `goto` of the picked option (single choice and yes/no),
//! 2. the first matching logic rule (likert, multi-aspect likert, open text),
//! 3. the next question in catalog order,
//! 4. the end of the survey.

use survey_flow_types::{AnswerValue, QuestionKind};
use tracing::debug;

use crate::Catalog;
use crate::rules::first_match;

/// Where to go after a question has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Show the question with this id.
    Goto(String),

    /// The survey is complete.
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Question index {index} is out of range for a catalog of {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Decide which question follows the one at `current`, given its `answer`.
pub fn resolve_next(
    catalog: &Catalog,
    current: usize,
    answer: &AnswerValue,
) -> Result<NextOutcome, ResolveError> {
    let question = catalog.get(current).ok_or(ResolveError::IndexOutOfRange {
        index: current,
        len: catalog.len(),
    })?;

    if let Some(target) = option_target(question.kind(), answer) {
        debug!(question = question.id(), target, "option goto");
        return Ok(NextOutcome::Goto(target.to_string()));
    }

    if let Some(target) = rule_target(question.kind(), answer) {
        debug!(question = question.id(), target, "logic rule matched");
        return Ok(NextOutcome::Goto(target.to_string()));
    }

    match catalog.get(current + 1) {
        Some(next) => {
            debug!(question = question.id(), target = next.id(), "default progression");
            Ok(NextOutcome::Goto(next.id().to_string()))
        }
        None => {
            debug!(question = question.id(), "end of survey");
            Ok(NextOutcome::End)
        }
    }
}

/// The non-empty `goto` of the picked option. An empty `goto` makes no decision.
fn option_target<'q>(kind: &'q QuestionKind, answer: &AnswerValue) -> Option<&'q str> {
    let (QuestionKind::SingleChoice(choice) | QuestionKind::YesNo(choice)) = kind else {
        return None;
    };
    let picked = answer.as_text().filter(|text| !text.trim().is_empty())?;
    choice
        .answers
        .iter()
        .enumerate()
        .find(|(index, option)| option.key(*index) == picked)
        .and_then(|(_, option)| option.target())
}

fn rule_target<'q>(kind: &'q QuestionKind, answer: &AnswerValue) -> Option<&'q str> {
    let target = match kind {
        QuestionKind::LikertScale(likert) => &first_match(&likert.logic, answer)?.goto,
        QuestionKind::MultiLikert(multi) => &first_match(&multi.logic, answer)?.goto,
        QuestionKind::OpenText(text) => &first_match(&text.logic, answer)?.goto,
        QuestionKind::SingleChoice(_) | QuestionKind::MultipleChoice(_) | QuestionKind::YesNo(_) => {
            return None;
        }
    };
    Some(target)
}
