use serde::{Deserialize, Serialize};

use crate::{AnswerValue, Question, QuestionType};

/// One confirmed answer, as kept in a session and handed to the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub answer: AnswerValue,
    pub question_type: QuestionType,
}

impl AnswerRecord {
    /// Record `answer` as given to `question`.
    pub fn new(question: &Question, answer: AnswerValue) -> Self {
        Self {
            question_id: question.id().to_string(),
            answer,
            question_type: question.question_type(),
        }
    }
}
