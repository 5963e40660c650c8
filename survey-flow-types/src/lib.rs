//! Core types for the survey-flow crate.
//!
//! This crate provides the foundational types for defining branching surveys:
//! - `SurveyDocument` and `Page` - The loadable survey structure
//! - `Question` and `QuestionKind` - Individual questions and their types
//! - `LogicRule` and the condition types - Per-question branching rules
//! - `AnswerValue` and `AnswerRecord` - What the user answered, and in which order

mod answer;
pub use answer::AnswerValue;

mod record;
pub use record::AnswerRecord;

mod logic;
pub use logic::{
    AspectCondition, AspectRule, AspectTarget, LogicRule, NumericCondition, ScaleRule,
    TextCondition, TextRule, WILDCARD_ASPECT,
};

mod question;
pub use question::{
    AnswerOption, Aspect, ChoiceQuestion, LikertQuestion, MultiLikertQuestion, OpenTextQuestion,
    Question, QuestionKind, QuestionType, Scale, ScaleLabels,
};

mod document;
pub use document::{Page, SurveyDocument};

mod error;
pub use error::ConditionError;
