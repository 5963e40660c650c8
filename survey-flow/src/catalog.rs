use std::collections::{HashMap, HashSet};

use survey_flow_types::{
    AspectTarget, NumericCondition, Page, Question, QuestionKind, Scale, SurveyDocument,
};
use tracing::warn;

/// Widest scale a likert question may declare, counting both ends.
pub const MAX_SCALE_STEPS: u64 = 100;

/// Error type for catalogs that violate the branching invariants.
///
/// All of these are configuration errors: a survey must not start on a catalog
/// that produces one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("The survey has no questions")]
    Empty,

    #[error("Question at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("Question id '{id}' is used at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("Question '{question}' has no answer options")]
    NoOptions { question: String },

    #[error("Question '{question}' lists option '{option}' more than once")]
    DuplicateOption { question: String, option: String },

    #[error("Question '{question}' has no aspects")]
    NoAspects { question: String },

    #[error("Question '{question}' lists aspect '{aspect}' more than once")]
    DuplicateAspect { question: String, aspect: String },

    #[error("Question '{question}' has a rule on unknown aspect '{aspect}'")]
    UnknownAspect { question: String, aspect: String },

    #[error("Question '{question}' jumps to unknown question '{target}'")]
    DanglingTarget { question: String, target: String },

    #[error("Question '{question}' has an empty scale ({min} > {max})")]
    InvalidScale { question: String, min: i64, max: i64 },

    #[error(
        "Question '{question}' has a scale of {steps} steps, at most {max} are allowed",
        max = MAX_SCALE_STEPS
    )]
    ScaleTooWide { question: String, steps: u64 },

    #[error("Question '{question}' has a 'between' rule with min {min} > max {max}")]
    InvalidRange { question: String, min: i64, max: i64 },

    #[error("Multiple-choice question '{question}' cannot branch (option '{option}' has a goto)")]
    BranchingOnMultipleChoice { question: String, option: String },
}

/// A validated, immutable, ordered list of questions with an id index.
///
/// Every non-empty jump target in a catalog names a question of the same catalog,
/// so resolution never has to deal with dangling references.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    index: HashMap<String, usize>,
    branching: bool,
    cover: Option<Page>,
    thank_you: Option<Page>,
}

impl Catalog {
    /// Index and validate `questions`.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let index = build_index(&questions).inspect_err(|err| {
            warn!(%err, "rejecting survey catalog");
        })?;
        for question in &questions {
            validate_question(question, &index).inspect_err(|err| {
                warn!(question = question.id(), %err, "rejecting survey catalog");
            })?;
        }
        let branching = questions.iter().any(|q| q.kind().has_branching());

        Ok(Self {
            questions,
            index,
            branching,
            cover: None,
            thank_you: None,
        })
    }

    /// Validate a loaded document, keeping its cover and thank-you pages.
    pub fn from_document(document: SurveyDocument) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(document.questions)?;
        catalog.cover = document.cover;
        catalog.thank_you = document.thank_you;
        Ok(catalog)
    }

    /// Set the cover page.
    pub fn with_cover(mut self, cover: Page) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Set the thank-you page.
    pub fn with_thank_you(mut self, thank_you: Page) -> Self {
        self.thank_you = Some(thank_you);
        self
    }

    /// Position of the question with this id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Question at a catalog position.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Question with this id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    /// All questions in catalog order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions. Never zero.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; an empty catalog is rejected by [`Catalog::new`].
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// True when any question can leave default progression.
    ///
    /// Hosts use this to decide whether "question N of M" is meaningful.
    pub fn has_conditional_logic(&self) -> bool {
        self.branching
    }

    pub fn cover(&self) -> Option<&Page> {
        self.cover.as_ref()
    }

    pub fn thank_you(&self) -> Option<&Page> {
        self.thank_you.as_ref()
    }
}

fn build_index(questions: &[Question]) -> Result<HashMap<String, usize>, CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut index = HashMap::with_capacity(questions.len());
    for (position, question) in questions.iter().enumerate() {
        if question.id().is_empty() {
            return Err(CatalogError::EmptyId { index: position });
        }
        if let Some(first) = index.insert(question.id().to_string(), position) {
            return Err(CatalogError::DuplicateId {
                id: question.id().to_string(),
                first,
                second: position,
            });
        }
    }
    Ok(index)
}

fn validate_question(
    question: &Question,
    index: &HashMap<String, usize>,
) -> Result<(), CatalogError> {
    let id = question.id();
    let check_target = |target: &str| {
        if index.contains_key(target) {
            Ok(())
        } else {
            Err(CatalogError::DanglingTarget {
                question: id.to_string(),
                target: target.to_string(),
            })
        }
    };

    match question.kind() {
        QuestionKind::SingleChoice(choice)
        | QuestionKind::YesNo(choice)
        | QuestionKind::MultipleChoice(choice) => {
            if choice.answers.is_empty() {
                return Err(CatalogError::NoOptions {
                    question: id.to_string(),
                });
            }
            let multiple = matches!(question.kind(), QuestionKind::MultipleChoice(_));
            let mut seen = HashSet::new();
            for (position, option) in choice.answers.iter().enumerate() {
                let key = option.key(position);
                if !seen.insert(key.clone()) {
                    return Err(CatalogError::DuplicateOption {
                        question: id.to_string(),
                        option: key,
                    });
                }
                if let Some(target) = option.target() {
                    if multiple {
                        return Err(CatalogError::BranchingOnMultipleChoice {
                            question: id.to_string(),
                            option: key,
                        });
                    }
                    check_target(target)?;
                }
            }
        }
        QuestionKind::LikertScale(likert) => {
            check_scale(id, &likert.scale)?;
            for rule in &likert.logic {
                check_range(id, &rule.when)?;
                check_target(&rule.goto)?;
            }
        }
        QuestionKind::MultiLikert(multi) => {
            if multi.aspects.is_empty() {
                return Err(CatalogError::NoAspects {
                    question: id.to_string(),
                });
            }
            let mut seen = HashSet::new();
            for aspect in &multi.aspects {
                if !seen.insert(aspect.id.as_str()) {
                    return Err(CatalogError::DuplicateAspect {
                        question: id.to_string(),
                        aspect: aspect.id.clone(),
                    });
                }
            }
            check_scale(id, &multi.scale)?;
            for rule in &multi.logic {
                if let AspectTarget::Named(aspect) = &rule.when.aspect
                    && !multi.has_aspect(aspect)
                {
                    return Err(CatalogError::UnknownAspect {
                        question: id.to_string(),
                        aspect: aspect.clone(),
                    });
                }
                check_range(id, &rule.when.comparison)?;
                check_target(&rule.goto)?;
            }
        }
        QuestionKind::OpenText(text) => {
            for rule in &text.logic {
                check_target(&rule.goto)?;
            }
        }
    }
    Ok(())
}

fn check_scale(question: &str, scale: &Scale) -> Result<(), CatalogError> {
    if scale.min > scale.max {
        return Err(CatalogError::InvalidScale {
            question: question.to_string(),
            min: scale.min,
            max: scale.max,
        });
    }
    let steps = scale.max.abs_diff(scale.min).saturating_add(1);
    if steps > MAX_SCALE_STEPS {
        return Err(CatalogError::ScaleTooWide {
            question: question.to_string(),
            steps,
        });
    }
    Ok(())
}

fn check_range(
    question: &str,
    condition: &NumericCondition,
) -> Result<(), CatalogError> {
    if let NumericCondition::Between { min, max } = *condition
        && min > max
    {
        return Err(CatalogError::InvalidRange {
            question: question.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
