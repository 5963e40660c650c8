use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{AspectRule, ScaleRule, TextRule};

/// A single question in a survey catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique across the catalog. Targets of `goto` refer to it.
    id: String,

    /// Whether a blank answer is rejected.
    #[serde(default)]
    required: bool,

    /// The prompt text shown to the user.
    title: String,

    /// Optional explanatory text shown under the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// The kind of question, with its type-specific payload.
    #[serde(flatten)]
    kind: QuestionKind,
}

impl Question {
    /// Create a new optional question.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            required: false,
            title: title.into(),
            description: None,
            kind,
        }
    }

    /// Mark this question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the prompt text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check if a blank answer should be rejected.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get the type tag of this question.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }
}

/// The kind of question, determining input type and which branching data applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option; options may carry a `goto`.
    SingleChoice(ChoiceQuestion),

    /// Pick any number of options. No branching.
    MultipleChoice(ChoiceQuestion),

    /// Pick one value on a numeric scale; may carry scale rules.
    LikertScale(LikertQuestion),

    /// Rate several aspects on one shared scale; may carry aspect rules.
    MultiLikert(MultiLikertQuestion),

    /// Yes or no, as two options that may carry a `goto`.
    YesNo(ChoiceQuestion),

    /// Free text; may carry emptiness rules.
    OpenText(OpenTextQuestion),
}

impl QuestionKind {
    /// Get the type tag for this kind.
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::SingleChoice(_) => QuestionType::SingleChoice,
            Self::MultipleChoice(_) => QuestionType::MultipleChoice,
            Self::LikertScale(_) => QuestionType::LikertScale,
            Self::MultiLikert(_) => QuestionType::MultiLikert,
            Self::YesNo(_) => QuestionType::YesNo,
            Self::OpenText(_) => QuestionType::OpenText,
        }
    }

    /// The answer options, for the kinds that have them.
    pub fn options(&self) -> &[AnswerOption] {
        match self {
            Self::SingleChoice(q) | Self::MultipleChoice(q) | Self::YesNo(q) => &q.answers,
            Self::LikertScale(_) | Self::MultiLikert(_) | Self::OpenText(_) => &[],
        }
    }

    /// Check whether this question can change the default progression.
    pub fn has_branching(&self) -> bool {
        match self {
            Self::SingleChoice(q) | Self::YesNo(q) => {
                q.answers.iter().any(|option| option.target().is_some())
            }
            Self::MultipleChoice(_) => false,
            Self::LikertScale(q) => !q.logic.is_empty(),
            Self::MultiLikert(q) => !q.logic.is_empty(),
            Self::OpenText(q) => !q.logic.is_empty(),
        }
    }
}

/// The type tag of a question, as written in survey documents and answer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    LikertScale,
    MultiLikert,
    YesNo,
    OpenText,
}

impl QuestionType {
    /// The tag as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultipleChoice => "multiple_choice",
            Self::LikertScale => "likert_scale",
            Self::MultiLikert => "multi_likert",
            Self::YesNo => "yes_no",
            Self::OpenText => "open_text",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of a single-choice, multiple-choice or yes/no question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    /// The options, in display order.
    pub answers: Vec<AnswerOption>,
}

impl ChoiceQuestion {
    /// Create a choice question with the given options.
    pub fn new(answers: Vec<AnswerOption>) -> Self {
        Self { answers }
    }

    /// The standard yes/no pair with ids `yes` and `no`.
    pub fn yes_no(yes_goto: Option<&str>, no_goto: Option<&str>) -> Self {
        let with = |option: AnswerOption, goto: Option<&str>| match goto {
            Some(target) => option.with_goto(target),
            None => option,
        };
        Self::new(vec![
            with(AnswerOption::new("yes", "Yes"), yes_goto),
            with(AnswerOption::new("no", "No"), no_goto),
        ])
    }

    /// Find the position of the option answering to `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.answers
            .iter()
            .enumerate()
            .position(|(index, option)| option.key(index) == key)
    }
}

/// A selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option id, unique within its question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display text.
    pub text: String,

    /// Question to jump to when this option is picked. Empty means "no jump".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<String>,
}

impl AnswerOption {
    /// Create an option with an id.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            goto: None,
        }
    }

    /// Create an option without an id; it is addressed by its position.
    pub fn unnamed(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            goto: None,
        }
    }

    /// Set the jump target.
    pub fn with_goto(mut self, target: impl Into<String>) -> Self {
        self.goto = Some(target.into());
        self
    }

    /// The key a renderer reports when this option at `index` is picked:
    /// the id, or the position as a decimal string when the id is missing or empty.
    pub fn key(&self, index: usize) -> String {
        self.id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| index.to_string())
    }

    /// The jump target, if set and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.goto.as_deref().filter(|target| !target.is_empty())
    }
}

/// A numeric rating range with optional labels at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub labels: ScaleLabels,
}

impl Scale {
    /// Create a scale without labels.
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            labels: ScaleLabels::default(),
        }
    }

    /// Set the boundary labels.
    pub fn with_labels(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.labels = ScaleLabels {
            min: Some(min.into()),
            max: Some(max.into()),
        };
        self
    }

    /// All selectable values.
    pub fn values(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }

    /// Check if `value` is on the scale.
    pub fn contains(&self, value: i64) -> bool {
        self.values().contains(&value)
    }
}

/// Labels shown at the ends of a scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// Configuration for a likert scale question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertQuestion {
    pub scale: Scale,

    /// Rules evaluated in order; the first match decides the next question.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logic: Vec<ScaleRule>,
}

impl LikertQuestion {
    /// Create a likert question without rules.
    pub fn new(scale: Scale) -> Self {
        Self {
            scale,
            logic: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: ScaleRule) -> Self {
        self.logic.push(rule);
        self
    }
}

/// One rated aspect of a multi-aspect likert question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspect {
    pub id: String,
    pub name: String,
}

impl Aspect {
    /// Create a new aspect.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Configuration for a multi-aspect likert question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLikertQuestion {
    pub aspects: Vec<Aspect>,

    /// Shared by all aspects.
    pub scale: Scale,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logic: Vec<AspectRule>,
}

impl MultiLikertQuestion {
    /// Create a multi-aspect question without rules.
    pub fn new(aspects: Vec<Aspect>, scale: Scale) -> Self {
        Self {
            aspects,
            scale,
            logic: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: AspectRule) -> Self {
        self.logic.push(rule);
        self
    }

    /// Check if the question declares an aspect with this id.
    pub fn has_aspect(&self, id: &str) -> bool {
        self.aspects.iter().any(|aspect| aspect.id == id)
    }
}

/// Configuration for an open text question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTextQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logic: Vec<TextRule>,
}

impl OpenTextQuestion {
    /// Create an open text question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: TextRule) -> Self {
        self.logic.push(rule);
        self
    }
}
