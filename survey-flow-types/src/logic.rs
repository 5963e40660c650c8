use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConditionError;

/// The aspect name that makes a multi-aspect rule match on any aspect.
pub const WILDCARD_ASPECT: &str = "*";

/// A condition plus the question to jump to when it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicRule<C> {
    /// The condition tested against the answer.
    pub when: C,

    /// Target question id.
    pub goto: String,
}

impl<C> LogicRule<C> {
    /// Create a new rule.
    pub fn new(when: C, goto: impl Into<String>) -> Self {
        Self {
            when,
            goto: goto.into(),
        }
    }
}

/// Rule attached to a likert scale question.
pub type ScaleRule = LogicRule<NumericCondition>;

/// Rule attached to a multi-aspect likert question.
pub type AspectRule = LogicRule<AspectCondition>;

/// Rule attached to an open text question.
pub type TextRule = LogicRule<TextCondition>;

/// Integer comparison against a scale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub enum NumericCondition {
    /// `<=`
    AtMost(i64),
    /// `<`
    Below(i64),
    /// `>=`
    AtLeast(i64),
    /// `>`
    Above(i64),
    /// `==`
    Equals(i64),
    /// `between`, inclusive on both ends.
    Between { min: i64, max: i64 },
}

impl NumericCondition {
    /// Check whether `value` satisfies this comparison.
    pub fn test(&self, value: i64) -> bool {
        match *self {
            Self::AtMost(v) => value <= v,
            Self::Below(v) => value < v,
            Self::AtLeast(v) => value >= v,
            Self::Above(v) => value > v,
            Self::Equals(v) => value == v,
            Self::Between { min, max } => min <= value && value <= max,
        }
    }

    /// The operator as written in survey documents.
    pub fn op(&self) -> &'static str {
        match self {
            Self::AtMost(_) => "<=",
            Self::Below(_) => "<",
            Self::AtLeast(_) => ">=",
            Self::Above(_) => ">",
            Self::Equals(_) => "==",
            Self::Between { .. } => "between",
        }
    }

    fn parse(raw: &RawCondition) -> Result<Self, ConditionError> {
        let value = |op: &str| {
            raw.value.ok_or_else(|| ConditionError::MissingOperand {
                op: op.to_string(),
                field: "value",
            })
        };
        let op = raw.op.as_str();
        Ok(match op {
            "<=" => Self::AtMost(value(op)?),
            "<" => Self::Below(value(op)?),
            ">=" => Self::AtLeast(value(op)?),
            ">" => Self::Above(value(op)?),
            "==" => Self::Equals(value(op)?),
            "between" => {
                let operand = |v: Option<i64>, field| {
                    v.ok_or_else(|| ConditionError::MissingOperand {
                        op: op.to_string(),
                        field,
                    })
                };
                Self::Between {
                    min: operand(raw.min, "min")?,
                    max: operand(raw.max, "max")?,
                }
            }
            other => return Err(ConditionError::UnknownOperator(other.to_string())),
        })
    }

    fn to_raw(self, aspect: Option<String>) -> RawCondition {
        let mut raw = RawCondition {
            op: self.op().to_string(),
            aspect,
            ..RawCondition::default()
        };
        match self {
            Self::Between { min, max } => {
                raw.min = Some(min);
                raw.max = Some(max);
            }
            Self::AtMost(v) | Self::Below(v) | Self::AtLeast(v) | Self::Above(v) | Self::Equals(v) => {
                raw.value = Some(v);
            }
        }
        raw
    }
}

impl fmt::Display for NumericCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Between { min, max } => write!(f, "between {min} and {max}"),
            Self::AtMost(v) | Self::Below(v) | Self::AtLeast(v) | Self::Above(v) | Self::Equals(v) => {
                write!(f, "{} {v}", self.op())
            }
        }
    }
}

/// Which aspect of a multi-aspect answer a rule looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AspectTarget {
    /// Matches when any aspect satisfies the comparison (`"*"`).
    Any,
    /// Matches only on the named aspect id.
    Named(String),
}

impl AspectTarget {
    fn as_str(&self) -> &str {
        match self {
            Self::Any => WILDCARD_ASPECT,
            Self::Named(id) => id,
        }
    }
}

impl From<&str> for AspectTarget {
    fn from(s: &str) -> Self {
        if s == WILDCARD_ASPECT {
            Self::Any
        } else {
            Self::Named(s.to_string())
        }
    }
}

/// Numeric comparison against one aspect, or any aspect, of a multi-aspect answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct AspectCondition {
    pub aspect: AspectTarget,
    pub comparison: NumericCondition,
}

impl AspectCondition {
    /// Condition that holds when any aspect satisfies `comparison`.
    pub fn any(comparison: NumericCondition) -> Self {
        Self {
            aspect: AspectTarget::Any,
            comparison,
        }
    }

    /// Condition on a single named aspect.
    pub fn named(aspect: impl Into<String>, comparison: NumericCondition) -> Self {
        Self {
            aspect: AspectTarget::Named(aspect.into()),
            comparison,
        }
    }
}

impl fmt::Display for AspectCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.aspect.as_str(), self.comparison)
    }
}

/// Emptiness test on an open text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub enum TextCondition {
    /// No answer, or only whitespace.
    Empty,
    /// Anything that is not `Empty`.
    NotEmpty,
}

impl fmt::Display for TextCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::NotEmpty => "not_empty",
        })
    }
}

/// The flat `when` object as it appears in survey documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawCondition {
    op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<i64>,
}

impl TryFrom<RawCondition> for NumericCondition {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        if raw.aspect.is_some() {
            return Err(ConditionError::UnexpectedAspect);
        }
        Self::parse(&raw)
    }
}

impl From<NumericCondition> for RawCondition {
    fn from(condition: NumericCondition) -> Self {
        condition.to_raw(None)
    }
}

impl TryFrom<RawCondition> for AspectCondition {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let aspect = raw
            .aspect
            .as_deref()
            .map(AspectTarget::from)
            .ok_or(ConditionError::MissingAspect)?;
        Ok(Self {
            aspect,
            comparison: NumericCondition::parse(&raw)?,
        })
    }
}

impl From<AspectCondition> for RawCondition {
    fn from(condition: AspectCondition) -> Self {
        condition
            .comparison
            .to_raw(Some(condition.aspect.as_str().to_string()))
    }
}

impl TryFrom<RawCondition> for TextCondition {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        if raw.aspect.is_some() {
            return Err(ConditionError::UnexpectedAspect);
        }
        match raw.op.as_str() {
            "empty" => Ok(Self::Empty),
            "not_empty" => Ok(Self::NotEmpty),
            other => Err(ConditionError::UnknownOperator(other.to_string())),
        }
    }
}

impl From<TextCondition> for RawCondition {
    fn from(condition: TextCondition) -> Self {
        RawCondition {
            op: condition.to_string(),
            ..RawCondition::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_comparisons() {
        assert!(NumericCondition::AtMost(2).test(2));
        assert!(!NumericCondition::Below(2).test(2));
        assert!(NumericCondition::AtLeast(4).test(5));
        assert!(!NumericCondition::Above(5).test(5));
        assert!(NumericCondition::Equals(3).test(3));
    }

    #[test]
    fn between_is_inclusive() {
        let between = NumericCondition::Between { min: 2, max: 4 };
        assert!(between.test(2));
        assert!(between.test(4));
        assert!(!between.test(1));
        assert!(!between.test(5));
    }

    #[test]
    fn parse_scale_rule() {
        let rule: ScaleRule =
            serde_json::from_str(r#"{ "when": { "op": "<=", "value": 2 }, "goto": "q5" }"#)
                .unwrap();
        assert_eq!(rule, ScaleRule::new(NumericCondition::AtMost(2), "q5"));
    }

    #[test]
    fn parse_between() {
        let condition: NumericCondition =
            serde_json::from_str(r#"{ "op": "between", "min": 1, "max": 3 }"#).unwrap();
        assert_eq!(condition, NumericCondition::Between { min: 1, max: 3 });
    }

    #[test]
    fn parse_wildcard_aspect() {
        let condition: AspectCondition =
            serde_json::from_str(r#"{ "aspect": "*", "op": "<=", "value": 2 }"#).unwrap();
        assert_eq!(condition, AspectCondition::any(NumericCondition::AtMost(2)));

        let condition: AspectCondition =
            serde_json::from_str(r#"{ "aspect": "forma", "op": ">", "value": 3 }"#).unwrap();
        assert_eq!(
            condition,
            AspectCondition::named("forma", NumericCondition::Above(3))
        );
    }

    #[test]
    fn aspect_rule_requires_aspect() {
        let err = serde_json::from_str::<AspectCondition>(r#"{ "op": "<=", "value": 2 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("aspect"));
    }

    #[test]
    fn missing_operand_is_rejected() {
        let err = serde_json::from_str::<NumericCondition>(r#"{ "op": "between", "min": 1 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("'max'"));
    }

    #[test]
    fn text_conditions() {
        let empty: TextCondition = serde_json::from_str(r#"{ "op": "empty" }"#).unwrap();
        assert_eq!(empty, TextCondition::Empty);
        assert!(serde_json::from_str::<TextCondition>(r#"{ "op": "<=" }"#).is_err());
        assert_eq!(
            serde_json::to_string(&TextCondition::NotEmpty).unwrap(),
            r#"{"op":"not_empty"}"#
        );
    }

    #[test]
    fn display() {
        assert_eq!(NumericCondition::AtLeast(4).to_string(), ">= 4");
        assert_eq!(
            AspectCondition::any(NumericCondition::Between { min: 1, max: 2 }).to_string(),
            "* between 1 and 2"
        );
    }
}
