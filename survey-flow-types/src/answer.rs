use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single answer value reported by a renderer for the question on screen.
///
/// Scale values are kept as the text the user picked or typed; numeric rules
/// parse them on demand so an unparseable value simply fails to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// No answer at all (skipped optional question).
    #[default]
    None,

    /// An option id, a scale value, or free text.
    Text(String),

    /// Option ids picked on a multi-select question.
    Selection(Vec<String>),

    /// Scale value per aspect id on a multi-aspect likert question.
    Aspects(BTreeMap<String, String>),
}

impl AnswerValue {
    /// Build an aspect map from `(aspect id, value)` pairs.
    pub fn aspects<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        Self::Aspects(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// Try to get this value as a string reference.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a list of selected option ids.
    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            Self::Selection(ids) => Some(ids),
            _ => None,
        }
    }

    /// Try to get this value as an aspect map.
    pub fn as_aspects(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Aspects(map) => Some(map),
            _ => None,
        }
    }

    /// Parse a text answer as an integer, ignoring surrounding whitespace.
    pub fn as_int(&self) -> Option<i64> {
        self.as_text().and_then(|s| s.trim().parse().ok())
    }

    /// True for no answer, whitespace-only text, an empty selection or an empty aspect map.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Selection(ids) => ids.is_empty(),
            Self::Aspects(map) => map.is_empty(),
        }
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Text(_) => "Text",
            Self::Selection(_) => "Selection",
            Self::Aspects(_) => "Aspects",
        }
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(i: i64) -> Self {
        Self::Text(i.to_string())
    }
}

impl From<i32> for AnswerValue {
    fn from(i: i32) -> Self {
        Self::Text(i.to_string())
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(ids: Vec<String>) -> Self {
        Self::Selection(ids)
    }
}

impl From<BTreeMap<String, String>> for AnswerValue {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Aspects(map)
    }
}

impl<T: Into<AnswerValue>> From<Option<T>> for AnswerValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(AnswerValue::None.is_blank());
        assert!(AnswerValue::from("").is_blank());
        assert!(AnswerValue::from(" \t\n").is_blank());
        assert!(!AnswerValue::from("ok").is_blank());
        assert!(AnswerValue::Selection(vec![]).is_blank());
        assert!(!AnswerValue::aspects([("forma", 3)]).is_blank());
    }

    #[test]
    fn int_parsing_trims_and_rejects_garbage() {
        assert_eq!(AnswerValue::from(" 4 ").as_int(), Some(4));
        assert_eq!(AnswerValue::from("-2").as_int(), Some(-2));
        assert_eq!(AnswerValue::from("four").as_int(), None);
        assert_eq!(AnswerValue::None.as_int(), None);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&AnswerValue::aspects([("b", 2), ("a", 1)])).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        assert_eq!(serde_json::to_string(&AnswerValue::None).unwrap(), "null");
        assert_eq!(
            serde_json::from_str::<AnswerValue>(r#"["x","y"]"#).unwrap(),
            AnswerValue::Selection(vec!["x".into(), "y".into()])
        );
    }
}
