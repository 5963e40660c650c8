//! Evaluation of logic rule conditions against answers.

use survey_flow_types::{
    AnswerValue, AspectCondition, AspectTarget, LogicRule, NumericCondition, TextCondition,
};

/// A rule condition that can be tested against an answer.
///
/// Conditions never fail: an answer of the wrong shape, or a value that does
/// not parse as an integer, simply does not match.
pub trait Condition {
    fn matches(&self, answer: &AnswerValue) -> bool;
}

impl Condition for NumericCondition {
    fn matches(&self, answer: &AnswerValue) -> bool {
        answer.as_int().is_some_and(|value| self.test(value))
    }
}

impl Condition for AspectCondition {
    fn matches(&self, answer: &AnswerValue) -> bool {
        let Some(values) = answer.as_aspects() else {
            return false;
        };
        let satisfies = |raw: &String| {
            raw.trim()
                .parse::<i64>()
                .is_ok_and(|value| self.comparison.test(value))
        };

        match &self.aspect {
            AspectTarget::Any => values.values().any(satisfies),
            AspectTarget::Named(id) => values.get(id).is_some_and(satisfies),
        }
    }
}

impl Condition for TextCondition {
    fn matches(&self, answer: &AnswerValue) -> bool {
        let empty = answer.is_blank();
        match self {
            Self::Empty => empty,
            Self::NotEmpty => !empty,
        }
    }
}

/// The first rule whose condition matches, in list order.
pub fn first_match<'r, C: Condition>(
    rules: &'r [LogicRule<C>],
    answer: &AnswerValue,
) -> Option<&'r LogicRule<C>> {
    rules.iter().find(|rule| rule.when.matches(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_flow_types::ScaleRule;

    #[test]
    fn numeric_needs_a_parseable_answer() {
        let at_most_two = NumericCondition::AtMost(2);
        assert!(at_most_two.matches(&"1".into()));
        assert!(at_most_two.matches(&" 2 ".into()));
        assert!(!at_most_two.matches(&"3".into()));
        assert!(!at_most_two.matches(&"two".into()));
        assert!(!at_most_two.matches(&AnswerValue::None));
        assert!(!at_most_two.matches(&AnswerValue::aspects([("a", 1)])));
    }

    #[test]
    fn wildcard_aspect_matches_any() {
        let answer = AnswerValue::aspects([("forma", 3), ("colori", 1), ("materiali", 4)]);
        assert!(AspectCondition::any(NumericCondition::AtMost(2)).matches(&answer));
        assert!(!AspectCondition::any(NumericCondition::Above(4)).matches(&answer));
    }

    #[test]
    fn named_aspect_only_checks_that_aspect() {
        let answer = AnswerValue::aspects([("forma", 3), ("colori", 1)]);
        assert!(!AspectCondition::named("forma", NumericCondition::AtMost(2)).matches(&answer));
        assert!(AspectCondition::named("colori", NumericCondition::AtMost(2)).matches(&answer));
        assert!(!AspectCondition::named("materiali", NumericCondition::AtMost(9)).matches(&answer));
    }

    #[test]
    fn unparseable_aspect_value_is_skipped() {
        let answer = AnswerValue::aspects([("forma", "n/a"), ("colori", "2")]);
        assert!(AspectCondition::any(NumericCondition::Equals(2)).matches(&answer));
        assert!(!AspectCondition::named("forma", NumericCondition::Equals(2)).matches(&answer));
    }

    #[test]
    fn emptiness_is_exact_negation() {
        for (answer, empty) in [
            (AnswerValue::from(""), true),
            (AnswerValue::from("   "), true),
            (AnswerValue::None, true),
            (AnswerValue::from("ok"), false),
        ] {
            assert_eq!(TextCondition::Empty.matches(&answer), empty);
            assert_eq!(TextCondition::NotEmpty.matches(&answer), !empty);
        }
    }

    #[test]
    fn first_match_respects_order() {
        let rules = vec![
            ScaleRule::new(NumericCondition::AtLeast(1), "a"),
            ScaleRule::new(NumericCondition::AtMost(2), "b"),
        ];
        assert_eq!(
            first_match(&rules, &"1".into()).map(|rule| rule.goto.as_str()),
            Some("a")
        );
        assert!(first_match(&rules, &"0".into()).is_some_and(|rule| rule.goto == "b"));
        assert!(first_match::<NumericCondition>(&[], &"1".into()).is_none());
    }
}
