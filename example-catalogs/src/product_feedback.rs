//! Product feedback survey: experience level, satisfaction, recommendation,
//! per-aspect ratings and free comments, with every kind of branching.

use survey_flow::{
    AnswerOption, Aspect, AspectCondition, AspectRule, Catalog, CatalogError, ChoiceQuestion,
    LikertQuestion, MultiLikertQuestion, NumericCondition, OpenTextQuestion, Page, Question,
    QuestionKind, Scale, ScaleRule, SurveyDocument,
};

/// The same survey as [`product_feedback_document`], as YAML.
pub const PRODUCT_FEEDBACK_YAML: &str = include_str!("../assets/product_feedback.yaml");

fn satisfaction_scale() -> Scale {
    Scale::new(1, 5).with_labels("1 = Not satisfied at all", "5 = Very satisfied")
}

pub fn product_feedback_document() -> SurveyDocument {
    let experience = Question::new(
        "q1a2b3c4",
        "What is your experience with digital products?",
        QuestionKind::SingleChoice(ChoiceQuestion::new(vec![
            AnswerOption::new("beg", "I am a beginner with little experience").with_goto("q2d5e6f7"),
            AnswerOption::new("mid", "I have intermediate experience").with_goto(""),
            AnswerOption::new("good", "I am fairly experienced").with_goto("q3g8h9i0"),
            AnswerOption::new("very", "I am very experienced").with_goto("q4j1k2l3"),
            AnswerOption::new("pro", "I am a professional expert").with_goto("q4j1k2l3"),
        ])),
    )
    .required()
    .with_description("Help us understand your preferences so we can improve our services");

    let satisfaction = Question::new(
        "q2d5e6f7",
        "How satisfied are you with our service?",
        QuestionKind::LikertScale(
            LikertQuestion::new(satisfaction_scale())
                .with_rule(ScaleRule::new(NumericCondition::AtMost(2), "q5m4n5o6"))
                .with_rule(ScaleRule::new(NumericCondition::AtLeast(4), "q3g8h9i0")),
        ),
    )
    .required()
    .with_description("Rate your overall satisfaction");

    let recommend = Question::new(
        "q3g8h9i0",
        "Would you recommend our service?",
        QuestionKind::YesNo(ChoiceQuestion::yes_no(Some("q4j1k2l3"), Some("q5m4n5o6"))),
    )
    .required()
    .with_description("Your opinion matters to us");

    let aspects = Question::new(
        "q4j1k2l3",
        "How would you rate our bags from 1 to 5 on the following aspects?",
        QuestionKind::MultiLikert(
            MultiLikertQuestion::new(
                vec![
                    Aspect::new("forma", "Shape"),
                    Aspect::new("colori", "Colours"),
                    Aspect::new("materiali", "Materials"),
                ],
                satisfaction_scale(),
            )
            .with_rule(AspectRule::new(
                AspectCondition::any(NumericCondition::AtMost(2)),
                "q5m4n5o6",
            )),
        ),
    )
    .required()
    .with_description("Rate each aspect separately");

    let suggestions = Question::new(
        "q5m4n5o6",
        "Do you have any suggestions for improvement?",
        QuestionKind::OpenText(
            OpenTextQuestion::new().with_placeholder("Write your suggestions here..."),
        ),
    )
    .with_description("Share your ideas and feedback");

    SurveyDocument::new(vec![experience, satisfaction, recommend, aspects, suggestions])
        .with_cover(
            Page::new("Discover your digital preferences")
                .with_description(
                    "A short survey to better understand your habits and technology preferences.",
                )
                .with_button("Start the survey"),
        )
        .with_thank_you(
            Page::new("Thank you for your feedback!")
                .with_description("Your opinion helps us keep improving our products and services.")
                .with_button("Visit our website")
                .with_button_url("https://example.com"),
        )
}

/// Validated product feedback catalog, with cover and thank-you pages.
pub fn product_feedback() -> Result<Catalog, CatalogError> {
    Catalog::from_document(product_feedback_document())
}
