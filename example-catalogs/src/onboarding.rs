//! A short onboarding survey without any branching. Every respondent sees
//! every question, so renderers can show "question N of M".

use survey_flow::{
    AnswerOption, Catalog, CatalogError, ChoiceQuestion, LikertQuestion, OpenTextQuestion,
    Question, QuestionKind, Scale,
};

pub fn linear_onboarding() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        Question::new(
            "name",
            "What should we call you?",
            QuestionKind::OpenText(OpenTextQuestion::new().with_placeholder("Your name")),
        )
        .required(),
        Question::new(
            "interests",
            "Which topics interest you?",
            QuestionKind::MultipleChoice(ChoiceQuestion::new(vec![
                AnswerOption::new("news", "Product news"),
                AnswerOption::new("tips", "Tips and tutorials"),
                AnswerOption::new("events", "Events near you"),
            ])),
        ),
        Question::new(
            "frequency",
            "How often would you like to hear from us?",
            QuestionKind::SingleChoice(ChoiceQuestion::new(vec![
                AnswerOption::unnamed("Weekly"),
                AnswerOption::unnamed("Monthly"),
                AnswerOption::unnamed("Only for big announcements"),
            ])),
        )
        .required(),
        Question::new(
            "confidence",
            "How comfortable are you with our app so far?",
            QuestionKind::LikertScale(LikertQuestion::new(
                Scale::new(1, 5).with_labels("Lost", "At home"),
            )),
        ),
    ])
}
