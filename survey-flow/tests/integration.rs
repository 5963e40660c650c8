//! Integration tests for survey-flow

use chrono::{TimeZone, Utc};
use survey_flow::{
    AnswerValue, Catalog, ClientMetadata, DocumentFormat, Interaction, NextOutcome,
    QuestionType, RedirectSubmitter, RunError, ScriptError, ScriptedRenderer, Submitter,
    ValidationError, loader, resolve_next, run,
};

const PRODUCT_FEEDBACK: &str = r#"{
  "cover": { "title": "Tell us about the product", "buttonText": "Start" },
  "thankyou": { "title": "Thank you!", "buttonText": "Back to the site", "buttonUrl": "https://example.com" },
  "questions": [
    {
      "id": "q1", "type": "single_choice", "required": true,
      "title": "How did you hear about us?",
      "answers": [
        { "id": "social", "text": "Social media", "goto": "" },
        { "id": "friend", "text": "A friend", "goto": "q3" },
        { "id": "other", "text": "Other", "goto": "q5" }
      ]
    },
    {
      "id": "q2", "type": "likert_scale", "required": true,
      "title": "How satisfied are you?",
      "scale": { "min": 1, "max": 5, "labels": { "min": "Not at all", "max": "Very" } },
      "logic": [
        { "when": { "op": "<=", "value": 2 }, "goto": "q5" },
        { "when": { "op": ">=", "value": 4 }, "goto": "q3" }
      ]
    },
    {
      "id": "q3", "type": "yes_no", "required": true,
      "title": "Would you recommend it?",
      "answers": [
        { "id": "yes", "text": "Yes", "goto": "q4" },
        { "id": "no", "text": "No", "goto": "q5" }
      ]
    },
    {
      "id": "q4", "type": "multi_likert", "required": true,
      "title": "Rate each aspect",
      "aspects": [
        { "id": "shape", "name": "Shape" },
        { "id": "colours", "name": "Colours" },
        { "id": "materials", "name": "Materials" }
      ],
      "scale": { "min": 1, "max": 5 },
      "logic": [ { "when": { "aspect": "*", "op": "<=", "value": 2 }, "goto": "q5" } ]
    },
    {
      "id": "q5", "type": "open_text",
      "title": "Anything else?",
      "placeholder": "Your comments"
    }
  ]
}"#;

fn product_feedback() -> Catalog {
    loader::catalog_from_str(PRODUCT_FEEDBACK, DocumentFormat::Json).unwrap()
}

fn visited_ids(catalog: &Catalog, visited: &[usize]) -> Vec<String> {
    visited
        .iter()
        .map(|&index| catalog.get(index).unwrap().id().to_string())
        .collect()
}

#[test]
fn test_catalog_document_is_valid() {
    let catalog = product_feedback();

    assert_eq!(catalog.len(), 5);
    assert!(catalog.has_conditional_logic());
    assert_eq!(catalog.cover().unwrap().button_text.as_deref(), Some("Start"));
    assert_eq!(catalog.thank_you().unwrap().title, "Thank you!");
}

#[test]
fn test_empty_goto_falls_through_to_default() {
    let catalog = product_feedback();

    assert_eq!(
        resolve_next(&catalog, 0, &"social".into()),
        Ok(NextOutcome::Goto("q2".into()))
    );
    assert_eq!(
        resolve_next(&catalog, 0, &"other".into()),
        Ok(NextOutcome::Goto("q5".into()))
    );
}

#[test]
fn test_full_run_through_every_branch_type() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new().strict().with_answers([
        AnswerValue::from("social"),
        AnswerValue::from("5"),
        AnswerValue::from("yes"),
        AnswerValue::aspects([("shape", 4), ("colours", 2), ("materials", 5)]),
        AnswerValue::from("Great product"),
    ]);

    let session = run(&catalog, &mut renderer).unwrap();

    assert!(session.is_complete());
    assert_eq!(visited_ids(&catalog, session.visited()), ["q1", "q2", "q3", "q4", "q5"]);
    assert_eq!(renderer.shown(), ["q1", "q2", "q3", "q4", "q5"]);
    assert_eq!(renderer.pages(), ["Tell us about the product", "Thank you!"]);
    assert_eq!(renderer.remaining(), 0);

    let types: Vec<_> = session.records().iter().map(|r| r.question_type).collect();
    assert_eq!(
        types,
        [
            QuestionType::SingleChoice,
            QuestionType::LikertScale,
            QuestionType::YesNo,
            QuestionType::MultiLikert,
            QuestionType::OpenText,
        ]
    );
}

#[test]
fn test_low_rating_skips_to_comments() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new()
        .strict()
        .with_answers(["social", "1", ""]);

    let session = run(&catalog, &mut renderer).unwrap();

    assert_eq!(visited_ids(&catalog, session.visited()), ["q1", "q2", "q5"]);
    assert_eq!(session.records()[2].answer, AnswerValue::from(""));
}

#[test]
fn test_back_then_different_branch() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new()
        .strict()
        .with_answer("friend")
        .with_back()
        .with_answer("other")
        .with_answer("Nothing");

    let session = run(&catalog, &mut renderer).unwrap();

    assert_eq!(renderer.shown(), ["q1", "q3", "q1", "q5"]);
    assert_eq!(visited_ids(&catalog, session.visited()), ["q1", "q5"]);
    assert_eq!(session.records().len(), 2);
    assert_eq!(session.records()[0].answer, AnswerValue::from("other"));
}

#[test]
fn test_back_on_first_question_is_ignored() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new()
        .with(Interaction::Back)
        .with_answers(["other", "bye"]);

    let session = run(&catalog, &mut renderer).unwrap();

    assert_eq!(renderer.shown(), ["q1", "q1", "q5"]);
    assert_eq!(session.records().len(), 2);
}

#[test]
fn test_refused_answer_is_asked_again() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new().with_answers(["", "other", ""]);

    let session = run(&catalog, &mut renderer).unwrap();

    assert_eq!(renderer.shown(), ["q1", "q1", "q5"]);
    assert_eq!(
        renderer.rejections(),
        [ValidationError::Required {
            question: "q1".into()
        }]
    );
    assert!(session.is_complete());
}

#[test]
fn test_strict_script_fails_on_refusal() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new().strict().with_answer("");

    let err = match run(&catalog, &mut renderer) {
        Err(RunError::Renderer(err)) => err,
        other => panic!("expected a renderer error, got {other:?}"),
    };
    assert!(matches!(
        err.downcast_ref::<ScriptError>(),
        Some(ScriptError::Rejected { .. })
    ));
}

#[test]
fn test_exhausted_script_is_an_error() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new().with_answer("social");

    let err = run(&catalog, &mut renderer).unwrap_err();
    assert!(err.to_string().contains("'q2'"));
}

#[test]
fn test_redirect_after_run() {
    let catalog = product_feedback();
    let mut renderer = ScriptedRenderer::new().with_answers(["other", "Lovely"]);
    let session = run(&catalog, &mut renderer).unwrap();

    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let submission = session
        .submission_at(ClientMetadata::from_query("email=me%40example.com&Country=IT"), at)
        .unwrap();
    assert_eq!(submission.total_questions, 2);

    let mut submitter = RedirectSubmitter::new("https://example.com/thanks").unwrap();
    let url = submitter.submit(&submission).unwrap();
    let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(
        keys,
        [
            "question_q1",
            "question_q5",
            "client_country",
            "client_email",
            "total_questions",
            "completed_at"
        ]
    );
}
