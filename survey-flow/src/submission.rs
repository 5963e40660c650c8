//! Handing completed answers over to whatever consumes them.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use survey_flow_types::AnswerRecord;
use tracing::debug;
use url::{Url, form_urlencoded};

/// Free-form information about the respondent, usually taken from the query
/// string the survey was opened with (`email`, `country`, `language`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientMetadata(BTreeMap<String, String>);

impl ClientMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs from a query string, with or without the leading `?`.
    ///
    /// Keys are lower-cased; pairs with an empty value are dropped. When a key
    /// repeats, the last value wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut metadata = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            metadata = metadata.with(key, value);
        }
        metadata
    }

    /// Add an entry, following the same rules as [`ClientMetadata::from_query`].
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = key.as_ref().trim().to_lowercase();
        let value = value.into();
        if !key.is_empty() && !value.trim().is_empty() {
            self.0.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything collected by a completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// One record per visited question, in visit order.
    pub answers: Vec<AnswerRecord>,

    /// Number of questions the respondent actually saw.
    pub total_questions: usize,

    pub client: ClientMetadata,

    pub completed_at: DateTime<Utc>,
}

/// Trait for whatever receives completed submissions (a results page, a file, an HTTP endpoint).
///
/// A failed submission leaves the session intact, so callers may retry.
pub trait Submitter {
    /// The error type for this submitter.
    type Error: Into<anyhow::Error>;

    /// What a successful submission hands back to the host.
    type Output;

    fn submit(&mut self, submission: &Submission) -> Result<Self::Output, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
    #[error("Invalid results URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Results URL cannot carry query parameters: {0}")]
    CannotBeABase(Url),

    #[error("Failed to encode answer for '{question}': {source}")]
    Encode {
        question: String,
        source: serde_json::Error,
    },
}

/// Encodes a submission as query parameters on a results page URL.
///
/// Each record becomes `question_<id>=<record as JSON>`, each metadata entry
/// `client_<key>=<value>`, followed by `total_questions` and `completed_at`
/// (RFC 3339, millisecond precision, UTC).
#[derive(Debug, Clone)]
pub struct RedirectSubmitter {
    base: Url,
}

impl RedirectSubmitter {
    pub fn new(base: &str) -> Result<Self, RedirectError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(RedirectError::CannotBeABase(base));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build the results URL for `submission`. Existing query parameters on the base are kept.
    pub fn redirect_url(&self, submission: &Submission) -> Result<Url, RedirectError> {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            for record in &submission.answers {
                let encoded =
                    serde_json::to_string(record).map_err(|source| RedirectError::Encode {
                        question: record.question_id.clone(),
                        source,
                    })?;
                query.append_pair(&format!("question_{}", record.question_id), &encoded);
            }
            for (key, value) in submission.client.iter() {
                query.append_pair(&format!("client_{key}"), value);
            }
            query.append_pair("total_questions", &submission.total_questions.to_string());
            query.append_pair(
                "completed_at",
                &submission
                    .completed_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        Ok(url)
    }
}

impl Submitter for RedirectSubmitter {
    type Error = RedirectError;
    type Output = Url;

    fn submit(&mut self, submission: &Submission) -> Result<Url, RedirectError> {
        let url = self.redirect_url(submission)?;
        debug!(answers = submission.answers.len(), %url, "built results redirect");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use survey_flow_types::{AnswerValue, QuestionType};

    fn record(id: &str, answer: AnswerValue, question_type: QuestionType) -> AnswerRecord {
        AnswerRecord {
            question_id: id.to_string(),
            answer,
            question_type,
        }
    }

    fn submission() -> Submission {
        Submission {
            answers: vec![
                record("q1", "yes".into(), QuestionType::YesNo),
                record(
                    "q2",
                    AnswerValue::aspects([("forma", 2), ("colori", 5)]),
                    QuestionType::MultiLikert,
                ),
            ],
            total_questions: 2,
            client: ClientMetadata::from_query("?email=a%40b.c&Country=IT&age="),
            completed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn metadata_from_query() {
        let client = ClientMetadata::from_query("?email=a%40b.c&Country=IT&Language=it&age=&gender=");
        assert_eq!(client.get("email"), Some("a@b.c"));
        assert_eq!(client.get("country"), Some("IT"));
        assert_eq!(client.get("language"), Some("it"));
        assert_eq!(client.get("age"), None);
        assert_eq!(client.iter().count(), 3);
        assert!(ClientMetadata::from_query("").is_empty());
    }

    #[test]
    fn redirect_carries_every_answer_and_metadata() {
        let submitter = RedirectSubmitter::new("https://example.com/results?lang=en").unwrap();
        let url = submitter.redirect_url(&submission()).unwrap();

        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["lang"], "en");
        assert_eq!(
            pairs["question_q1"],
            r#"{"questionId":"q1","answer":"yes","questionType":"yes_no"}"#
        );
        assert_eq!(
            pairs["question_q2"],
            r#"{"questionId":"q2","answer":{"colori":"5","forma":"2"},"questionType":"multi_likert"}"#
        );
        assert_eq!(pairs["client_email"], "a@b.c");
        assert_eq!(pairs["client_country"], "IT");
        assert!(!pairs.contains_key("client_age"));
        assert_eq!(pairs["total_questions"], "2");
        assert_eq!(pairs["completed_at"], "2024-05-01T12:30:00.000Z");
        assert_eq!(pairs.len(), 7);
    }

    #[test]
    fn submit_returns_the_url() {
        let mut submitter = RedirectSubmitter::new("https://example.com/results").unwrap();
        let url = submitter.submit(&submission()).unwrap();
        assert_eq!(url.path(), "/results");
        assert!(url.query().is_some_and(|q| q.contains("total_questions=2")));
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(matches!(
            RedirectSubmitter::new("not a url"),
            Err(RedirectError::InvalidUrl(_))
        ));
        assert!(matches!(
            RedirectSubmitter::new("mailto:someone@example.com"),
            Err(RedirectError::CannotBeABase(_))
        ));
    }
}
