use serde::{Deserialize, Serialize};

use crate::Question;

/// The top-level structure of a survey as written in a JSON or YAML document.
///
/// A document is not validated; build a catalog from it before running a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyDocument {
    /// Optional page shown before the first question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Page>,

    /// Optional page shown after the survey completes.
    #[serde(
        default,
        rename = "thankyou",
        skip_serializing_if = "Option::is_none"
    )]
    pub thank_you: Option<Page>,

    /// All questions, in catalog order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl SurveyDocument {
    /// Create a new document with the given questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            cover: None,
            thank_you: None,
            questions,
        }
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
}

/// A static page around the questions (cover or thank-you).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Page {
    /// Create a page with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            button_text: None,
            button_url: None,
            image_url: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the button text.
    pub fn with_button(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }

    /// Set where the button leads.
    pub fn with_button_url(mut self, url: impl Into<String>) -> Self {
        self.button_url = Some(url.into());
        self
    }
}
