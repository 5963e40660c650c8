//! # survey-flow
//!
//! Branching surveys. Backend-agnostic.
//!
//! A survey is an ordered [`Catalog`] of questions. After each answer,
//! [`resolve_next`] decides which question comes next: the `goto` of the picked
//! option, then the first matching logic rule, then simply the next question.
//! A [`Session`] keeps track of where the respondent has been, so they can go
//! back, and collects the answer records handed to a [`Submitter`] at the end.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_flow::{ClientMetadata, RedirectSubmitter, Submitter, loader, run};
//!
//! let catalog = loader::load_catalog("survey.yaml")?;
//! let session = run(&catalog, &mut renderer)?;
//!
//! let submission = session.submission(ClientMetadata::from_query("?email=a%40b.c"))?;
//! let url = RedirectSubmitter::new("https://example.com/thanks")?.submit(&submission)?;
//! ```
//!
//! ## Renderers
//!
//! Renderers are separate crates that implement [`Renderer`]:
//! - `survey-flow-dialoguer` - CLI prompts via dialoguer
//!
//! [`ScriptedRenderer`] replays fixed answers, for tests.

// Re-export all types from survey-flow-types
pub use survey_flow_types::*;

mod catalog;
mod driver;
pub mod loader;
mod render;
mod resolver;
pub mod rules;
mod scripted;
mod session;
mod submission;

pub use catalog::{Catalog, CatalogError, MAX_SCALE_STEPS};
pub use driver::{RunError, run};
pub use loader::{DocumentFormat, LoadError};
pub use render::{Interaction, Progress, QuestionView, Renderer};
pub use resolver::{NextOutcome, ResolveError, resolve_next};
pub use scripted::{ScriptError, ScriptedRenderer};
pub use session::{Session, SessionError, Step, ValidationError, validate_answer};
pub use submission::{ClientMetadata, RedirectError, RedirectSubmitter, Submission, Submitter};
