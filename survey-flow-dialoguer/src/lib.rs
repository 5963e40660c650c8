//! # survey-flow-dialoguer
//!
//! Dialoguer renderer for survey-flow.
//!
//! This crate provides a command-line interface for answering branching surveys
//! using the `dialoguer` library. Questions are presented one at a time, in the
//! order the survey's branching logic picks them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use survey_flow::{loader, run};
//! use survey_flow_dialoguer::DialoguerRenderer;
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = loader::load_catalog("survey.yaml")?;
//!     let session = run(&catalog, &mut DialoguerRenderer::new())?;
//!     println!("{} answers collected", session.records().len());
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{BACK_INPUT, BACK_LABEL, DialoguerError, DialoguerRenderer, SKIP_LABEL};
