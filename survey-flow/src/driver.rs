use tracing::debug;

use crate::render::{Interaction, Renderer};
use crate::{Catalog, Session, SessionError};

/// Error type for [`run`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Renderer failure or cancellation (I/O, terminal closed, Ctrl+C, etc.)
    #[error("Renderer error: {0}")]
    Renderer(#[from] anyhow::Error),

    /// The session hit an unrecoverable error.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RunError {
    /// Create a renderer error from any error type.
    pub fn renderer(err: impl Into<anyhow::Error>) -> Self {
        Self::Renderer(err.into())
    }
}

/// Drive a session over `catalog` with `renderer` until the survey is complete.
///
/// Refused answers are reported through [`Renderer::show_validation_error`]
/// and the same question is shown again. "Back" on the first question is
/// ignored.
pub fn run<'a, R: Renderer>(catalog: &'a Catalog, renderer: &mut R) -> Result<Session<'a>, RunError> {
    let mut session = Session::new(catalog);

    if let Some(cover) = catalog.cover() {
        renderer.show_cover(cover).map_err(RunError::renderer)?;
    }

    while let Some(view) = session.view() {
        let interaction = renderer.render(&view).map_err(RunError::renderer)?;
        match interaction {
            Interaction::Back => {
                if !session.go_back() {
                    debug!("already on the first question");
                }
            }
            Interaction::Answer(answer) => match session.advance(answer) {
                Ok(step) => debug!(?step, "answer accepted"),
                Err(SessionError::Validation(err)) => {
                    if let Some(view) = session.view() {
                        renderer
                            .show_validation_error(&view, &err)
                            .map_err(RunError::renderer)?;
                    }
                }
                Err(err) => return Err(err.into()),
            },
        }
    }

    if let Some(thank_you) = catalog.thank_you() {
        renderer.show_thank_you(thank_you).map_err(RunError::renderer)?;
    }

    Ok(session)
}
