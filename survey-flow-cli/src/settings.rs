//! Command configuration
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults
//! 2. `survey-flow.toml` in the working directory (or the file given with `--config`)
//! 3. environment variables with the `SURVEY_FLOW` prefix, `__` between levels
//!    (`.env` is loaded first when present)
//! 4. command-line flags
//!
//! `SURVEY_FLOW__RESULTS_URL=https://example.com/thanks` sets `results_url`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SURVEY_FLOW";
pub const DEFAULT_FILE: &str = "survey-flow.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SurveyConfig {
    /// Survey document to run. The built-in product feedback survey when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Results page the answers are forwarded to. Answers are printed as JSON when unset.
    #[serde(default)]
    pub results_url: Option<String>,

    /// Respondent metadata as a query string.
    #[serde(default)]
    pub client_query: String,

    /// Prompts without colours.
    #[serde(default)]
    pub plain: bool,
}

impl SurveyConfig {
    /// Load from `file` (or the default file, if present), the environment and `.env`.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::build(
            file,
            Environment::default().prefix(ENV_PREFIX).separator("__"),
        )
    }

    fn build(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match file {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_FILE, FileFormat::Toml).required(false),
        };

        Config::builder()
            .set_default("client_query", "")?
            .set_default("plain", false)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
