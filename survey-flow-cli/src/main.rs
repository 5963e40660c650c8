//! Answer a branching survey in the terminal.
//!
//! Run with: cargo run -p survey-flow-cli -- example-catalogs/assets/product_feedback.yaml

mod settings;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use survey_flow::{Catalog, ClientMetadata, RedirectSubmitter, RunError, Submitter, loader, run};
use survey_flow_dialoguer::{DialoguerError, DialoguerRenderer};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::settings::SurveyConfig;

#[derive(Parser, Debug)]
#[command(name = "survey-flow")]
#[command(about = "Answer a branching survey in the terminal")]
struct Args {
    /// Survey document (.json, .yaml or .yml); the built-in product feedback survey when omitted
    catalog: Option<PathBuf>,

    /// Configuration file (defaults to ./survey-flow.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Results page the answers are forwarded to as query parameters
    #[arg(short, long)]
    results_url: Option<String>,

    /// Respondent metadata as a query string, e.g. "email=a%40b.c&country=IT"
    #[arg(long)]
    client: Option<String>,

    /// Prompts without colours
    #[arg(long)]
    plain: bool,

    /// Only validate the survey document and exit
    #[arg(long)]
    check: bool,
}

impl Args {
    /// Flags given on the command line win over every other source.
    fn apply(&self, mut config: SurveyConfig) -> SurveyConfig {
        if let Some(catalog) = &self.catalog {
            config.catalog = Some(catalog.clone());
        }
        if let Some(url) = &self.results_url {
            config.results_url = Some(url.clone());
        }
        if let Some(client) = &self.client {
            config.client_query = client.clone();
        }
        config.plain |= self.plain;
        config
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(config: &SurveyConfig) -> anyhow::Result<Catalog> {
    match &config.catalog {
        Some(path) => loader::load_catalog(path)
            .with_context(|| format!("Failed to load survey from {}", path.display())),
        None => {
            debug!("no survey document given, using the built-in product feedback survey");
            Ok(example_catalogs::product_feedback()?)
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = SurveyConfig::load(args.config.as_deref()).context("Invalid configuration")?;
    let config = args.apply(config);
    debug!(?config, "configuration loaded");

    let catalog = load_catalog(&config)?;
    if args.check {
        println!("{} questions, survey is valid", catalog.len());
        return Ok(());
    }

    let mut renderer = if config.plain {
        DialoguerRenderer::plain()
    } else {
        DialoguerRenderer::new()
    };

    let session = match run(&catalog, &mut renderer) {
        Ok(session) => session,
        Err(RunError::Renderer(err))
            if err
                .downcast_ref::<DialoguerError>()
                .is_some_and(DialoguerError::is_cancelled) =>
        {
            println!("Survey cancelled.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let client = ClientMetadata::from_query(&config.client_query);
    let submission = session.submission(client)?;
    info!(
        answers = submission.answers.len(),
        total_questions = submission.total_questions,
        "submitting answers"
    );

    match &config.results_url {
        Some(base) => {
            let mut submitter = RedirectSubmitter::new(base)
                .with_context(|| format!("Invalid results URL '{base}'"))?;
            let url = submitter.submit(&submission)?;
            println!("{url}");
        }
        None => println!("{}", serde_json::to_string_pretty(&submission)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_configuration() {
        let args = Args::try_parse_from([
            "survey-flow",
            "survey.yaml",
            "--results-url",
            "https://example.com/cli",
            "--plain",
        ])
        .unwrap();
        let config = SurveyConfig {
            catalog: Some(PathBuf::from("other.json")),
            results_url: Some("https://example.com/file".into()),
            client_query: "email=a%40b.c".into(),
            plain: false,
        };

        let config = args.apply(config);
        assert_eq!(config.catalog, Some(PathBuf::from("survey.yaml")));
        assert_eq!(config.results_url.as_deref(), Some("https://example.com/cli"));
        assert_eq!(config.client_query, "email=a%40b.c");
        assert!(config.plain);
    }

    #[test]
    fn test_no_flags_keep_configuration() {
        let args = Args::try_parse_from(["survey-flow"]).unwrap();
        let config = SurveyConfig {
            plain: true,
            ..SurveyConfig::default()
        };
        assert_eq!(args.apply(config.clone()), config);
    }

    #[test]
    fn test_built_in_survey_when_no_document() {
        let catalog = load_catalog(&SurveyConfig::default()).unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
