//! Loading survey documents from JSON or YAML.

use std::path::{Path, PathBuf};

use survey_flow_types::SurveyDocument;
use tracing::debug;

use crate::{Catalog, CatalogError};

/// On-disk format of a survey document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (`json`, `yaml` or `yml`, any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot tell the format of {0}; expected a .json, .yaml or .yml file")]
    UnknownFormat(PathBuf),

    #[error("Invalid JSON survey document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML survey document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid survey: {0}")]
    Catalog(#[from] CatalogError),
}

/// Parse a survey document without validating it.
pub fn parse_document(source: &str, format: DocumentFormat) -> Result<SurveyDocument, LoadError> {
    Ok(match format {
        DocumentFormat::Json => serde_json::from_str(source)?,
        DocumentFormat::Yaml => serde_yaml::from_str(source)?,
    })
}

/// Read a survey document from a file, picking the format from its extension.
pub fn load_document(path: impl AsRef<Path>) -> Result<SurveyDocument, LoadError> {
    let path = path.as_ref();
    let format =
        DocumentFormat::from_path(path).ok_or_else(|| LoadError::UnknownFormat(path.into()))?;
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })?;
    let document = parse_document(&source, format)?;
    debug!(
        path = %path.display(),
        questions = document.questions.len(),
        "loaded survey document"
    );
    Ok(document)
}

/// Parse and validate a catalog from a string.
pub fn catalog_from_str(source: &str, format: DocumentFormat) -> Result<Catalog, LoadError> {
    Ok(Catalog::from_document(parse_document(source, format)?)?)
}

/// Read and validate a catalog from a file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    Ok(Catalog::from_document(load_document(path)?)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use survey_flow_types::QuestionType;

    const YAML: &str = r#"
cover:
  title: Welcome
questions:
  - id: q1
    type: yes_no
    required: true
    title: Do you like it?
    answers:
      - { id: "yes", text: "Yes", goto: q3 }
      - { id: "no", text: "No", goto: "" }
  - id: q2
    type: likert_scale
    title: How much?
    scale: { min: 1, max: 5, labels: { min: Little, max: A lot } }
    logic:
      - when: { op: "<=", value: 2 }
        goto: q3
  - id: q3
    type: open_text
    title: Anything else?
    placeholder: Type here
"#;

    #[test]
    fn yaml_document_becomes_catalog() {
        let catalog = catalog_from_str(YAML, DocumentFormat::Yaml).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.cover().map(|p| p.title.as_str()), Some("Welcome"));
        assert!(catalog.thank_you().is_none());
        assert_eq!(
            catalog.question("q2").map(|q| q.question_type()),
            Some(QuestionType::LikertScale)
        );
        assert!(catalog.has_conditional_logic());
    }

    #[test]
    fn json_document_becomes_catalog() {
        let json = r#"{
            "questions": [
                { "id": "a", "type": "open_text", "title": "A" },
                { "id": "b", "type": "multiple_choice", "title": "B",
                  "answers": [ { "id": "x", "text": "X" }, { "text": "Y" } ] }
            ]
        }"#;
        let catalog = catalog_from_str(json, DocumentFormat::Json).unwrap();
        assert_eq!(catalog.index_of("b"), Some(1));
        assert!(!catalog.has_conditional_logic());
    }

    #[test]
    fn invariant_violations_surface_as_catalog_errors() {
        let json = r#"{ "questions": [
            { "id": "a", "type": "single_choice", "title": "A",
              "answers": [ { "id": "x", "text": "X", "goto": "zzz" } ] }
        ] }"#;
        let err = catalog_from_str(json, DocumentFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Catalog(CatalogError::DanglingTarget { .. })
        ));
    }

    #[test]
    fn unknown_question_type_is_a_parse_error() {
        let json = r#"{ "questions": [ { "id": "a", "type": "slider", "title": "A" } ] }"#;
        assert!(matches!(
            catalog_from_str(json, DocumentFormat::Json),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("survey.JSON")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b/survey.yml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("survey.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("survey")), None);
    }

    #[test]
    fn loads_catalog_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.questions()[0].id(), "q1");
    }

    #[test]
    fn missing_file_and_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_catalog(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));

        let err = load_catalog(dir.path().join("survey.txt")).unwrap_err();
        assert!(matches!(err, LoadError::UnknownFormat(_)));
    }
}
