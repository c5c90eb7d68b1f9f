//! Declarative document loading from disk.

use std::fs;
use std::path::Path;

use crate::error::ReconcileError;
use crate::permissions::model::{DesiredState, PermissionsDocument};
use crate::permissions::validation::validate_document;

/// Load, parse and validate the declarative document.
///
/// An empty file is a document with no tenants.
pub fn load_desired_state(path: &Path) -> Result<DesiredState, ReconcileError> {
    let content = fs::read_to_string(path).map_err(|source| ReconcileError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_desired_state(path, &content)
}

pub(crate) fn parse_desired_state(path: &Path, content: &str) -> Result<DesiredState, ReconcileError> {
    let doc: PermissionsDocument = if content.trim().is_empty() {
        PermissionsDocument::default()
    } else {
        serde_yaml::from_str::<Option<PermissionsDocument>>(content)
            .map_err(|e| ReconcileError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .unwrap_or_default()
    };

    validate_document(&doc).map_err(|errors| ReconcileError::invalid_document(path, &errors))?;

    Ok(DesiredState::from(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc_path() -> PathBuf {
        PathBuf::from("/content/permissions.yaml")
    }

    #[test]
    fn test_parse_document() {
        let yaml = r#"
spaces:
  alice:
    password: hunter2
    paths: [notes, "projects/rust"]
  public:
    paths: ["/"]
  bob: {}
"#;
        let state = parse_desired_state(&doc_path(), yaml).unwrap();
        assert_eq!(state.len(), 3);

        let alice = state.get("alice").unwrap();
        assert_eq!(alice.secret.as_deref(), Some("hunter2"));
        assert_eq!(alice.exposed_paths, vec!["notes", "projects/rust"]);

        let bob = state.get("bob").unwrap();
        assert!(bob.secret.is_none());
        assert!(bob.exposed_paths.is_empty());
    }

    #[test]
    fn test_empty_document_has_no_tenants() {
        assert!(parse_desired_state(&doc_path(), "").unwrap().is_empty());
        assert!(parse_desired_state(&doc_path(), "spaces: {}\n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = parse_desired_state(&doc_path(), "spaces: [unclosed").unwrap_err();
        assert!(matches!(err, ReconcileError::ConfigParse { .. }));
    }

    #[test]
    fn test_invalid_tenant_rejects_document() {
        let err = parse_desired_state(&doc_path(), "spaces:\n  \"../x\": {}\n").unwrap_err();
        assert!(matches!(err, ReconcileError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_desired_state(&dir.path().join("permissions.yaml")).unwrap_err();
        assert!(matches!(err, ReconcileError::ConfigRead { .. }));
    }
}
