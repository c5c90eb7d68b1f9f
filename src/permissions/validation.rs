//! Declarative document validation.
//!
//! # Responsibilities
//! - Tenant names must be safe as a directory name, a hostname label and a
//!   container name suffix
//! - Declared paths must stay under the content root
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - A single bad entry rejects the whole document; the previously applied
//!   state stays in place until the document is fixed

use std::path::{Component, Path};

use thiserror::Error;

use crate::permissions::model::{PermissionsDocument, ROOT_EXPOSURE};

const MAX_TENANT_NAME_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty tenant name")]
    EmptyTenantName,

    #[error("tenant name {name:?} is longer than 63 bytes")]
    TenantNameTooLong { name: String },

    #[error("tenant name {name:?} may only contain ASCII letters, digits, '-' and '_' and must not start with '-'")]
    InvalidTenantName { name: String },

    #[error("tenant {tenant} declares an empty path")]
    EmptyPath { tenant: String },

    #[error("tenant {tenant} declares path {path:?} which escapes the content root")]
    EscapingPath { tenant: String, path: String },
}

pub fn validate_document(doc: &PermissionsDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (name, entry) in &doc.spaces {
        if let Err(e) = validate_tenant_name(name) {
            errors.push(e);
        }
        for path in &entry.paths {
            if let Err(e) = validate_path(name, path) {
                errors.push(e);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_tenant_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyTenantName);
    }
    if name.len() > MAX_TENANT_NAME_LEN {
        return Err(ValidationError::TenantNameTooLong { name: name.to_string() });
    }
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars || name.starts_with('-') {
        return Err(ValidationError::InvalidTenantName { name: name.to_string() });
    }
    Ok(())
}

fn validate_path(tenant: &str, path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::EmptyPath { tenant: tenant.to_string() });
    }
    if path == ROOT_EXPOSURE {
        return Ok(());
    }
    let escapes = Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if escapes {
        return Err(ValidationError::EscapingPath {
            tenant: tenant.to_string(),
            path: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::model::SpaceEntry;

    fn doc(entries: &[(&str, &[&str])]) -> PermissionsDocument {
        let mut doc = PermissionsDocument::default();
        for (name, paths) in entries {
            doc.spaces.insert(
                name.to_string(),
                SpaceEntry {
                    password: None,
                    paths: paths.iter().map(|p| p.to_string()).collect(),
                },
            );
        }
        doc
    }

    #[test]
    fn test_valid_document() {
        let d = doc(&[("alice", &["notes", "/", "projects/rust/"]), ("writer", &["/"])]);
        assert!(validate_document(&d).is_ok());
    }

    #[test]
    fn test_tenant_names() {
        assert!(validate_tenant_name("team_a-1").is_ok());
        assert_eq!(validate_tenant_name(""), Err(ValidationError::EmptyTenantName));
        assert!(validate_tenant_name("../etc").is_err());
        assert!(validate_tenant_name("a b").is_err());
        assert!(validate_tenant_name("-a").is_err());
        assert!(validate_tenant_name(&"x".repeat(64)).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let d = doc(&[("bad name", &["../secrets", ""])]);
        let errors = validate_document(&d).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
