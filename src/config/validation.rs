//! Settings validation.
//!
//! # Responsibilities
//! - Every filesystem root must be absolute
//! - Debounce window and command timeouts must be non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Runs once at startup; any error is fatal

use std::path::Path;

use thiserror::Error;

use crate::config::schema::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be an absolute path, got {value:?}")]
    RelativePath { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let paths = &settings.paths;

    for (field, path) in [
        ("paths.content_root", &paths.content_root),
        ("paths.spaces_root", &paths.spaces_root),
        ("paths.routing_dir", &paths.routing_dir),
        ("host root (HOST_ROOT_DIR)", &paths.host_root),
    ] {
        check_absolute(field, path, &mut errors);
    }

    for (field, value) in [
        ("paths.document_name", &paths.document_name),
        ("workload.runtime_binary", &settings.workload.runtime_binary),
        ("workload.image", &settings.workload.image),
        ("routing.base_domain", &settings.routing.base_domain),
        ("reload.proxy_container", &settings.reload.proxy_container),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    for (field, value) in [
        ("trigger.debounce_ms", settings.trigger.debounce_ms),
        ("timeouts.launch_secs", settings.timeouts.launch_secs),
        ("timeouts.remove_secs", settings.timeouts.remove_secs),
        ("timeouts.reload_secs", settings.timeouts.reload_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_absolute(field: &'static str, path: &Path, errors: &mut Vec<ValidationError>) {
    if !path.is_absolute() {
        errors.push(ValidationError::RelativePath {
            field,
            value: path.display().to_string(),
        });
    }
}
