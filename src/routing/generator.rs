//! Rule file persistence.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::ReconcileError;
use crate::routing::render::RouteRecord;

const FILE_PREFIX: &str = "space-";
const FILE_SUFFIX: &str = ".conf";
const FILE_MODE: u32 = 0o644;

pub fn route_file_name(tenant: &str) -> String {
    format!("{FILE_PREFIX}{tenant}{FILE_SUFFIX}")
}

/// Inverse of [`route_file_name`].
pub fn tenant_from_file_name(name: &str) -> Option<&str> {
    name.strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)
        .filter(|tenant| !tenant.is_empty())
}

pub struct RouteGenerator<'a> {
    settings: &'a Settings,
}

impl<'a> RouteGenerator<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    fn dir(&self) -> &Path {
        &self.settings.paths.routing_dir
    }

    pub fn path_for(&self, tenant: &str) -> PathBuf {
        self.dir().join(route_file_name(tenant))
    }

    /// Render and overwrite the tenant's rule file.
    pub fn write(&self, tenant: &str) -> Result<RouteRecord, ReconcileError> {
        let route = RouteRecord::derive(tenant, self.settings);
        let path = self.path_for(tenant);

        write_atomic(&path, route.render().as_bytes()).map_err(|source| ReconcileError::RouteWrite {
            tenant: tenant.to_string(),
            path: path.clone(),
            source,
        })?;

        tracing::info!(tenant, hostname = %route.hostname, path = %path.display(), "Route written");
        Ok(route)
    }

    /// Tenants that currently have a rule file, sorted.
    pub fn list_tenants(&self) -> Result<Vec<String>, ReconcileError> {
        let entries = fs::read_dir(self.dir()).map_err(|e| ReconcileError::filesystem(self.dir(), e))?;

        let mut tenants = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReconcileError::filesystem(self.dir(), e))?;
            if let Some(tenant) = entry.file_name().to_str().and_then(tenant_from_file_name) {
                tenants.push(tenant.to_string());
            }
        }
        tenants.sort();
        Ok(tenants)
    }

    /// Delete the tenant's rule file. A missing file is not an error.
    pub fn delete(&self, tenant: &str) -> Result<(), ReconcileError> {
        let path = self.path_for(tenant);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ReconcileError::filesystem(path, e)),
        }
    }
}

/// Write to a hidden sibling and rename over the target, so the proxy
/// never loads a truncated rule.
fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "route path has no file name"))?;
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(FILE_MODE))?;
        fs::rename(&tmp, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
