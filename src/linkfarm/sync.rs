//! Applies link plans to the filesystem.

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::Path;

use crate::config::PathsConfig;
use crate::error::ReconcileError;
use crate::linkfarm::plan::{plan_links, LinkEntry};
use crate::permissions::{DesiredState, TenantSpec, ROOT_EXPOSURE};

const OPEN_MODE: u32 = 0o777;

/// Outcome of one link-farm pass.
#[derive(Debug, Default)]
pub struct LinkFarmReport {
    /// Links created, across all tenants.
    pub links: Vec<LinkEntry>,
    pub errors: Vec<ReconcileError>,
}

impl LinkFarmReport {
    fn merge(&mut self, other: LinkFarmReport) {
        self.links.extend(other.links);
        self.errors.extend(other.errors);
    }
}

pub struct LinkFarm<'a> {
    paths: &'a PathsConfig,
}

impl<'a> LinkFarm<'a> {
    pub fn new(paths: &'a PathsConfig) -> Self {
        Self { paths }
    }

    /// Rebuild every tenant's space.
    pub fn sync_all(&self, state: &DesiredState) -> LinkFarmReport {
        let mut report = LinkFarmReport::default();
        report.errors.extend(self.ensure_shared_resources());

        for tenant in state.tenants() {
            report.merge(self.sync_tenant(tenant));
        }
        report
    }

    /// Make sure the shared resources every space links to exist.
    pub fn ensure_shared_resources(&self) -> Vec<ReconcileError> {
        self.paths
            .shared_links
            .iter()
            .filter_map(|name| ensure_open_dir(&self.paths.content_root.join(name)).err())
            .collect()
    }

    /// Wipe and relink a single tenant's space.
    pub fn sync_tenant(&self, tenant: &TenantSpec) -> LinkFarmReport {
        let mut report = LinkFarmReport::default();
        let space_dir = self.paths.spaces_root.join(&tenant.name);

        if let Err(e) = ensure_open_dir(&space_dir) {
            report.errors.push(e);
            return report;
        }
        report.errors.extend(wipe_dir(&space_dir));

        let content_entries = if tenant.exposed_paths.iter().any(|p| p == ROOT_EXPOSURE) {
            match list_dir(&self.paths.content_root) {
                Ok(entries) => entries,
                Err(e) => {
                    report.errors.push(e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        for link in plan_links(self.paths, tenant, &content_entries) {
            let link_path = space_dir.join(&link.link_name);
            match symlink(&link.target_path, &link_path) {
                Ok(()) => {
                    tracing::debug!(
                        tenant = %tenant.name,
                        link = %link_path.display(),
                        target = %link.target_path.display(),
                        "Linked"
                    );
                    report.links.push(link);
                }
                Err(e) => report.errors.push(ReconcileError::filesystem(link_path, e)),
            }
        }

        tracing::info!(
            tenant = %tenant.name,
            links = report.links.len(),
            errors = report.errors.len(),
            "Space rebuilt"
        );
        report
    }
}

fn ensure_open_dir(dir: &Path) -> Result<(), ReconcileError> {
    fs::create_dir_all(dir).map_err(|e| ReconcileError::filesystem(dir, e))?;
    fs::set_permissions(dir, fs::Permissions::from_mode(OPEN_MODE))
        .map_err(|e| ReconcileError::filesystem(dir, e))
}

/// Remove every entry in `dir`. Symlinks are removed, never followed.
fn wipe_dir(dir: &Path) -> Vec<ReconcileError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => return vec![ReconcileError::filesystem(dir, e)],
    };

    let mut errors = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                errors.push(ReconcileError::filesystem(dir, e));
                continue;
            }
        };
        let removed = match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(e) => Err(e),
        };
        if let Err(e) = removed {
            errors.push(ReconcileError::filesystem(path, e));
        }
    }
    errors
}

/// Sorted top-level entry names of `dir`.
fn list_dir(dir: &Path) -> Result<Vec<OsString>, ReconcileError> {
    let mut names = fs::read_dir(dir)
        .and_then(|entries| {
            entries
                .map(|e| e.map(|e| e.file_name()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|e| ReconcileError::filesystem(dir, e))?;
    names.sort();
    Ok(names)
}
