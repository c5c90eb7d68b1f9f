//! Link planning: which links a tenant's space should contain.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::config::PathsConfig;
use crate::permissions::{TenantSpec, ROOT_EXPOSURE};

/// A symlink inside a tenant's space pointing into the content root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub owner_tenant: String,
    pub link_name: OsString,
    /// Relative to the tenant's space directory.
    pub target_path: PathBuf,
}

/// Plans links for one tenant.
///
/// `content_entries` is the top-level listing of the content root, only
/// consulted when the tenant declares root exposure.
pub fn plan_links(paths: &PathsConfig, tenant: &TenantSpec, content_entries: &[OsString]) -> Vec<LinkEntry> {
    let space_dir = paths.spaces_root.join(&tenant.name);
    let to_content = relative_path(&space_dir, &paths.content_root);
    let entry = |rel: &Path| -> Option<LinkEntry> {
        let link_name = rel.file_name()?.to_os_string();
        Some(LinkEntry {
            owner_tenant: tenant.name.clone(),
            link_name,
            target_path: to_content.join(rel),
        })
    };

    let mut links: Vec<LinkEntry> = paths
        .shared_links
        .iter()
        .filter_map(|name| entry(Path::new(name)))
        .collect();

    for declared in &tenant.exposed_paths {
        if declared == ROOT_EXPOSURE {
            links.extend(
                root_exposure(paths, tenant, content_entries)
                    .filter_map(|name| entry(Path::new(name))),
            );
            continue;
        }
        let rel = Path::new(declared.trim_start_matches('/'));
        links.extend(entry(rel));
    }

    links
}

/// Top-level content entries a root-exposing tenant gets.
fn root_exposure<'a>(
    paths: &'a PathsConfig,
    tenant: &'a TenantSpec,
    content_entries: &'a [OsString],
) -> impl Iterator<Item = &'a OsString> + 'a {
    content_entries.iter().filter(move |name| {
        if name.as_os_str() == paths.document_name.as_str() {
            return false;
        }
        if name.as_os_str() == paths.vcs_dir.as_str() && !tenant.is_privileged() {
            return false;
        }
        !paths.shared_links.iter().any(|s| name.as_os_str() == s.as_str())
    })
}

/// Relative path from directory `from` to `to`. Both must be absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = normalized(from);
    let to: Vec<Component> = normalized(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for c in &to[common..] {
        rel.push(c.as_os_str());
    }
    rel
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
