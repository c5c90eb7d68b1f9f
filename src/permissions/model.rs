//! In-memory model of the declarative document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only shared space. Gets a link farm but no workload or route.
pub const PUBLIC_TENANT: &str = "public";

/// Privileged space. Gets a link farm but no workload or route, and is the
/// only tenant that sees the version-control directory through root exposure.
pub const PRIVILEGED_TENANT: &str = "writer";

/// Declared path that expands to every top-level entry of the content root.
pub const ROOT_EXPOSURE: &str = "/";

/// Raw document shape.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PermissionsDocument {
    pub spaces: BTreeMap<String, SpaceEntry>,
}

/// One tenant as written in the document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpaceEntry {
    pub password: Option<String>,
    pub paths: Vec<String>,
}

/// A validated tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSpec {
    pub name: String,
    pub secret: Option<String>,
    pub exposed_paths: Vec<String>,
}

impl TenantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: None,
            exposed_paths: Vec::new(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Reserved tenants never get a workload or a route.
    pub fn is_reserved(&self) -> bool {
        is_reserved_name(&self.name)
    }

    pub fn is_privileged(&self) -> bool {
        self.name == PRIVILEGED_TENANT
    }

    /// The secret, if one is declared and non-empty.
    pub fn effective_secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }
}

pub fn is_reserved_name(name: &str) -> bool {
    name == PUBLIC_TENANT || name == PRIVILEGED_TENANT
}

/// Tenant name → spec. Ordered so that every cycle visits tenants in the
/// same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    tenants: BTreeMap<String, TenantSpec>,
}

impl DesiredState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: TenantSpec) {
        self.tenants.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&TenantSpec> {
        self.tenants.get(name)
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// All tenants, reserved ones included.
    pub fn tenants(&self) -> impl Iterator<Item = &TenantSpec> {
        self.tenants.values()
    }

    /// Tenants that own a workload and a route.
    pub fn workload_tenants(&self) -> impl Iterator<Item = &TenantSpec> {
        self.tenants.values().filter(|t| !t.is_reserved())
    }

    /// Whether `name` is declared and owns a workload.
    pub fn has_workload_tenant(&self, name: &str) -> bool {
        self.tenants.get(name).is_some_and(|t| !t.is_reserved())
    }
}

impl FromIterator<TenantSpec> for DesiredState {
    fn from_iter<I: IntoIterator<Item = TenantSpec>>(iter: I) -> Self {
        let mut state = Self::new();
        for spec in iter {
            state.insert(spec);
        }
        state
    }
}

impl From<PermissionsDocument> for DesiredState {
    fn from(doc: PermissionsDocument) -> Self {
        doc.spaces
            .into_iter()
            .map(|(name, entry)| TenantSpec {
                name,
                secret: entry.password,
                exposed_paths: entry.paths,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tenants_excluded_from_workloads() {
        let state: DesiredState = [
            TenantSpec::new("alice"),
            TenantSpec::new(PUBLIC_TENANT),
            TenantSpec::new(PRIVILEGED_TENANT),
        ]
        .into_iter()
        .collect();

        assert_eq!(state.len(), 3);
        let names: Vec<_> = state.workload_tenants().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alice"]);
        assert!(state.has_workload_tenant("alice"));
        assert!(!state.has_workload_tenant(PUBLIC_TENANT));
        assert!(!state.has_workload_tenant("bob"));
    }

    #[test]
    fn test_empty_secret_is_not_injected() {
        assert_eq!(TenantSpec::new("a").with_secret("").effective_secret(), None);
        assert_eq!(TenantSpec::new("a").with_secret("pw").effective_secret(), Some("pw"));
    }
}
