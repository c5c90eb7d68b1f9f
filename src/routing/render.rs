//! Reverse-proxy rule rendering.

use serde::Serialize;

use crate::config::Settings;

/// One tenant's routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub tenant: String,
    pub hostname: String,
    pub upstream: String,
    pub listen_port: u16,
}

impl RouteRecord {
    pub fn derive(tenant: &str, settings: &Settings) -> Self {
        let identity = settings.workload.identity(tenant);
        Self {
            tenant: tenant.to_string(),
            hostname: format!("{}.{}", tenant, settings.routing.base_domain),
            upstream: format!("http://{}:{}", identity, settings.routing.upstream_port),
            listen_port: settings.routing.listen_port,
        }
    }

    /// nginx `server` block proxying the hostname to the workload, with
    /// websocket upgrades passed through.
    pub fn render(&self) -> String {
        format!(
            r#"server {{
    listen {port};
    server_name {host};
    location / {{
        proxy_pass {upstream};
        proxy_http_version 1.1;
        proxy_set_header Upgrade $http_upgrade;
        proxy_set_header Connection "Upgrade";
        proxy_set_header Host $host;
    }}
}}
"#,
            port = self.listen_port,
            host = self.hostname,
            upstream = self.upstream,
        )
    }
}
