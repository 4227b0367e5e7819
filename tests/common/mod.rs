//! Shared fixtures for integration tests.

use serde::Serialize;

#[allow(dead_code)]
pub const MAIN_TEMPLATE: &str = "\
worker_processes {{ worker_processes }};
events {
    worker_connections {{ worker_connections }};
}
http {
    server_tokens {{ on_off(server_tokens) }};
    include /etc/nginx/conf.d/*.conf;
}
";

#[allow(dead_code)]
pub const OBJECT_TEMPLATE: &str = "\
upstream {{ upstream.name }} {
{%- if upstream.lb_method %}
    {{ upstream.lb_method }};
{%- endif %}
{%- for server in upstream.servers %}
    server {{ server }};
{%- endfor %}
}
server {
{%- for port in ports %}
    listen {{ port }};
{%- endfor %}
    server_name {{ host }};
{%- for header in headers %}
    proxy_set_header {{ header.name }} {{ header.value }};
{%- endfor %}
    proxy_connect_timeout {{ connect_timeout }};
}
";

/// Main configuration model.
#[derive(Debug, Clone, Serialize)]
pub struct MainModel {
    pub worker_processes: String,
    pub worker_connections: u32,
    pub server_tokens: bool,
}

#[allow(dead_code)]
pub fn main_model() -> MainModel {
    MainModel {
        worker_processes: "auto".to_string(),
        worker_connections: 1024,
        server_tokens: false,
    }
}

/// Upstream block of the per-object model.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamModel {
    pub name: String,
    pub lb_method: String,
    pub servers: Vec<String>,
}

/// Per-object configuration model.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectModel {
    pub host: String,
    pub ports: Vec<u16>,
    pub headers: Vec<ingress_confgen::directives::Header>,
    pub connect_timeout: String,
    pub upstream: UpstreamModel,
}
