//! Dev server settings and the static proxy route table.

use crate::core::environment::Environment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_UPSTREAM: &str = "https://yyj-test.by-health.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRoute {
    pub path_prefix: String,
    pub target_origin: String,
    /// Rewrite the request's origin header to the target
    #[serde(default = "default_true")]
    pub rewrite_origin: bool,
}

fn default_true() -> bool {
    true
}

impl ProxyRoute {
    pub fn new(path_prefix: &str, target_origin: &str) -> Self {
        Self {
            path_prefix: path_prefix.to_string(),
            target_origin: target_origin.to_string(),
            rewrite_origin: true,
        }
    }

    pub fn matches(&self, request_path: &str) -> bool {
        request_path
            .strip_prefix(self.path_prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    pub public_path: String,
    pub content_base: String,
    pub history_api_fallback: bool,
    pub open: bool,
    pub proxy: Vec<ProxyRoute>,
}

impl DevServerConfig {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub struct DevServerRouter {
    routes: Vec<ProxyRoute>,
}

impl DevServerRouter {
    pub fn new(routes: Vec<ProxyRoute>) -> Self {
        Self { routes }
    }

    pub fn default_routes() -> Vec<ProxyRoute> {
        vec![
            ProxyRoute::new("/scrm", DEFAULT_UPSTREAM),
            ProxyRoute::new("/blessCodeActivity", DEFAULT_UPSTREAM),
        ]
    }

    /// Route table for the environment; empty outside development.
    pub fn routes(&self, environment: Environment) -> &[ProxyRoute] {
        match environment {
            Environment::Development => self.routes.as_slice(),
            Environment::Production | Environment::Uat => &[],
        }
    }

    /// Longest matching prefix wins
    pub fn route_for(&self, environment: Environment, request_path: &str) -> Option<&ProxyRoute> {
        self.routes(environment)
            .iter()
            .filter(|route| route.matches(request_path))
            .max_by_key(|route| route.path_prefix.len())
    }

    pub fn config(
        &self,
        environment: Environment,
        host: &str,
        port: u16,
    ) -> Option<DevServerConfig> {
        if environment != Environment::Development {
            return None;
        }

        Some(DevServerConfig {
            host: host.to_string(),
            port,
            public_path: "/".to_string(),
            content_base: "./src".to_string(),
            history_api_fallback: true,
            open: false,
            proxy: self.routes(environment).to_vec(),
        })
    }
}

impl Default for DevServerRouter {
    fn default() -> Self {
        Self::new(Self::default_routes())
    }
}
