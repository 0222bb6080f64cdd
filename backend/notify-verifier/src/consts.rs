/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "NV";

pub const CONFIG_DIRECTORY: &str = "config";

/// Crates whose logs follow the configured level; everything else logs at `WARN`
pub const WORKSPACE_MEMBERS: [&str; 6] = [
    "notify_verifier",
    "connector_integration",
    "interfaces",
    "domain_types",
    "sis_common_utils",
    "sis_common_enums",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Development,
    Release,
}

impl Env {
    pub const fn current_env() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Release
        }
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Release => "production.toml",
        }
    }
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Release => write!(f, "release"),
        }
    }
}
