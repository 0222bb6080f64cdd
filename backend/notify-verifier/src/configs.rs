use std::{collections::BTreeMap, path::PathBuf};

use domain_types::connector_types::ConnectorNotificationSecrets;
use hyperswitch_masking::Secret;

use crate::{consts, error::ConfigurationError, logger::config::Log};

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub merchants: BTreeMap<String, Merchant>,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: String,
}

impl Common {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        match self.environment.as_str() {
            "development" | "production" => Ok(()),
            _ => Err(config::ConfigError::Message(format!(
                "Invalid environment '{}'. Must be 'development' or 'production'",
                self.environment
            ))),
        }
    }
}

/// Credentials of one merchant terminal
#[derive(Clone, serde::Deserialize, Debug)]
pub struct Merchant {
    /// Merchant code (FUC) the gateway puts in `Ds_MerchantCode`
    pub merchant_code: Option<String>,
    pub terminal: Option<String>,
    /// Base64 encoded secret key
    pub secret_key: Secret<String>,
}

impl Merchant {
    pub fn notification_secrets(&self) -> ConnectorNotificationSecrets {
        ConnectorNotificationSecrets {
            secret_key: self.secret_key.clone(),
        }
    }
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration from an explicit file, falling back to the default
    /// location for the current environment
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        // Validate the environment field
        config.common.validate()?;

        Ok(config)
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            // "env" can't be altered by config field.
            .set_override("env", environment.to_string())
    }

    /// Config path.
    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            config_path.push(workspace_path());
            config_path.push(consts::CONFIG_DIRECTORY);
            config_path.push(environment.config_path());
        }
        config_path
    }

    /// Looks up a merchant by name. Without a name, the only configured merchant is used.
    pub fn merchant(&self, name: Option<&str>) -> Result<(&str, &Merchant), ConfigurationError> {
        match name {
            Some(name) => self
                .merchants
                .get_key_value(name)
                .map(|(name, merchant)| (name.as_str(), merchant))
                .ok_or_else(|| ConfigurationError::UnknownMerchant(name.to_string())),
            None => {
                let mut merchants = self.merchants.iter();
                match (merchants.next(), merchants.next()) {
                    (Some((name, merchant)), None) => Ok((name.as_str(), merchant)),
                    (None, _) => Err(ConfigurationError::NoMerchantConfigured),
                    (Some(_), Some(_)) => Err(ConfigurationError::AmbiguousMerchant(
                        self.merchants.keys().cloned().collect::<Vec<_>>().join(", "),
                    )),
                }
            }
        }
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}
