//! Settings read from `configuration/` and `APP_` environment variables
//!
//! The files are optional, built in defaults apply when they are missing so
//! the binary can be run from any directory.

use std::path::PathBuf;

use construct_shared::const_config::client::CLIENT_DEFAULT_SERVER_ADDRESS;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub client: ClientSettings,
    pub storage: StorageSettings,
    pub tracing: TracingSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClientSettings {
    pub server_address: String,
    /// Serve payments and images from built in records instead of the backend
    #[serde(deserialize_with = "serde_aux::field_attributes::deserialize_bool_from_anything")]
    pub use_mock_data: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub path: PathBuf,
    #[serde(deserialize_with = "serde_aux::field_attributes::deserialize_bool_from_anything")]
    pub persist: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct TracingSettings {
    pub default_directive: String,
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("client.server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .set_default("client.use_mock_data", false)?
        .set_default("storage.path", "construct_session.ron")?
        .set_default("storage.persist", true)?
        .set_default("tracing.default_directive", "info")?
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // E.g. `APP_CLIENT__SERVER_ADDRESS=http://host:8000` sets `client.server_address`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Configuration>()
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("local", Ok(Environment::Local))]
    #[case("Production", Ok(Environment::Production))]
    #[case::unknown("staging", Err(()))]
    fn environment_names(#[case] name: &str, #[case] expected: Result<Environment, ()>) {
        let actual = Environment::try_from(name.to_string()).map_err(|_| ());
        assert_eq!(actual, expected);
    }
}
