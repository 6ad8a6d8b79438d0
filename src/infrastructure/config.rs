use crate::domain::connection::Connection;
use crate::domain::error::ClientResult;
use crate::domain::settings::{FidelityLevel, Settings};
use serde::Deserialize;

const ENV_PREFIX: &str = "SIMPLEJSON";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub datasource: DatasourceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasourceSettings {
    pub url: String,
    #[serde(default)]
    pub fidelity: FidelityLevel,
    #[serde(default = "default_convert")]
    pub convert: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_convert() -> bool {
    true
}

impl DatasourceSettings {
    pub fn connection(&self) -> Connection {
        Connection::new(self.url.as_str())
    }

    pub fn settings(&self) -> Settings {
        Settings::new(self.fidelity, self.convert)
    }
}

/// Load from a config file (extension optional), then `SIMPLEJSON_DATASOURCE__*` env vars
pub fn load_client_config(path: &str) -> ClientResult<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Parse a TOML document, without environment overrides
pub fn parse_client_config(toml: &str) -> ClientResult<ClientConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
