use {
    crate::error::Error,
    config::{Config, Environment, File},
    std::path::Path,
};

/// Separator between nesting levels in environment variable names, e.g.
/// `ALGOD__ENDPOINT` overrides `algod.endpoint`.
pub const ENV_SEPARATOR: &str = "__";

pub struct ConfigParser {}

impl ConfigParser {
    /// Read a TOML file, then overlay environment variables on top of it.
    pub fn parse<D, P>(path: P) -> Result<D, Error>
    where
        D: serde::de::DeserializeOwned,
        P: AsRef<Path>,
    {
        let env_override = Environment::default().separator(ENV_SEPARATOR);

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_override)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

pub fn parse_config<D, P>(path: P) -> Result<D, Error>
where
    D: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    ConfigParser::parse(path)
}
