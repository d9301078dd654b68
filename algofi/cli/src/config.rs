use {
    crate::home_directory::HomeDirectory,
    config_parser::parse_config,
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub algod: AlgodConfig,
    pub manager: ManagerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            algod: AlgodConfig::default(),
            manager: ManagerConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AlgodConfig {
    pub endpoint: String,
    pub token: Option<String>,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4001".to_string(),
            token: None,
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ManagerConfig {
    /// Zero means unset.
    pub app_id: u64,
}

/// Parse `app.toml` from the home directory. Returns `None` if there is no such
/// file, leaving it to the caller to fall back to defaults.
pub fn load_config(app_dir: &HomeDirectory) -> anyhow::Result<Option<Config>> {
    let path = app_dir.config_file();

    if !path.exists() {
        return Ok(None);
    }

    Ok(Some(parse_config(path)?))
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, std::fs};

    #[test]
    fn no_config_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&HomeDirectory::new(dir.path().to_path_buf())).unwrap();

        assert!(cfg.is_none());
    }

    #[test]
    fn default_values() {
        let cfg = Config::default();

        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.algod.endpoint, "http://localhost:4001");
        assert_eq!(cfg.manager.app_id, 0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = HomeDirectory::new(dir.path().to_path_buf());

        fs::write(app_dir.config_file(), "[manager]\napp_id = 465818260\n").unwrap();

        let cfg = load_config(&app_dir).unwrap().unwrap();

        assert_eq!(cfg.manager.app_id, 465818260);
        assert_eq!(cfg.algod.endpoint, "http://localhost:4001");
        assert!(cfg.algod.token.is_none());
    }
}
