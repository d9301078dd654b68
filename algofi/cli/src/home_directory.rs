use {anyhow::anyhow, std::path::PathBuf};

/// Name of the directory under the user's home used when `--home` is not given.
pub const DEFAULT_APP_DIR: &str = ".algofi";

pub struct HomeDirectory {
    home: PathBuf,
}

impl HomeDirectory {
    pub fn new(home: PathBuf) -> Self {
        Self { home }
    }

    /// Use the given directory, or `~/.algofi` if none is given.
    pub fn new_or_default(home: Option<PathBuf>) -> anyhow::Result<Self> {
        match home {
            Some(home) => Ok(Self::new(home)),
            None => home::home_dir()
                .map(|dir| Self::new(dir.join(DEFAULT_APP_DIR)))
                .ok_or_else(|| anyhow!("failed to find the user's home directory")),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("app.toml")
    }
}
