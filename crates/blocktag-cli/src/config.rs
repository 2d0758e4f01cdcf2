use anyhow::{Context, Result};
use blocktag::{Style, TagStyles};
use serde::Deserialize;
use tokio::fs;
use tracing::trace;

/// Config definition for parsing.
///
/// ```toml
/// [styles]
/// hr = "single"
/// img = "single"
/// ```
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Style of each known tag.
    ///
    /// Tags not listed here require a closing tag.
    #[serde(default)]
    pub(crate) styles: TagStyles,
}

impl Config {
    /// Load config from toml file at `path`.
    pub(crate) async fn load(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path)
            .await
            .with_context(|| format!("when reading config file {path}"))?;
        let config: Config = toml::from_str(data.as_str()).context("invalid config")?;
        trace!("{config:#?}");
        Ok(config)
    }

    /// Register extra tag names as [`Style::Single`], overriding the loaded styles.
    pub(crate) fn with_single(mut self, names: &[String]) -> Self {
        self.styles
            .extend(names.iter().map(|name| (name.clone(), Style::Single)));
        self
    }
}
