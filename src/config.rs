use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Shown in place of fields the frame did not carry
    #[serde(default = "DisplayConfig::default_placeholder")]
    pub placeholder: String,
    #[serde(default = "DisplayConfig::default_show_raw")]
    pub show_raw: bool,
    #[serde(default)]
    pub show_words: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: Self::default_placeholder(),
            show_raw: Self::default_show_raw(),
            show_words: false,
        }
    }
}

impl DisplayConfig {
    fn default_placeholder() -> String {
        "—".into()
    }

    fn default_show_raw() -> bool {
        true
    }

    pub fn load(config_file_path: &Path) -> Result<Self> {
        log::debug!("Loading config file from {config_file_path:?}");
        let config_file = std::fs::File::open(config_file_path)
            .with_context(|| format!("Cannot open display config file {config_file_path:?}"))?;
        let config: Self = serde_yaml::from_reader(&config_file)
            .with_context(|| format!("Cannot read display config from file: {config_file_path:?}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_words: true").unwrap();
        let config = DisplayConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            DisplayConfig {
                placeholder: "—".into(),
                show_raw: true,
                show_words: true,
            }
        );
    }

    #[test]
    fn load_all_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "placeholder: n/a\nshow_raw: false\nshow_words: false").unwrap();
        let config = DisplayConfig::load(file.path()).unwrap();
        assert_eq!(config.placeholder, "n/a");
        assert!(!config.show_raw);
        assert!(!config.show_words);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Cannot open display config file"));
    }

    #[test]
    fn load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_raw: [1, 2").unwrap();
        assert!(DisplayConfig::load(file.path()).is_err());
    }
}
