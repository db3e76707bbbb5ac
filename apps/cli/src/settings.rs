//! Layered settings: defaults → `validata.toml` → `VALIDATA_*` env → flags.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use validata::config::ValidatorConfig;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "validata.toml";

/// Environment prefix (`VALIDATA_STRICT_RULES=true`).
pub const ENV_PREFIX: &str = "VALIDATA_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_locale: String,
    pub strict_rules: bool,
    pub locale_files: Vec<PathBuf>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = ValidatorConfig::default();
        Self {
            default_locale: engine.default_locale,
            strict_rules: engine.strict_rules,
            locale_files: engine.locale_files,
            json_logs: false,
        }
    }
}

/// Values given on the command line. Unset flags do not override lower layers.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_rules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_logs: Option<bool>,
}

impl Settings {
    pub fn load(config: Option<&Path>, overrides: &Overrides) -> Result<Self, figment::Error> {
        let file = config.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
    }

    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            default_locale: self.default_locale.clone(),
            strict_rules: self.strict_rules,
            locale_files: self.locale_files.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("absent.toml")), &Overrides::default()).unwrap();
        assert_eq!(settings.default_locale, "en");
        assert!(!settings.strict_rules);
    }

    #[test]
    fn file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validata.toml");
        std::fs::write(&path, "default_locale = \"fr\"\njson_logs = true\n").unwrap();

        let from_file = Settings::load(Some(&path), &Overrides::default()).unwrap();
        assert_eq!(from_file.default_locale, "fr");
        assert!(from_file.json_logs);
        assert!(!from_file.strict_rules);

        let flagged = Settings::load(
            Some(&path),
            &Overrides {
                strict_rules: Some(true),
                json_logs: None,
            },
        )
        .unwrap();
        assert!(flagged.strict_rules);
        assert!(flagged.json_logs);
        assert_eq!(flagged.validator_config().default_locale, "fr");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("validata.toml");
        std::fs::write(&path, "strict_rules = \"very\"").unwrap();
        assert!(Settings::load(Some(&path), &Overrides::default()).is_err());
    }
}
