//! Configuration Management

use crate::classifier::ActionClassifier;
use crate::features::Tolerances;
use crate::loader::LoaderConfig;
use crate::prototype::PrototypeBuilder;
use crate::synthetic::DemoConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file contents, one field per TOML section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Numeric floors for normalization and similarity
    pub tolerances: Tolerances,
    /// Classification settings
    pub classifier: ClassifierConfig,
    /// Keypoint file loading
    pub loader: LoaderConfig,
    /// Synthetic demo clips
    pub demo: DemoConfig,
}

/// `[classifier]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Fail instead of returning all-zero scores when no label has a prototype
    pub require_prototypes: bool,
}

impl Config {
    /// Check every section; the first invalid field is reported.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.tolerances.validate()?;
        self.demo.validate()?;
        let ext = self.loader.extension.trim();
        if ext.is_empty() || ext.starts_with('.') {
            return Err(crate::Error::Config(format!(
                "loader.extension must be non-empty and given without a leading dot, got {:?}",
                self.loader.extension
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML config file. Missing sections take defaults.
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let config: Self = toml::from_str(&std::fs::read_to_string(path)?)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// `~/.proto_action/config.toml` if present, built-in defaults otherwise
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        match path.exists() {
            true => Self::load(&path),
            false => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content = self.to_toml()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// `~/.proto_action/config.toml`, or `./config.toml` without a home directory
    pub fn default_path() -> PathBuf {
        match dirs::home_dir() {
            Some(home) => home.join(".proto_action").join("config.toml"),
            None => PathBuf::from("config.toml"),
        }
    }

    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Prototype builder using the configured tolerances
    pub fn prototype_builder(&self) -> PrototypeBuilder {
        PrototypeBuilder::with_tolerances(self.tolerances)
    }

    /// Classifier using the configured tolerances and bank policy
    pub fn classifier(&self) -> ActionClassifier {
        ActionClassifier::with_tolerances(self.tolerances)
            .require_prototypes(self.classifier.require_prototypes)
    }
}
