use crate::analytics::{ContinentClassifier, DatasetSource, ViewSettings};
use crate::error::{DashboardError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Production table to load
    pub data_path: PathBuf,
    /// Field separator of the source table (a single ASCII character)
    pub separator: char,
    /// Column read but discarded; empty keeps every column
    pub dropped_column: String,
    /// Country compared against the global trend
    pub focus_country: String,
    /// Number of countries in the top producers chart
    pub top_n: usize,
    /// Trailing points used for the growth KPI
    pub growth_window: usize,
    /// Extra or corrected country → continent entries
    pub continent_overrides: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let view = ViewSettings::default();
        Self {
            data_path: crate::analytics::loader::default_data_path().to_path_buf(),
            separator: ';',
            dropped_column: crate::analytics::loader::SUB_COMMODITY.to_owned(),
            focus_country: view.focus_country,
            top_n: view.top_n,
            growth_window: view.growth_window,
            continent_overrides: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !self.separator.is_ascii() {
            return Err(DashboardError::Config(format!(
                "separator must be a single ASCII character, got '{}'",
                self.separator
            )));
        }
        if self.top_n == 0 {
            return Err(DashboardError::Config("top_n must be at least 1".to_owned()));
        }
        if self.growth_window < 2 {
            return Err(DashboardError::Config(
                "growth_window must be at least 2".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn source(&self) -> DatasetSource {
        let dropped = (!self.dropped_column.is_empty()).then(|| self.dropped_column.clone());
        // validate() guarantees an ASCII separator
        let separator = u8::try_from(self.separator).unwrap_or(b';');
        DatasetSource::new(&self.data_path)
            .with_separator(separator)
            .with_dropped_column(dropped)
    }

    pub fn classifier(&self) -> ContinentClassifier {
        ContinentClassifier::with_overrides(&self.continent_overrides)
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            focus_country: self.focus_country.clone(),
            top_n: self.top_n,
            growth_window: self.growth_window,
        }
    }
}

/// `<config dir>/nickel-dash/config.json`, falling back to the working
/// directory when the platform has no config dir.
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nickel-dash")
        .join("config.json")
}

/// Loads the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(DashboardConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DashboardConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(config: &DashboardConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_gives_defaults() -> anyhow::Result<()> {
        let config = load_config(Path::new("testdata/no_such_config.json"))?;
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.source().separator, b';');
        assert_eq!(config.source().dropped_column.as_deref(), Some("Sub-commodity"));
        Ok(())
    }

    #[test]
    fn test_save_and_load_round_trip() -> anyhow::Result<()> {
        let mut config = DashboardConfig::default();
        config.focus_country = "Philippines".to_owned();
        config.separator = ',';
        config
            .continent_overrides
            .insert("Zimbabwe".to_owned(), "Africa".to_owned());

        let path = std::env::temp_dir()
            .join("nickel_dash_config_test")
            .join("config.json");
        save_config(&config, &path)?;
        let loaded = load_config(&path)?;
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
        assert_eq!(loaded.classifier().classify("Zimbabwe"), "Africa");
        assert_eq!(loaded.view_settings().focus_country, "Philippines");
        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> anyhow::Result<()> {
        let config: DashboardConfig = serde_json::from_str(r#"{ "top_n": 5 }"#)?;
        assert_eq!(config.top_n, 5);
        assert_eq!(config.focus_country, "Indonesia");
        Ok(())
    }

    #[test]
    fn test_validation() {
        let config = DashboardConfig {
            top_n: 0,
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let config = DashboardConfig {
            separator: 'é',
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            dropped_column: String::new(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.source().dropped_column, None);
    }
}
