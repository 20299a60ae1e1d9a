//! Sheet registry and location management.

use crate::types::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry file name inside the data directory.
pub const CONFIG_FILE: &str = "sheetsql.json";

/// Configuration: map of sheet name to CSV file path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Registered sheets. Relative paths are resolved against the data directory.
    #[serde(default)]
    pub sheets: BTreeMap<String, PathBuf>,
}

impl Config {
    /// Registry file path for a data directory.
    pub fn config_file(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load configuration, or the default when no registry file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_file = Self::config_file(dir);

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| SheetError::Config(format!("Invalid config {}: {}", config_file.display(), e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration, creating the data directory if needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_file(dir), content)?;
        Ok(())
    }

    /// Register a sheet name with a file path.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.sheets.insert(name.into(), path.into());
    }

    /// Get the registered path for a sheet.
    pub fn get(&self, name: &str) -> Result<&PathBuf> {
        self.sheets.get(name).ok_or_else(|| {
            SheetError::Config(format!(
                "Sheet '{}' not registered. Run: sheetsql register {} <path>",
                name, name
            ))
        })
    }

    /// Registered sheets in name order.
    pub fn list(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.sheets.iter()
    }

    /// Resolve the CSV file backing `table`.
    ///
    /// A registered name wins. Otherwise `<dir>/<table>.csv` is used if it
    /// exists.
    pub fn resolve_path(&self, dir: &Path, table: &str) -> Result<PathBuf> {
        if let Ok(path) = self.get(table) {
            return Ok(if path.is_absolute() {
                path.clone()
            } else {
                dir.join(path)
            });
        }

        let path = dir.join(format!("{table}.csv"));
        if path.exists() {
            return Ok(path);
        }

        Err(SheetError::TableNotFound(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_register_and_get() {
        let mut config = Config::default();
        config.register("Users", "users.csv");

        assert_eq!(config.get("Users").unwrap(), &PathBuf::from("users.csv"));
        assert!(config.get("Orders").unwrap_err().to_string().contains("not registered"));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        let mut config = Config::default();
        config.register("Users", "/data/users.csv");
        config.save(dir.path()).unwrap();

        assert_eq!(Config::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_config_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(Config::config_file(dir.path()), "{not json").unwrap();

        assert!(matches!(Config::load(dir.path()), Err(SheetError::Config(_))));
    }

    #[test]
    fn test_config_resolve_path() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.register("Users", "people.csv");
        config.register("Abs", "/srv/abs.csv");

        assert_eq!(config.resolve_path(dir.path(), "Users").unwrap(), dir.path().join("people.csv"));
        assert_eq!(config.resolve_path(dir.path(), "Abs").unwrap(), PathBuf::from("/srv/abs.csv"));

        fs::write(dir.path().join("Orders.csv"), "ID\n").unwrap();
        assert_eq!(config.resolve_path(dir.path(), "Orders").unwrap(), dir.path().join("Orders.csv"));

        assert!(matches!(
            config.resolve_path(dir.path(), "Missing"),
            Err(SheetError::TableNotFound(_))
        ));
    }
}
