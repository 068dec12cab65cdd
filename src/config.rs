use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::record::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StockroomConfig {
    pub database: Option<String>,
    pub low_stock_threshold: Option<i64>,
    pub export_path: Option<String>,
}

impl StockroomConfig {
    /// Config written by `stockroom init`
    pub fn starter() -> Self {
        Self {
            database: Some(default_database_path_in(Path::new(".")).display().to_string()),
            low_stock_threshold: Some(DEFAULT_LOW_STOCK_THRESHOLD),
            export_path: Some(default_export_path().display().to_string()),
        }
    }

    /// Database path: explicit flag, then config, then default
    pub fn database_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(Path::new(".")))
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// Export path: explicit flag, then config, then default
    pub fn export_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.export_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_export_path)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("stockroom.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".stockroom").join("stockroom.db")
}

pub fn default_export_path() -> PathBuf {
    PathBuf::from("stock.csv")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StockroomConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StockroomConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &StockroomConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    ensure_parent_dir(db_path)
}

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("stockroom.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.toml");
        let config = StockroomConfig {
            database: Some("shop.db".to_string()),
            low_stock_threshold: Some(10),
            export_path: None,
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &StockroomConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(StockroomConfig::default()));
    }

    #[test]
    fn test_resolution_order() {
        let config = StockroomConfig {
            database: Some("from-config.db".to_string()),
            low_stock_threshold: None,
            export_path: None,
        };

        assert_eq!(config.database_path(Some(Path::new("flag.db"))), PathBuf::from("flag.db"));
        assert_eq!(config.database_path(None), PathBuf::from("from-config.db"));
        assert_eq!(
            StockroomConfig::default().database_path(None),
            PathBuf::from("./.stockroom/stockroom.db")
        );
        assert_eq!(config.low_stock_threshold(), DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(config.export_path(None), PathBuf::from("stock.csv"));
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("stock.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
