use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "clinic_inventory.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InventoryConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("clinic-inventory.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<InventoryConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: InventoryConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &InventoryConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database path by precedence: explicit flag, then config file, then the default.
pub fn resolve_database(flag: Option<&Path>, config: Option<&InventoryConfig>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(default_database_path)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
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
        let loaded = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic-inventory.toml");
        let config = InventoryConfig { database: Some("data/stock.db".to_string()) };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &InventoryConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(InventoryConfig::default()));
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = InventoryConfig { database: Some("from-config.db".to_string()) };

        assert_eq!(resolve_database(Some(Path::new("flag.db")), Some(&config)), PathBuf::from("flag.db"));
        assert_eq!(resolve_database(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(resolve_database(None, Some(&InventoryConfig::default())), default_database_path());
        assert_eq!(resolve_database(None, None), default_database_path());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("clinic_inventory.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
