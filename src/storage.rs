use crate::catalog::TargetCatalog;
use crate::config::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_FILE: &str = "targets.json";

/// Where a catalog was loaded from, for logging.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pingrank"))
}

pub fn default_catalog_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CATALOG_FILE))
}

pub fn read_catalog(path: &Path) -> Result<TargetCatalog, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    TargetCatalog::from_json(&content)
}

/// Picks the catalog: an explicit path must load, the per-user file is used
/// when present, otherwise the built-in endpoints.
pub fn load_catalog(explicit: Option<&Path>) -> Result<(TargetCatalog, CatalogSource), ConfigError> {
    resolve_catalog(explicit, default_catalog_path().as_deref())
}

fn resolve_catalog(
    explicit: Option<&Path>,
    user_default: Option<&Path>,
) -> Result<(TargetCatalog, CatalogSource), ConfigError> {
    if let Some(path) = explicit {
        let catalog = read_catalog(path)?;
        return Ok((catalog, CatalogSource::File(path.to_path_buf())));
    }

    if let Some(path) = user_default
        && path.exists()
    {
        let catalog = read_catalog(path)?;
        return Ok((catalog, CatalogSource::File(path.to_path_buf())));
    }

    Ok((TargetCatalog::builtin(), CatalogSource::Builtin))
}
