//! Locating the field mapping to use.
//!
//! Priority:
//! 1. An explicit path (command line)
//! 2. The `GANTRY_MAPPING` environment variable, if non-empty
//! 3. `<config dir>/gantry/mapping.json`, if it exists
//! 4. The built-in default mapping

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GantryResult;
use crate::mapping::FieldMapping;
use crate::source::load_mapping;

/// Environment variable naming a mapping file
pub const MAPPING_ENV: &str = "GANTRY_MAPPING";

/// Mapping file name inside the config directory
pub const MAPPING_FILE_NAME: &str = "mapping.json";

/// Where a mapping came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    ConfigFile(PathBuf),
    BuiltIn,
}

impl MappingSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            MappingSource::Explicit(p)
            | MappingSource::Environment(p)
            | MappingSource::ConfigFile(p) => Some(p),
            MappingSource::BuiltIn => None,
        }
    }
}

impl std::fmt::Display for MappingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingSource::Explicit(p) => write!(f, "{}", p.display()),
            MappingSource::Environment(p) => write!(f, "{} (from {})", p.display(), MAPPING_ENV),
            MappingSource::ConfigFile(p) => write!(f, "{} (config file)", p.display()),
            MappingSource::BuiltIn => write!(f, "built-in defaults"),
        }
    }
}

/// Default mapping file location, e.g. `~/.config/gantry/mapping.json`.
pub fn default_mapping_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gantry").join(MAPPING_FILE_NAME))
}

/// Decide which mapping to load, without reading it.
pub fn resolve_mapping_source(explicit: Option<&Path>) -> MappingSource {
    if let Some(path) = explicit {
        return MappingSource::Explicit(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(MAPPING_ENV)
        && !env_path.is_empty()
    {
        return MappingSource::Environment(PathBuf::from(env_path));
    }

    match default_mapping_path() {
        Some(path) if path.is_file() => MappingSource::ConfigFile(path),
        _ => MappingSource::BuiltIn,
    }
}

/// Resolve and load the mapping.
pub fn load_effective_mapping(
    explicit: Option<&Path>,
) -> GantryResult<(FieldMapping, MappingSource)> {
    let source = resolve_mapping_source(explicit);
    debug!(%source, "resolved field mapping");
    let mapping = match source.path() {
        Some(path) => load_mapping(path)?,
        None => FieldMapping::default(),
    };
    Ok((mapping, source))
}
