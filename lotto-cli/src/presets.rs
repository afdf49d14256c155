use lotto_game::{
    ConfigError, GameConfig, PresetCatalog, PresetSource, parse_preset_list, resolve_catalog,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Preset list read from a `name;maxNumber;ticketSize` file on disk.
#[derive(Debug, Clone)]
pub struct FilePresets {
    path: PathBuf,
}

impl FilePresets {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PresetSource for FilePresets {
    fn load_presets(&self) -> Result<Vec<GameConfig>, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Unreadable {
            source_name: self.path.display().to_string(),
            source,
        })?;
        parse_preset_list(&text)
    }
}

/// Catalog for the run; any preset problem degrades to Finnish Lotto alone.
pub fn load_catalog(path: Option<&Path>) -> PresetCatalog {
    let source = path.map(FilePresets::new);
    match resolve_catalog(source.as_ref()) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::warn!("Loading the lotto settings failed ({err}); using Finnish Lotto");
            PresetCatalog::fallback()
        }
    }
}
