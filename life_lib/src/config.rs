//! Configuration shared by every front-end.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use app_dirs2::{AppDataType, AppInfo, get_app_root};

use crate::{Boundary, Grid, GridError, communication::SimulationSpeed};

/// The information used to get the default configuration location.
pub const APP_INFO: AppInfo = AppInfo {
    name: "flat_life",
    author: "flat_life",
};

/// The possible errors when reading or writing the configuration.
#[derive(thiserror::Error, Debug)]
#[cfg_attr(test, derive(kinded::Kinded))]
pub enum ConfigError {
    #[error("Unable to access configuration file: {0}")]
    File(#[from] io::Error),
    #[error("Configuration file is not valid: {0}")]
    InvalidData(#[from] serde_json::Error),
    #[error("Unable to find the user configuration directory: {0}")]
    Directory(#[from] app_dirs2::AppDirsError),
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// The amount of cells in each row.
    pub width: usize,
    /// The amount of rows.
    pub height: usize,
    /// The delay between generations while running, in milliseconds. Zero removes the delay.
    pub delay_ms: u64,
    pub boundary: Boundary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 58,
            height: 35,
            delay_ms: 500,
            boundary: Boundary::default(),
        }
    }
}

impl Config {
    /// The name of the configuration file within the configuration directory.
    pub const FILE_NAME: &str = "config_data.json";

    /// The directory the configuration is stored in when no other is given.
    ///
    /// On Linux:
    /// `/home/<user>/.config/flat_life`
    pub fn default_directory() -> Result<PathBuf, ConfigError> {
        Ok(get_app_root(AppDataType::UserConfig, &APP_INFO)?)
    }

    /// Reads the configuration from the given file.
    ///
    /// If the file does not exist the default configuration is returned.
    /// Fields missing from the file take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No configuration at {path:?}, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        let config = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("Loaded configuration from {path:?}: {config:?}");
        Ok(config)
    }

    /// Writes the configuration to the given file, creating its directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(directory) = path.parent() {
            std::fs::create_dir_all(directory)?;
        }

        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::debug!("Saved configuration to {path:?}");
        Ok(())
    }

    pub fn speed(&self) -> SimulationSpeed {
        SimulationSpeed::from_millis(self.delay_ms)
    }

    /// Creates an empty grid with the configured size & boundary.
    pub fn empty_grid(&self) -> Result<Grid, GridError> {
        Ok(Grid::new(self.width, self.height)?.with_boundary(self.boundary))
    }
}
