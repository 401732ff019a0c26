use crate::Config;
use anyhow::{bail, Result};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use xdg::BaseDirectories;

const COMMENT_HEADER: &str = "\
# dropsnap configuration
# Remove a key to go back to its default value.

";

/// Path of the configuration file in the XDG config directory.
///
/// # Errors
///
/// Errors if the XDG directories cannot be determined or the config directory cannot be created.
pub fn get_default_path() -> Result<PathBuf> {
    let path = BaseDirectories::with_prefix("dropsnap")?;
    Ok(path.place_config_file("config.toml")?)
}

/// Loads the configuration from `config_path`, or from the default path. A missing default
/// file is created with the default configuration.
///
/// # Errors
///
/// Errors if the file cannot be read or parsed, if a given path does not exist, or if the
/// default file cannot be written.
pub fn load_config_file(config_path: Option<PathBuf>) -> Result<Config> {
    tracing::debug!("Loading config file");
    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("\"{}\" does not exist", path.to_string_lossy());
            }
            read_config(&path)
        }
        None => load_or_create(&get_default_path()?),
    }
}

/// # Errors
///
/// Errors if the file cannot be read, or is not a valid configuration.
pub fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!("Config file '{}' found.", path.to_string_lossy());
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Reads the configuration at `path`, writing the defaults there first if there is no file.
///
/// # Errors
///
/// See [`read_config`] and [`write_to_file`].
pub fn load_or_create(path: &Path) -> Result<Config> {
    if path.exists() {
        return read_config(path);
    }
    tracing::debug!("Config file not found. Using default config file.");
    let config = Config::default();
    write_to_file(path, &config)?;
    Ok(config)
}

/// # Errors
/// This function errors when:
/// - serialization of the config fails
/// - writing to file fails
pub fn write_to_file(path: &Path, config: &Config) -> Result<()> {
    let toml = toml::to_string(config)?;
    let toml_with_header = String::from(COMMENT_HEADER) + &toml;
    let mut file = File::create(path)?;
    file.write_all(toml_with_header.as_bytes())?;
    Ok(())
}
