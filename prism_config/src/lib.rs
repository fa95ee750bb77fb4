//! Loads RON files into statically typed configuration structures.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use log::error;
use ron::{de::Error as DeError, ser::Error as SerError};
use serde::{de::DeserializeOwned, Serialize};

/// Extension every configuration file is expected to carry.
pub const CONFIG_EXTENSION: &str = "ron";

/// Errors raised while reading or writing a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    File(io::Error),
    /// The contents are not valid RON for the requested structure.
    Parser(DeError),
    /// The structure could not be turned into RON.
    Serializer(SerError),
    /// The path does not point at a `.ron` file.
    Extension(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::File(err) => write!(f, "config file error: {}", err),
            ConfigError::Parser(err) => write!(f, "config parse error: {}", err),
            ConfigError::Serializer(err) => write!(f, "config serialize error: {}", err),
            ConfigError::Extension(path) => match path.extension() {
                Some(ext) => write!(
                    f,
                    "{}: expected a \".{}\" file, got {:?}",
                    path.display(),
                    CONFIG_EXTENSION,
                    ext
                ),
                None => write!(
                    f,
                    "{}: expected a \".{}\" file, got a path without extension",
                    path.display(),
                    CONFIG_EXTENSION
                ),
            },
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::File(err) => Some(err),
            ConfigError::Parser(err) => Some(err),
            ConfigError::Serializer(err) => Some(err),
            ConfigError::Extension(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::File(e)
    }
}

impl From<DeError> for ConfigError {
    fn from(e: DeError) -> Self {
        ConfigError::Parser(e)
    }
}

impl From<SerError> for ConfigError {
    fn from(e: SerError) -> Self {
        ConfigError::Serializer(e)
    }
}

/// Loading and writing of configuration structures.
///
/// Implemented for every type that is `Serialize + DeserializeOwned + Default`.
pub trait Config
where
    Self: Sized,
{
    /// Loads the structure from a file, falling back to `Default` on any failure.
    fn load<P: AsRef<Path>>(path: P) -> Self;

    /// Loads the structure from a file.
    fn load_no_fallback<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError>;

    /// Loads the structure from RON text.
    fn load_str(source: &str) -> Result<Self, ConfigError>;

    /// Writes the structure to a file as pretty printed RON.
    fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError>;
}

impl<T> Config for T
where
    T: DeserializeOwned + Serialize + Default,
{
    fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load_no_fallback(path).unwrap_or_else(|e| {
            error!("Failed to load config '{}': {}", path.display(), e);
            Self::default()
        })
    }

    fn load_no_fallback<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some(CONFIG_EXTENSION) {
            return Err(ConfigError::Extension(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    fn load_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(source)?)
    }

    fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let s = ron::ser::to_string_pretty(self, Default::default())?;
        fs::write(path, s)?;
        Ok(())
    }
}
